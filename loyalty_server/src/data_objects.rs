//! Request and response bodies for the HTTP API. Amounts cross the wire in major units; the engine works in cents.
use chrono::{DateTime, SecondsFormat, Utc};
use loyalty_engine::db_types::{Balance, Cents, Order, OrderStatusType, Withdrawal};
use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub number: String,
    pub status: OrderStatusType,
    /// Only present once the accrual service has awarded a non-zero amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual: Option<f64>,
    pub uploaded_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let accrual = order.accrual.is_positive().then(|| order.accrual.as_major_units());
        Self { number: order.order_number.0, status: order.status, accrual, uploaded_at: rfc3339(&order.created_at) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub current: f64,
    pub withdrawn: f64,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self { current: balance.current.as_major_units(), withdrawn: balance.withdrawn.as_major_units() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub order: String,
    pub sum: f64,
}

impl WithdrawRequest {
    pub fn sum_in_cents(&self) -> Option<Cents> {
        Cents::try_from_major_units(self.sum).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalResponse {
    pub order: String,
    pub sum: f64,
    pub processed_at: String,
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(w: Withdrawal) -> Self {
        Self { order: w.order_number.0, sum: w.sum.as_major_units(), processed_at: rfc3339(&w.processed_at) }
    }
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}
