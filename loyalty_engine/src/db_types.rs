use std::{fmt::Display, str::FromStr};

use accrual_client::AccrualStatus;
use chrono::{DateTime, Utc};
use log::error;
pub use loyalty_common::Cents;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------     OrderNumber       ---------------------------------------------------------
/// A purchase order number. Always a non-empty string of decimal digits that passes the Luhn check when it comes from
/// an API; the type itself does not enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderNumber(pub String);

impl FromStr for OrderNumber {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatusType {
    /// The order has been uploaded, but the accrual service hasn't started evaluating it.
    New,
    /// The accrual service is busy evaluating the order.
    Processing,
    /// The accrual service rejected the order. No points will be awarded. This is a final state.
    Invalid,
    /// The accrual service has finished evaluating the order and the accrual has been credited. This is a final state.
    Processed,
}

impl OrderStatusType {
    /// Pending orders are those the poller still has to ask the accrual service about.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::New | Self::Processing)
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::New => write!(f, "NEW"),
            OrderStatusType::Processing => write!(f, "PROCESSING"),
            OrderStatusType::Invalid => write!(f, "INVALID"),
            OrderStatusType::Processed => write!(f, "PROCESSED"),
        }
    }
}

impl From<AccrualStatus> for OrderStatusType {
    fn from(value: AccrualStatus) -> Self {
        match value {
            AccrualStatus::Registered => Self::New,
            AccrualStatus::Processing => Self::Processing,
            AccrualStatus::Invalid => Self::Invalid,
            AccrualStatus::Processed => Self::Processed,
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to New");
            OrderStatusType::New
        })
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "PROCESSING" => Ok(Self::Processing),
            "INVALID" => Ok(Self::Invalid),
            "PROCESSED" => Ok(Self::Processed),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------        NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub user_id: i64,
}

impl NewOrder {
    pub fn new(order_number: OrderNumber, user_id: i64) -> Self {
        Self { order_number, user_id }
    }
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: OrderNumber,
    pub user_id: i64,
    pub status: OrderStatusType,
    pub accrual: Cents,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------     PendingOrder      ---------------------------------------------------------
/// The unit of work handed from the poller's lister to its workers. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FromRow)]
pub struct PendingOrder {
    pub order_number: OrderNumber,
    pub user_id: i64,
}

impl PendingOrder {
    pub fn new<S: Into<OrderNumber>>(order_number: S, user_id: i64) -> Self {
        Self { order_number: order_number.into(), user_id }
    }
}

//--------------------------------------        Balance        ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Balance {
    pub current: Cents,
    pub withdrawn: Cents,
}

//--------------------------------------         User          ---------------------------------------------------------
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      Withdrawal       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWithdrawal {
    pub user_id: i64,
    pub order_number: OrderNumber,
    pub sum: Cents,
}

impl NewWithdrawal {
    pub fn new(user_id: i64, order_number: OrderNumber, sum: Cents) -> Self {
        Self { user_id, order_number, sum }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: i64,
    pub user_id: i64,
    pub order_number: OrderNumber,
    pub sum: Cents,
    pub processed_at: DateTime<Utc>,
}
