//! In-memory stand-ins for the order ledger and the accrual service.
#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use accrual_client::{AccrualApiError, AccrualOrder, AccrualResponse, AccrualStatus};
use chrono::Utc;
use loyalty_engine::{
    db_types::{Cents, NewOrder, Order, OrderNumber, OrderStatusType, PendingOrder},
    order_poller::AccrualOracle,
    InsertOrderResult,
    OrderLedgerError,
    OrderManagement,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedVerdict {
    pub user_id: i64,
    pub order_number: String,
    pub status: OrderStatusType,
    pub accrual: Cents,
}

#[derive(Default)]
struct LedgerState {
    orders: Vec<Order>,
    credited: Vec<String>,
    balances: HashMap<i64, Cents>,
    applied: Vec<AppliedVerdict>,
    listings: usize,
    fail_listing: bool,
    fail_apply: bool,
}

#[derive(Clone, Default)]
pub struct FakeLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl FakeLedger {
    pub fn with_orders(orders: &[(&str, i64)]) -> Self {
        let ledger = Self::default();
        {
            let mut state = ledger.state.lock().unwrap();
            for (i, (number, user_id)) in orders.iter().enumerate() {
                let now = Utc::now();
                state.orders.push(Order {
                    id: i as i64 + 1,
                    order_number: OrderNumber::from(*number),
                    user_id: *user_id,
                    status: OrderStatusType::New,
                    accrual: Cents::default(),
                    created_at: now,
                    updated_at: now,
                });
            }
        }
        ledger
    }

    pub fn fail_listing(&self) {
        self.state.lock().unwrap().fail_listing = true;
    }

    pub fn fail_apply(&self) {
        self.state.lock().unwrap().fail_apply = true;
    }

    pub fn applied(&self) -> Vec<AppliedVerdict> {
        self.state.lock().unwrap().applied.clone()
    }

    pub fn applied_for(&self, number: &str) -> Vec<AppliedVerdict> {
        self.applied().into_iter().filter(|a| a.order_number == number).collect()
    }

    pub fn listings(&self) -> usize {
        self.state.lock().unwrap().listings
    }

    pub fn balance(&self, user_id: i64) -> Cents {
        self.state.lock().unwrap().balances.get(&user_id).copied().unwrap_or_default()
    }

    pub fn status_of(&self, number: &str) -> Option<OrderStatusType> {
        let state = self.state.lock().unwrap();
        state.orders.iter().find(|o| o.order_number.as_str() == number).map(|o| o.status)
    }
}

impl OrderManagement for FakeLedger {
    async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, OrderLedgerError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.orders.iter().find(|o| o.order_number == order.order_number) {
            return Ok(InsertOrderResult::AlreadyExists(existing.clone()));
        }
        let now = Utc::now();
        let new_order = Order {
            id: state.orders.len() as i64 + 1,
            order_number: order.order_number,
            user_id: order.user_id,
            status: OrderStatusType::New,
            accrual: Cents::default(),
            created_at: now,
            updated_at: now,
        };
        state.orders.push(new_order.clone());
        Ok(InsertOrderResult::Inserted(new_order))
    }

    async fn fetch_order_by_number(&self, order_number: &OrderNumber) -> Result<Option<Order>, OrderLedgerError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().find(|o| &o.order_number == order_number).cloned())
    }

    async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderLedgerError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().filter(|o| o.user_id == user_id).cloned().collect())
    }

    async fn fetch_pending_orders(&self) -> Result<Vec<PendingOrder>, OrderLedgerError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_listing {
            return Err(OrderLedgerError::DatabaseError("database is locked".into()));
        }
        state.listings += 1;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.status.is_pending())
            .map(|o| PendingOrder::new(o.order_number.clone(), o.user_id))
            .collect())
    }

    async fn apply_verdict(
        &self,
        user_id: i64,
        order_number: &OrderNumber,
        status: OrderStatusType,
        accrual: Cents,
    ) -> Result<Order, OrderLedgerError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        if state.fail_apply {
            return Err(OrderLedgerError::DatabaseError("disk I/O error".into()));
        }
        let order = state
            .orders
            .iter_mut()
            .find(|o| &o.order_number == order_number && o.user_id == user_id)
            .ok_or_else(|| OrderLedgerError::OrderNotFound(order_number.clone()))?;
        order.status = status;
        order.accrual = accrual;
        order.updated_at = Utc::now();
        let updated = order.clone();
        state.applied.push(AppliedVerdict {
            user_id,
            order_number: order_number.as_str().to_string(),
            status,
            accrual,
        });
        let number = order_number.as_str().to_string();
        if status == OrderStatusType::Processed && accrual.is_positive() && !state.credited.contains(&number) {
            state.credited.push(number);
            *state.balances.entry(user_id).or_default() += accrual;
        }
        Ok(updated)
    }
}

pub type Reply = Result<AccrualResponse, AccrualApiError>;

pub fn processed(number: &str, accrual: f64) -> Reply {
    Ok(AccrualResponse::Verdict(AccrualOrder {
        order: number.to_string(),
        status: AccrualStatus::Processed,
        accrual: Some(accrual),
    }))
}

pub fn processing(number: &str) -> Reply {
    Ok(AccrualResponse::Verdict(AccrualOrder {
        order: number.to_string(),
        status: AccrualStatus::Processing,
        accrual: None,
    }))
}

pub fn not_registered() -> Reply {
    Ok(AccrualResponse::NotRegistered)
}

pub fn unreachable() -> Reply {
    Err(AccrualApiError::Transport("connection refused".into()))
}

pub fn server_error() -> Reply {
    Err(AccrualApiError::UnexpectedStatus { status: 500, message: "Internal Server Error".into() })
}

#[derive(Default)]
struct OracleState {
    /// Replies are consumed in order; the last one repeats forever.
    scripts: HashMap<String, VecDeque<Reply>>,
    calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeOracle {
    state: Arc<Mutex<OracleState>>,
    delay: Duration,
}

impl FakeOracle {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, ..Default::default() }
    }

    pub fn script(&self, number: &str, replies: Vec<Reply>) -> &Self {
        self.state.lock().unwrap().scripts.insert(number.to_string(), replies.into());
        self
    }

    pub fn calls_for(&self, number: &str) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| c.as_str() == number).count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

impl AccrualOracle for FakeOracle {
    async fn get_order(&self, order_number: &str) -> Result<AccrualResponse, AccrualApiError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(order_number.to_string());
        match state.scripts.get_mut(order_number) {
            Some(replies) if replies.len() > 1 => replies.pop_front().unwrap_or_else(not_registered),
            Some(replies) => replies.front().cloned().unwrap_or_else(not_registered),
            None => not_registered(),
        }
    }
}
