use accrual_client::AccrualApiError;
use thiserror::Error;

use crate::{db_types::OrderNumber, OrderLedgerError};

/// The reason the order poller stopped. Only the first failure of any poller task is reported.
#[derive(Debug, Error)]
pub enum PollerError {
    #[error("Could not list pending orders: {0}")]
    Listing(OrderLedgerError),
    #[error("Could not apply the accrual verdict for order {order}: {source}")]
    Apply { order: OrderNumber, source: OrderLedgerError },
    #[error("The accrual service failed for order {order}: {source}")]
    Oracle { order: OrderNumber, source: AccrualApiError },
    #[error("A poller task failed: {0}")]
    TaskFailed(String),
}
