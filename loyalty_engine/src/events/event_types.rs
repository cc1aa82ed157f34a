use serde::{Deserialize, Serialize};

use crate::db_types::{Order, OrderStatusType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmittedEvent {
    pub order: Order,
}

impl OrderSubmittedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Emitted by the order poller every time it writes an accrual verdict to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderVerdictEvent {
    /// The order as it is stored after the verdict was applied.
    pub order: Order,
    /// `true` if the oracle had no record of the order and it was marked invalid as a result.
    pub unregistered: bool,
}

impl OrderVerdictEvent {
    pub fn new(order: Order, unregistered: bool) -> Self {
        Self { order, unregistered }
    }

    pub fn status(&self) -> OrderStatusType {
        self.order.status
    }
}
