use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderNumber},
    events::{EventProducers, OrderSubmittedEvent},
    helpers::is_valid_luhn,
    InsertOrderResult,
    OrderFlowError,
    OrderManagement,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOrderResult {
    /// The order is new, and has been queued for evaluation by the accrual service.
    Accepted(Order),
    /// The same user had already uploaded this order. Nothing has changed.
    AlreadyUploaded(Order),
}

/// `OrderFlowApi` handles order uploads from users.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    /// Submit an order number on behalf of a user.
    ///
    /// The number must pass the Luhn check. A fresh order is stored in status `NEW`, where the order poller will pick
    /// it up. Uploading the same number twice is harmless for the user that owns it, and a conflict for everyone
    /// else.
    pub async fn submit_order(&self, user_id: i64, number: &str) -> Result<SubmitOrderResult, OrderFlowError> {
        let number = number.trim();
        if !is_valid_luhn(number) {
            debug!("🔄️📦️ User #{user_id} submitted invalid order number '{number}'");
            return Err(OrderFlowError::InvalidOrderNumber(number.to_string()));
        }
        let order = NewOrder::new(OrderNumber::from(number), user_id);
        match self.db.insert_order(order).await? {
            InsertOrderResult::Inserted(order) => {
                info!("🔄️📦️ Order {} uploaded by user #{user_id}", order.order_number);
                self.producers.publish_order_submitted(OrderSubmittedEvent::new(order.clone())).await;
                Ok(SubmitOrderResult::Accepted(order))
            },
            InsertOrderResult::AlreadyExists(order) if order.user_id == user_id => {
                debug!("🔄️📦️ Order {} was already uploaded by user #{user_id}", order.order_number);
                Ok(SubmitOrderResult::AlreadyUploaded(order))
            },
            InsertOrderResult::AlreadyExists(order) => {
                warn!(
                    "🔄️📦️ User #{user_id} tried to upload order {}, which belongs to user #{}",
                    order.order_number, order.user_id
                );
                Err(OrderFlowError::OrderOwnedByAnotherUser(order.order_number))
            },
        }
    }
}
