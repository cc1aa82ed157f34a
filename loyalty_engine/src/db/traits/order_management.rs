use std::future::Future;

use crate::{
    db_types::{Cents, NewOrder, Order, OrderNumber, OrderStatusType, PendingOrder},
    InsertOrderResult,
    OrderLedgerError,
};

/// The `OrderManagement` trait defines the behaviour of the order ledger.
pub trait OrderManagement {
    /// Stores a new order in status `NEW`. Order numbers are globally unique, so if the number is already on record,
    /// nothing is written and the existing order is returned in [`InsertOrderResult::AlreadyExists`].
    fn insert_order(&self, order: NewOrder) -> impl Future<Output = Result<InsertOrderResult, OrderLedgerError>> + Send;

    fn fetch_order_by_number(
        &self,
        order_number: &OrderNumber,
    ) -> impl Future<Output = Result<Option<Order>, OrderLedgerError>> + Send;

    /// All orders uploaded by the user, oldest first.
    fn fetch_orders_for_user(&self, user_id: i64) -> impl Future<Output = Result<Vec<Order>, OrderLedgerError>> + Send;

    /// Every order, for any user, whose status is `NEW` or `PROCESSING`. No particular order is guaranteed.
    fn fetch_pending_orders(&self) -> impl Future<Output = Result<Vec<PendingOrder>, OrderLedgerError>> + Send;

    /// Records the accrual service's verdict for an order.
    ///
    /// The status and accrual are written, and if the new status is `PROCESSED` with a positive accrual, the user's
    /// balance is credited with the accrual. Both writes happen in one transaction. A balance is credited at most once
    /// per order, however many times a `PROCESSED` verdict is applied.
    ///
    /// Fails with [`OrderLedgerError::OrderNotFound`] if no such order exists for `user_id`.
    fn apply_verdict(
        &self,
        user_id: i64,
        order_number: &OrderNumber,
        status: OrderStatusType,
        accrual: Cents,
    ) -> impl Future<Output = Result<Order, OrderLedgerError>> + Send;
}
