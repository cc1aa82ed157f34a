use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{Cents, NewOrder, Order, OrderNumber, OrderStatusType, PendingOrder},
    InsertOrderResult,
    OrderLedgerError,
};

/// Inserts the order unless its number is already on record, in which case the existing order is returned.
pub async fn idempotent_insert(
    order: NewOrder,
    conn: &mut SqliteConnection,
) -> Result<InsertOrderResult, OrderLedgerError> {
    match insert_order(&order, conn).await? {
        Some(inserted) => Ok(InsertOrderResult::Inserted(inserted)),
        None => {
            let existing = fetch_order_by_number(&order.order_number, conn)
                .await?
                .ok_or_else(|| OrderLedgerError::OrderNotFound(order.order_number.clone()))?;
            trace!("📝️ Order {} already exists for user #{}", existing.order_number, existing.user_id);
            Ok(InsertOrderResult::AlreadyExists(existing))
        },
    }
}

/// Inserts a new order into the database using the given connection. This is not atomic. You can embed this call
/// inside a transaction if you need to ensure atomicity, and pass `&mut *tx` as the connection argument.
///
/// Returns `None` if an order with the same number already exists.
async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<Option<Order>, OrderLedgerError> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            INSERT INTO orders (order_number, user_id) VALUES ($1, $2)
            ON CONFLICT (order_number) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(order.order_number.as_str())
    .bind(order.user_id)
    .fetch_optional(conn)
    .await?;
    if let Some(o) = &order {
        trace!("📝️ Order {} inserted with id {}", o.order_number, o.id);
    }
    Ok(order)
}

pub async fn fetch_order_by_number(
    order_number: &OrderNumber,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderLedgerError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE order_number = $1")
        .bind(order_number.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Resulting orders are ordered by `created_at` in ascending order
pub async fn fetch_orders_for_user(user_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Order>, OrderLedgerError> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at ASC, id ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn fetch_pending_orders(conn: &mut SqliteConnection) -> Result<Vec<PendingOrder>, OrderLedgerError> {
    let orders: Vec<PendingOrder> =
        sqlx::query_as("SELECT order_number, user_id FROM orders WHERE status IN ('NEW', 'PROCESSING')")
            .fetch_all(conn)
            .await?;
    trace!("📝️ {} orders are awaiting an accrual verdict", orders.len());
    Ok(orders)
}

/// Overwrites the status and accrual of the order. The order must belong to `user_id`; `None` is returned otherwise.
pub async fn update_verdict(
    user_id: i64,
    order_number: &OrderNumber,
    status: OrderStatusType,
    accrual: Cents,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderLedgerError> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET status = $1, accrual = $2, updated_at = CURRENT_TIMESTAMP
            WHERE order_number = $3 AND user_id = $4
            RETURNING *;
        "#,
    )
    .bind(status)
    .bind(accrual)
    .bind(order_number.as_str())
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Flags the order's accrual as credited. Returns `true` if this call set the flag, and `false` if it had already been
/// set, in which case the balance must not be credited again.
pub async fn mark_credited(order_number: &OrderNumber, conn: &mut SqliteConnection) -> Result<bool, OrderLedgerError> {
    let result = sqlx::query(
        "UPDATE orders SET credited_at = CURRENT_TIMESTAMP WHERE order_number = $1 AND credited_at IS NULL",
    )
    .bind(order_number.as_str())
    .execute(conn)
    .await?;
    let marked = result.rows_affected() == 1;
    if !marked {
        debug!("📝️ Accrual for order {order_number} has already been credited");
    }
    Ok(marked)
}
