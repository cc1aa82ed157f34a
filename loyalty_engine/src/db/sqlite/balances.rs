use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{Balance, Cents};

pub async fn fetch_balance(user_id: i64, conn: &mut SqliteConnection) -> Result<Balance, sqlx::Error> {
    let balance = sqlx::query_as("SELECT current, withdrawn FROM balances WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(conn)
        .await?;
    Ok(balance.unwrap_or_default())
}

/// Adds `amount` to the user's current balance, creating the balance record if necessary.
pub async fn credit(user_id: i64, amount: Cents, conn: &mut SqliteConnection) -> Result<Balance, sqlx::Error> {
    let balance = sqlx::query_as(
        r#"
            INSERT INTO balances (user_id, current) VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
                SET current = current + excluded.current, updated_at = CURRENT_TIMESTAMP
            RETURNING current, withdrawn;
        "#,
    )
    .bind(user_id)
    .bind(amount)
    .fetch_one(conn)
    .await?;
    trace!("💰️ Credited {amount} to user #{user_id}");
    Ok(balance)
}

/// Moves `amount` from the user's current balance to their withdrawn total. Returns `None`, without changing
/// anything, if the current balance is insufficient (or the user has never had a balance).
pub async fn debit(user_id: i64, amount: Cents, conn: &mut SqliteConnection) -> Result<Option<Balance>, sqlx::Error> {
    let balance = sqlx::query_as(
        r#"
            UPDATE balances
            SET current = current - $1, withdrawn = withdrawn + $1, updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $2 AND current >= $1
            RETURNING current, withdrawn;
        "#,
    )
    .bind(amount)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    if balance.is_some() {
        trace!("💰️ Debited {amount} from user #{user_id}");
    }
    Ok(balance)
}
