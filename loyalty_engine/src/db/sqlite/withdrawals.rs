use sqlx::SqliteConnection;

use crate::db_types::{NewWithdrawal, Withdrawal};

pub async fn insert_withdrawal(withdrawal: NewWithdrawal, conn: &mut SqliteConnection) -> Result<Withdrawal, sqlx::Error> {
    sqlx::query_as("INSERT INTO withdrawals (user_id, order_number, sum) VALUES ($1, $2, $3) RETURNING *")
        .bind(withdrawal.user_id)
        .bind(withdrawal.order_number.as_str())
        .bind(withdrawal.sum)
        .fetch_one(conn)
        .await
}

pub async fn fetch_withdrawals(user_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Withdrawal>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM withdrawals WHERE user_id = $1 ORDER BY processed_at ASC, id ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await
}
