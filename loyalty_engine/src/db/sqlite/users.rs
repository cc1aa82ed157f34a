use log::debug;
use sqlx::SqliteConnection;

use crate::{db_types::User, AuthApiError};

pub async fn create_user(login: &str, password_hash: &str, conn: &mut SqliteConnection) -> Result<User, AuthApiError> {
    let user: Option<User> = sqlx::query_as(
        r#"
            INSERT INTO users (login, password_hash) VALUES ($1, $2)
            ON CONFLICT (login) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(login)
    .bind(password_hash)
    .fetch_optional(conn)
    .await?;
    let user = user.ok_or_else(|| AuthApiError::LoginAlreadyExists(login.to_string()))?;
    debug!("🧑️ Created user #{} ({login})", user.id);
    Ok(user)
}

pub async fn fetch_user_by_login(login: &str, conn: &mut SqliteConnection) -> Result<Option<User>, AuthApiError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE login = $1").bind(login).fetch_optional(conn).await?;
    Ok(user)
}
