use thiserror::Error;

use crate::db_types::OrderNumber;

#[derive(Debug, Clone, Error)]
pub enum OrderLedgerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} does not exist for this user")]
    OrderNotFound(OrderNumber),
}

impl From<sqlx::Error> for OrderLedgerError {
    fn from(e: sqlx::Error) -> Self {
        OrderLedgerError::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Order number {0} is not a valid order number")]
    InvalidOrderNumber(String),
    #[error("Order {0} has already been uploaded by another user")]
    OrderOwnedByAnotherUser(OrderNumber),
    #[error("{0}")]
    LedgerError(#[from] OrderLedgerError),
}

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order number {0} is not a valid order number")]
    InvalidOrderNumber(String),
    #[error("Withdrawal amount must be positive, not {0}")]
    InvalidAmount(String),
    #[error("There are insufficient funds in the account")]
    InsufficientFunds,
    #[error("{0}")]
    LedgerError(#[from] OrderLedgerError),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Login {0} is already taken")]
    LoginAlreadyExists(String),
    #[error("Invalid login or password")]
    InvalidCredentials,
    #[error("Login and password must not be empty")]
    EmptyCredentials,
    #[error("Could not hash password: {0}")]
    PasswordHashError(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthApiError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AuthApiError::PasswordHashError(e.to_string())
    }
}
