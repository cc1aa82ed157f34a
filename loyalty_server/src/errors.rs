use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use loyalty_engine::{AccountApiError, AuthApiError, OrderFlowError, OrderLedgerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("Could not issue access token. {0}")]
    CouldNotIssueAccessToken(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    UnprocessableRequest(String),
    #[error("The order poller stopped unexpectedly. {0}")]
    PollerError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UnprocessableRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CouldNotIssueAccessToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PollerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was provided.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    InvalidToken(String),
    #[error("Invalid login or password.")]
    InvalidCredentials,
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::InvalidCredentials => Self::AuthenticationError(AuthError::InvalidCredentials),
            AuthApiError::LoginAlreadyExists(_) => Self::Conflict(e.to_string()),
            AuthApiError::EmptyCredentials => Self::InvalidRequestBody(e.to_string()),
            AuthApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            AuthApiError::PasswordHashError(e) => {
                error!("💻️ Password hashing failed. {e}");
                Self::BackendError(format!("Password hashing error: {e}"))
            },
        }
    }
}

impl From<OrderLedgerError> for ServerError {
    fn from(e: OrderLedgerError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::InvalidOrderNumber(_) => Self::UnprocessableRequest(e.to_string()),
            OrderFlowError::OrderOwnedByAnotherUser(_) => Self::Conflict(e.to_string()),
            OrderFlowError::LedgerError(e) => e.into(),
        }
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::InvalidOrderNumber(_) => Self::UnprocessableRequest(e.to_string()),
            AccountApiError::InsufficientFunds => Self::UnprocessableRequest(e.to_string()),
            AccountApiError::InvalidAmount(_) => Self::InvalidRequestBody(e.to_string()),
            AccountApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            AccountApiError::LedgerError(e) => e.into(),
        }
    }
}
