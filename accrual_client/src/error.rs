use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AccrualApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    /// The request never produced a complete response (connection refused, timeout, reset). Worth retrying later.
    #[error("Could not reach the accrual service: {0}")]
    Transport(String),
    #[error("Accrual service replied with status {status}. {message}")]
    UnexpectedStatus { status: u16, message: String },
    #[error("Invalid response from the accrual service: {0}")]
    InvalidResponse(String),
}

impl AccrualApiError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
