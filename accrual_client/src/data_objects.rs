use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Processing state reported by the accrual service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccrualStatus {
    /// The order is known to the service but evaluation hasn't begun. Some deployments say `NEW` instead.
    #[serde(alias = "NEW")]
    Registered,
    Processing,
    Invalid,
    Processed,
}

impl Display for AccrualStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccrualStatus::Registered => write!(f, "REGISTERED"),
            AccrualStatus::Processing => write!(f, "PROCESSING"),
            AccrualStatus::Invalid => write!(f, "INVALID"),
            AccrualStatus::Processed => write!(f, "PROCESSED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualOrder {
    pub order: String,
    pub status: AccrualStatus,
    /// Points earned, in major units. Only present once the order has been processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual: Option<f64>,
}

impl AccrualOrder {
    pub fn accrual_or_zero(&self) -> f64 {
        self.accrual.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccrualResponse {
    Verdict(AccrualOrder),
    /// The accrual service has no record of the order.
    NotRegistered,
}
