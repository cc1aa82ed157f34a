//! Client for the external accrual service.
//!
//! The accrual service evaluates purchase orders and decides how many loyalty points each one earns. It exposes a
//! single read endpoint, `GET {base}/api/orders/{number}`, which [`AccrualApi::get_order`] wraps.
mod api;
pub mod config;
mod data_objects;
mod error;

pub use api::AccrualApi;
pub use config::AccrualConfig;
pub use data_objects::{AccrualOrder, AccrualResponse, AccrualStatus};
pub use error::AccrualApiError;
