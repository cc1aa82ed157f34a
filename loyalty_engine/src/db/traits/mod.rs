//! # Database management and control.
//!
//! This module defines the interface contracts of the loyalty engine database *backends*.
//!
//! * [`OrderManagement`] is the order ledger: storing uploaded orders, listing the ones still awaiting a verdict from
//!   the accrual service, and applying verdicts (which may credit the user's balance).
//! * [`AccountManagement`] provides balance and withdrawal bookkeeping.
//! * [`AuthManagement`] stores user credentials.
//!
//! Methods return `impl Future + Send` rather than using `async fn`, so that generic callers like the
//! [`crate::order_poller::OrderPoller`] can run them on spawned tasks. Implementations are free to use `async fn`.
mod account_management;
mod auth_management;
mod order_management;

mod data_objects;

pub use account_management::AccountManagement;
pub use auth_management::AuthManagement;
pub use data_objects::InsertOrderResult;
pub use order_management::OrderManagement;
