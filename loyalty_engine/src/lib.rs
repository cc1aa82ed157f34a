//! Loyalty Engine
//!
//! The loyalty engine keeps track of purchase orders that users submit, asks the external accrual service how many
//! points each order earns, and maintains each user's points balance. It is transport-agnostic; the HTTP surface lives
//! in `loyalty_server`.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@db`]). SQLite is the supported backend. You should never need to access
//!    the database directly. Instead, use the public API provided by the engine. The exception is the data types used
//!    in the database. These are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@engine_api`]). This provides order submission, balance and withdrawal queries and
//!    user registration. Backends need to implement the traits in [`mod@db`] in order to back these APIs.
//! 3. The [`order_poller`], which reconciles pending orders with the accrual service in the background.
//!
//! The engine also emits events when an accrual verdict is applied to an order, so that other parts of the system can
//! react to it. See [`mod@events`].
mod db;

pub mod db_types;
pub mod engine_api;
pub mod events;
pub mod helpers;
pub mod order_poller;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use db::traits::{AccountManagement, AuthManagement, InsertOrderResult, OrderManagement};
pub use engine_api::{
    accounts_api::AccountApi,
    auth_api::AuthApi,
    errors::{AccountApiError, AuthApiError, OrderFlowError, OrderLedgerError},
    order_flow_api::{OrderFlowApi, SubmitOrderResult},
};
pub use order_poller::{OrderPoller, PollerConfig, PollerError, ShutdownSignal, ShutdownTrigger};
