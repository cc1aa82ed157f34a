//! # Loyalty engine public API
//!
//! The `engine_api` module exposes the programmatic API for the loyalty engine. The API is modular, so that clients
//! of the API can pick and choose the functionality they want.
//!
//! * [`order_flow_api`] accepts order uploads from users.
//! * [`accounts_api`] provides balances, order and withdrawal histories, and withdrawals.
//! * [`auth_api`] registers and authenticates users.
//!
//! # API usage
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a database backend that
//! implements the specific backend traits required by the API.
//!
//! ```rust,ignore
//! use loyalty_engine::{AccountApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements AccountManagement and OrderManagement
//! let api = AccountApi::new(db);
//! let balance = api.balance(user_id).await?;
//! ```
pub mod accounts_api;
pub mod auth_api;
pub mod errors;
pub mod order_flow_api;
