//! # Loyalty server
//! This crate hosts the HTTP surface of the loyalty points backend. It is responsible for:
//! Registering and authenticating users, and issuing JWT access tokens.
//! Accepting order uploads and reporting orders, balances and withdrawals.
//! Running the background order poller that asks the accrual service what each order is worth.
//!
//! ## Configuration
//! The server is configured via environment variables, with command-line flags as a fallback. See
//! [config](config/index.html) for more information.
//!
//! ## Routes
//! * `GET /health`: A health check route that returns a 200 OK response.
//! * `POST /api/user/register`, `POST /api/user/login`: Issue an access token.
//! * `POST /api/user/orders`, `GET /api/user/orders`: Upload and list orders.
//! * `GET /api/user/balance`, `POST /api/user/balance/withdraw`: Query and spend points.
//! * `GET /api/user/withdrawals`: List past withdrawals.
pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
