//! Bizdesk API server library.
//!
//! Exposes config, state, error handling, upload storage and routes so
//! integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod uploads;
