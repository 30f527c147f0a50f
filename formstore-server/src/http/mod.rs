//! HTTP server layer
//!
//! Axum server with:
//! - HTML pages for the form and the record listing
//! - JSON listing with JSON error responses
//! - Flash messages across the submit redirect
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod render;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
