//! HTTP server layer
//!
//! Axum server with:
//! - Fixed (method, path) routes for locations and items
//! - Request tracing
//! - Graceful shutdown
//! - Plain-text error bodies

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, listen_addr, run_server, AppState, ServerConfig, ServerError};
