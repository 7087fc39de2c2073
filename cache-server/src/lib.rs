//! cache-server: REST backend for locations and items
//!
//! Locations form a self-referencing hierarchy; every item belongs to one
//! location. Handlers parse the request, run one statement through a
//! repository, and map the outcome to a status code.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
