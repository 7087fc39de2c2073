//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - One shared pool, cloned into each repository (no global)
//! - Every operation is a single autocommitting statement
//! - Rely on DB constraints for referential integrity, no check-then-write
//! - Handlers see repositories only through traits, so tests swap in [`MemoryStore`]

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use memory::MemoryStore;
pub use migrations::MIGRATOR;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
