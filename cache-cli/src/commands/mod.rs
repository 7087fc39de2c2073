//! Command implementations for the cache CLI

pub mod serve;

pub use serve::run_serve;
