//! Repository traits and their PostgreSQL implementations
//!
//! Each repository follows these patterns:
//! - One parameterized statement per operation, built with `QueryBuilder`
//!   when filters are optional
//! - Lists are ordered by name in byte order (`COLLATE "C"`), ties broken by id
//! - A missing row on get/update/delete is `DbError::NotFound`

pub mod items;
pub mod locations;

use async_trait::async_trait;

use super::DbError;
use crate::models::{Item, Location, NewItem, NewLocation};

pub use items::PgItemRepo;
pub use locations::PgLocationRepo;

/// Filter for listing locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
}

/// Filter for listing items. Both fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    /// Exact location match
    pub location_id: Option<i64>,
}

/// Location storage
#[async_trait]
pub trait LocationRepo: Send + Sync {
    async fn list(&self, filter: &LocationFilter) -> Result<Vec<Location>, DbError>;
    async fn get(&self, id: i64) -> Result<Location, DbError>;
    async fn create(&self, location: NewLocation) -> Result<Location, DbError>;
    /// Replace name and parent of an existing location.
    async fn update(&self, id: i64, location: NewLocation) -> Result<Location, DbError>;
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

/// Item storage
#[async_trait]
pub trait ItemRepo: Send + Sync {
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, DbError>;
    async fn get(&self, id: i64) -> Result<Item, DbError>;
    async fn create(&self, item: NewItem) -> Result<Item, DbError>;
    /// Replace name and location of an existing item.
    async fn update(&self, id: i64, item: NewItem) -> Result<Item, DbError>;
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
///
/// `\`, `%` and `_` are escaped with the default LIKE escape character.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(contains_pattern("box"), "%box%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%"), r"%50\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\tmp"), r"%c:\\tmp%");
    }
}
