//! In-process store implementing both repository traits
//!
//! Mirrors the schema's rules so handlers behave the same against it:
//! ids are generated per table, `parent_id`/`location_id` must reference an
//! existing location, and a referenced location cannot be deleted.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DbError, ItemFilter, ItemRepo, LocationFilter, LocationRepo};
use crate::models::{Item, Location, NewItem, NewLocation};

/// Shared in-memory tables. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    locations: BTreeMap<i64, Location>,
    items: BTreeMap<i64, Item>,
    last_location_id: i64,
    last_item_id: i64,
}

impl Tables {
    fn check_location_exists(&self, table: &str, column: &str, id: i64) -> Result<(), DbError> {
        if self.locations.contains_key(&id) {
            return Ok(());
        }
        Err(DbError::Constraint(format!(
            "insert or update on table \"{table}\" violates foreign key constraint \"{table}_{column}_fkey\": \
             Key ({column})=({id}) is not present in table \"locations\""
        )))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search {
        Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

#[async_trait]
impl LocationRepo for MemoryStore {
    async fn list(&self, filter: &LocationFilter) -> Result<Vec<Location>, DbError> {
        let tables = self.tables.read().await;
        let mut locations: Vec<Location> = tables
            .locations
            .values()
            .filter(|l| matches_search(&l.name, filter.search.as_deref()))
            .cloned()
            .collect();
        locations.sort_by(|a, b| (a.name.as_str(), a.id).cmp(&(b.name.as_str(), b.id)));
        Ok(locations)
    }

    async fn get(&self, id: i64) -> Result<Location, DbError> {
        self.tables
            .read()
            .await
            .locations
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound {
                resource: "location",
                id,
            })
    }

    async fn create(&self, location: NewLocation) -> Result<Location, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(parent_id) = location.parent_id {
            tables.check_location_exists("locations", "parent_id", parent_id)?;
        }

        tables.last_location_id += 1;
        let now = Utc::now();
        let created = Location {
            id: tables.last_location_id,
            name: location.name.into_string(),
            parent_id: location.parent_id,
            created_at: now,
            updated_at: now,
        };
        tables.locations.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, location: NewLocation) -> Result<Location, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.locations.contains_key(&id) {
            return Err(DbError::NotFound {
                resource: "location",
                id,
            });
        }
        if let Some(parent_id) = location.parent_id {
            tables.check_location_exists("locations", "parent_id", parent_id)?;
        }

        let existing = tables
            .locations
            .get_mut(&id)
            .ok_or(DbError::NotFound {
                resource: "location",
                id,
            })?;
        existing.name = location.name.into_string();
        existing.parent_id = location.parent_id;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.locations.contains_key(&id) {
            return Err(DbError::NotFound {
                resource: "location",
                id,
            });
        }

        let referencing = if tables.locations.values().any(|l| l.parent_id == Some(id)) {
            Some(("locations", "parent_id"))
        } else if tables.items.values().any(|i| i.location_id == id) {
            Some(("items", "location_id"))
        } else {
            None
        };
        if let Some((table, column)) = referencing {
            return Err(DbError::Constraint(format!(
                "update or delete on table \"locations\" violates foreign key constraint \
                 \"{table}_{column}_fkey\" on table \"{table}\": \
                 Key (id)=({id}) is still referenced from table \"{table}\""
            )));
        }

        tables.locations.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepo for MemoryStore {
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, DbError> {
        let tables = self.tables.read().await;
        let mut items: Vec<Item> = tables
            .items
            .values()
            .filter(|i| matches_search(&i.name, filter.search.as_deref()))
            .filter(|i| filter.location_id.map_or(true, |id| i.location_id == id))
            .cloned()
            .collect();
        items.sort_by(|a, b| (a.name.as_str(), a.id).cmp(&(b.name.as_str(), b.id)));
        Ok(items)
    }

    async fn get(&self, id: i64) -> Result<Item, DbError> {
        self.tables
            .read()
            .await
            .items
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound { resource: "item", id })
    }

    async fn create(&self, item: NewItem) -> Result<Item, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_location_exists("items", "location_id", item.location_id)?;

        tables.last_item_id += 1;
        let now = Utc::now();
        let created = Item {
            id: tables.last_item_id,
            name: item.name.into_string(),
            location_id: item.location_id,
            created_at: now,
            updated_at: now,
        };
        tables.items.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, item: NewItem) -> Result<Item, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.items.contains_key(&id) {
            return Err(DbError::NotFound { resource: "item", id });
        }
        tables.check_location_exists("items", "location_id", item.location_id)?;

        let existing = tables
            .items
            .get_mut(&id)
            .ok_or(DbError::NotFound { resource: "item", id })?;
        existing.name = item.name.into_string();
        existing.location_id = item.location_id;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.tables
            .write()
            .await
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound { resource: "item", id })
    }
}
