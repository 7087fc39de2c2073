//! Item record and payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecordName, ValidationError};

/// A thing stored at exactly one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /items` and `PUT /items/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location_id: Option<i64>,
}

/// Validated item fields, as written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: RecordName,
    pub location_id: i64,
}

impl TryFrom<ItemInput> for NewItem {
    type Error = ValidationError;

    fn try_from(input: ItemInput) -> Result<Self, Self::Error> {
        let name = RecordName::new(input.name)?;
        let location_id = input.location_id.ok_or(ValidationError::Missing {
            field: "location_id",
        })?;
        Ok(Self { name, location_id })
    }
}
