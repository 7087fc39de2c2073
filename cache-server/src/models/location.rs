//! Location record and payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecordName, ValidationError};

/// A place in the location hierarchy.
///
/// `parent_id` is `null` for roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /locations` and `PUT /locations/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Validated location fields, as written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub name: RecordName,
    pub parent_id: Option<i64>,
}

impl TryFrom<LocationInput> for NewLocation {
    type Error = ValidationError;

    fn try_from(input: LocationInput) -> Result<Self, Self::Error> {
        Ok(Self {
            name: RecordName::new(input.name)?,
            parent_id: input.parent_id,
        })
    }
}
