//! Room domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{next_update, now};

/// A bookable room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Room {
    /// Unique room identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "Suite 1")]
    pub name: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Room {
    /// Create a room with a fresh id; `created` and `updated` are equal.
    pub fn new(name: String) -> Self {
        let created = now();
        Self {
            id: Uuid::new_v4(),
            name,
            created,
            updated: created,
        }
    }

    /// Change the room's name
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated = next_update(self.updated);
    }
}
