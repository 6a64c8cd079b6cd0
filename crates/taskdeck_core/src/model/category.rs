//! Category domain model.
//!
//! # Responsibility
//! - Define the top-level grouping entity for projects.
//!
//! # Invariants
//! - `id` is assigned by `CategoryStore` and never changes afterwards.
//! - Deleting a category does not cascade to its projects; dangling
//!   `category_id` references are visible to callers.

use serde::{Deserialize, Serialize};

/// Stable identifier for a category.
pub type CategoryId = i64;

/// Top-level grouping entity for projects.
///
/// Serialized field names are part of the persisted format and must not
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Create payload for a category; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Partial update for a category. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
}

impl Category {
    /// Merges a partial update into this category in place.
    pub fn apply(&mut self, update: &CategoryUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
    }
}
