//! Project domain model.
//!
//! # Responsibility
//! - Define the mid-level entity grouping tasks under one category.
//!
//! # Invariants
//! - `id` is assigned by `ProjectStore` and never changes afterwards.
//! - `category_id` is a non-owning reference; no foreign-key check is
//!   performed when writing.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a project.
pub type ProjectId = i64;

/// Mid-level entity grouping tasks, scoped to one category.
///
/// Serialized field names are part of the persisted format and must not
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoriaId")]
    pub category_id: CategoryId,
}

/// Create payload for a project; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub category_id: CategoryId,
}

/// Partial update for a project. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl Project {
    /// Merges a partial update into this project in place.
    pub fn apply(&mut self, update: &ProjectUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
    }
}
