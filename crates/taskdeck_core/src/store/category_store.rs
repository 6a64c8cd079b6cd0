//! Category store.
//!
//! # Responsibility
//! - CRUD over the persisted `"categorias"` collection.
//!
//! # Invariants
//! - Deleting a category never cascades to projects; dangling
//!   `category_id` references are left for callers to resolve.
//! - Every mutation rewrites the full collection under the store key.

use crate::model::category::{Category, CategoryId, CategoryUpdate, NewCategory};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::{load_collection, next_id_after, save_collection, StoreResult, CATEGORY_STORE_KEY};
use log::info;
use std::sync::{Arc, Mutex};

/// CRUD store for categories.
pub struct CategoryStore<S: KeyValueStore> {
    storage: Arc<S>,
    // Guards the read-modify-write sequence of every mutation and owns
    // the id counter.
    next_id: Mutex<CategoryId>,
}

impl<S: KeyValueStore> CategoryStore<S> {
    /// Constructs the store, recomputing the id counter from persisted
    /// data before any `create` can run.
    pub fn try_new(storage: Arc<S>) -> StoreResult<Self> {
        let categories: Vec<Category> = load_collection(storage.as_ref(), CATEGORY_STORE_KEY)?;
        let next_id = next_id_after(categories.iter().map(|category| category.id));
        info!(
            "event=store_init module=category_store status=ok records={} next_id={next_id}",
            categories.len()
        );
        Ok(Self {
            storage,
            next_id: Mutex::new(next_id),
        })
    }

    /// Returns a snapshot of all categories in insertion order.
    pub fn get_all(&self) -> StoreResult<Vec<Category>> {
        load_collection(self.storage.as_ref(), CATEGORY_STORE_KEY)
    }

    /// Returns the category with the given id, or `None`.
    pub fn get_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let categories = self.get_all()?;
        Ok(categories.into_iter().find(|category| category.id == id))
    }

    /// Creates a category with a freshly assigned id and returns it.
    ///
    /// Every call produces a new record, even for an identical name.
    pub fn create(&self, new: NewCategory) -> StoreResult<Category> {
        let mut next_id = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut categories = self.get_all()?;
        let category = Category {
            id: *next_id,
            name: new.name,
        };
        *next_id += 1;
        categories.push(category.clone());
        save_collection(self.storage.as_ref(), CATEGORY_STORE_KEY, &categories)?;
        info!(
            "event=category_create module=category_store status=ok id={}",
            category.id
        );
        Ok(category)
    }

    /// Merges the partial update into the stored category.
    ///
    /// Returns `Ok(false)` without persisting anything when the id is
    /// unknown.
    pub fn update(&self, id: CategoryId, update: &CategoryUpdate) -> StoreResult<bool> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut categories = self.get_all()?;
        let Some(category) = categories.iter_mut().find(|category| category.id == id) else {
            return Ok(false);
        };
        category.apply(update);
        save_collection(self.storage.as_ref(), CATEGORY_STORE_KEY, &categories)?;
        Ok(true)
    }

    /// Removes the category with the given id.
    ///
    /// Returns `Ok(false)` when the id is unknown. Does not cascade.
    pub fn delete(&self, id: CategoryId) -> StoreResult<bool> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut categories = self.get_all()?;
        let before = categories.len();
        categories.retain(|category| category.id != id);
        if categories.len() == before {
            return Ok(false);
        }
        save_collection(self.storage.as_ref(), CATEGORY_STORE_KEY, &categories)?;
        info!("event=category_delete module=category_store status=ok id={id}");
        Ok(true)
    }
}
