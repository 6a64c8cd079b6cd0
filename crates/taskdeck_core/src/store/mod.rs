//! Entity stores over durable key-value collections.
//!
//! # Responsibility
//! - Provide CRUD and derived-query APIs for categories, projects and
//!   tasks.
//! - Own id assignment and read-modify-write serialization per store.
//!
//! # Invariants
//! - Each store owns exactly one key; collections are persisted whole on
//!   every mutation.
//! - Ids are positive, strictly increasing per entity type and never
//!   reused within a store's lifetime; construction recomputes the
//!   counter as `max(id) + 1` from persisted data.
//! - Mutations are serialized behind an internal mutex so concurrent
//!   callers cannot lose updates.
//! - Store keys are part of the persisted format and must not change.

use crate::model::task::TaskId;
use crate::storage::{KeyValueStore, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_store;
pub mod project_store;
pub mod task_store;

pub const CATEGORY_STORE_KEY: &str = "categorias";
pub const PROJECT_STORE_KEY: &str = "projetos";
pub const TASK_STORE_KEY: &str = "tarefas";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from entity store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying key-value storage failure.
    Storage(StorageError),
    /// Persisted payload cannot be decoded, or a collection cannot be
    /// encoded for persistence.
    Encoding(serde_json::Error),
    /// A reorder was rejected because the supplied sequence is not a
    /// permutation of the stored task ids.
    ReorderMismatch {
        missing: Vec<TaskId>,
        unexpected: Vec<TaskId>,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "payload encoding failed: {err}"),
            Self::ReorderMismatch { missing, unexpected } => write!(
                f,
                "reorder is not a permutation of stored tasks: missing={missing:?} unexpected={unexpected:?}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::ReorderMismatch { .. } => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Loads the full collection stored under `key`; absent means empty.
pub(crate) fn load_collection<T, S>(storage: &S, key: &str) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match storage.get(key)? {
        Some(payload) => Ok(serde_json::from_str(&payload)?),
        None => Ok(Vec::new()),
    }
}

/// Persists the full collection under `key`, replacing the prior payload.
pub(crate) fn save_collection<T, S>(storage: &S, key: &str, records: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore,
{
    let payload = serde_json::to_string(records)?;
    storage.set(key, &payload)?;
    Ok(())
}

/// Computes the next id for a freshly constructed store.
pub(crate) fn next_id_after(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}
