//! Task store and date-derived queries.
//!
//! # Responsibility
//! - CRUD over the persisted `"tarefas"` collection.
//! - Derived queries: by-project filter, overdue scan, bulk reorder.
//!
//! # Invariants
//! - Overdue results are a pure function of wall-clock time at call time;
//!   nothing is cached between calls.
//! - `reorder` only accepts a set-preserving permutation of the stored
//!   task ids and persists the supplied order verbatim.
//! - Every mutation rewrites the full collection under the store key.

use crate::model::project::ProjectId;
use crate::model::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::{
    load_collection, next_id_after, save_collection, StoreError, StoreResult, TASK_STORE_KEY,
};
use log::info;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;

/// CRUD store for tasks.
pub struct TaskStore<S: KeyValueStore> {
    storage: Arc<S>,
    // Guards the read-modify-write sequence of every mutation and owns
    // the id counter.
    next_id: Mutex<TaskId>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Constructs the store, recomputing the id counter from persisted
    /// data before any `create` can run.
    pub fn try_new(storage: Arc<S>) -> StoreResult<Self> {
        let tasks: Vec<Task> = load_collection(storage.as_ref(), TASK_STORE_KEY)?;
        let next_id = next_id_after(tasks.iter().map(|task| task.id));
        info!(
            "event=store_init module=task_store status=ok records={} next_id={next_id}",
            tasks.len()
        );
        Ok(Self {
            storage,
            next_id: Mutex::new(next_id),
        })
    }

    /// Returns a snapshot of all tasks in persisted order.
    pub fn get_all(&self) -> StoreResult<Vec<Task>> {
        load_collection(self.storage.as_ref(), TASK_STORE_KEY)
    }

    /// Returns the task with the given id, or `None`.
    pub fn get_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let tasks = self.get_all()?;
        Ok(tasks.into_iter().find(|task| task.id == id))
    }

    /// Returns all tasks belonging to the given project, in stored order.
    pub fn get_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Task>> {
        let tasks = self.get_all()?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.project_id == project_id)
            .collect())
    }

    /// Returns all tasks whose due instant is strictly before now (UTC).
    ///
    /// Tasks with an empty or unparseable due date are never overdue.
    /// Recomputed on every call; results straddling the due instant vary
    /// between calls by design.
    pub fn get_overdue(&self) -> StoreResult<Vec<Task>> {
        self.get_overdue_at(OffsetDateTime::now_utc())
    }

    /// Overdue scan against an explicit reference instant.
    pub fn get_overdue_at(&self, now: OffsetDateTime) -> StoreResult<Vec<Task>> {
        let tasks = self.get_all()?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_overdue_at(now))
            .collect())
    }

    /// Creates a task with a freshly assigned id and returns it.
    ///
    /// Every call produces a new record, even for identical content.
    pub fn create(&self, new: NewTask) -> StoreResult<Task> {
        let mut next_id = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut tasks = self.get_all()?;
        let task = Task {
            id: *next_id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            image: new.image,
            project_id: new.project_id,
        };
        *next_id += 1;
        tasks.push(task.clone());
        save_collection(self.storage.as_ref(), TASK_STORE_KEY, &tasks)?;
        info!(
            "event=task_create module=task_store status=ok id={} project_id={}",
            task.id, task.project_id
        );
        Ok(task)
    }

    /// Merges the partial update into the stored task.
    ///
    /// Returns `Ok(false)` without persisting anything when the id is
    /// unknown.
    pub fn update(&self, id: TaskId, update: &TaskUpdate) -> StoreResult<bool> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut tasks = self.get_all()?;
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        task.apply(update);
        save_collection(self.storage.as_ref(), TASK_STORE_KEY, &tasks)?;
        Ok(true)
    }

    /// Removes the task with the given id.
    ///
    /// Returns `Ok(false)` when the id is unknown.
    pub fn delete(&self, id: TaskId) -> StoreResult<bool> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut tasks = self.get_all()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        save_collection(self.storage.as_ref(), TASK_STORE_KEY, &tasks)?;
        info!("event=task_delete module=task_store status=ok id={id}");
        Ok(true)
    }

    /// Reassigns the task to another project.
    ///
    /// Returns `Ok(false)` when the task id is unknown.
    pub fn move_to_project(&self, task_id: TaskId, new_project_id: ProjectId) -> StoreResult<bool> {
        self.update(
            task_id,
            &TaskUpdate {
                project_id: Some(new_project_id),
                ..TaskUpdate::default()
            },
        )
    }

    /// Replaces the persisted collection with the supplied order.
    ///
    /// The supplied sequence must contain exactly the stored task ids;
    /// otherwise `StoreError::ReorderMismatch` is returned and nothing is
    /// persisted. On success later `get_all` calls return the supplied
    /// order verbatim.
    pub fn reorder(&self, tasks: Vec<Task>) -> StoreResult<()> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let stored: Vec<Task> = load_collection(self.storage.as_ref(), TASK_STORE_KEY)?;

        let stored_ids: BTreeSet<TaskId> = stored.iter().map(|task| task.id).collect();
        let supplied_ids: BTreeSet<TaskId> = tasks.iter().map(|task| task.id).collect();
        if stored_ids != supplied_ids || tasks.len() != stored.len() {
            let missing = stored_ids.difference(&supplied_ids).copied().collect();
            let unexpected = supplied_ids.difference(&stored_ids).copied().collect();
            return Err(StoreError::ReorderMismatch { missing, unexpected });
        }

        save_collection(self.storage.as_ref(), TASK_STORE_KEY, &tasks)?;
        info!(
            "event=task_reorder module=task_store status=ok records={}",
            tasks.len()
        );
        Ok(())
    }
}
