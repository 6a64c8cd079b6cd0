//! Project store with cascading task delete.
//!
//! # Responsibility
//! - CRUD over the persisted `"projetos"` collection.
//! - Cascade task removal when a project is deleted.
//!
//! # Invariants
//! - The cascade deletes tasks one by one through `TaskStore::delete`,
//!   sequentially and best-effort: a failing task delete is logged and
//!   the remaining tasks and the project removal still proceed.
//! - Every mutation rewrites the full collection under the store key.

use crate::model::category::CategoryId;
use crate::model::project::{NewProject, Project, ProjectId, ProjectUpdate};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::task_store::TaskStore;
use crate::store::{load_collection, next_id_after, save_collection, StoreResult, PROJECT_STORE_KEY};
use log::{info, warn};
use std::sync::{Arc, Mutex};

/// CRUD store for projects.
///
/// Holds the task store so `delete` can cascade.
pub struct ProjectStore<S: KeyValueStore> {
    storage: Arc<S>,
    tasks: Arc<TaskStore<S>>,
    // Guards the read-modify-write sequence of every mutation and owns
    // the id counter.
    next_id: Mutex<ProjectId>,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// Constructs the store, recomputing the id counter from persisted
    /// data before any `create` can run.
    ///
    /// The task store must be constructed first; taking it here makes the
    /// initialization order explicit at the composition root.
    pub fn try_new(storage: Arc<S>, tasks: Arc<TaskStore<S>>) -> StoreResult<Self> {
        let projects: Vec<Project> = load_collection(storage.as_ref(), PROJECT_STORE_KEY)?;
        let next_id = next_id_after(projects.iter().map(|project| project.id));
        info!(
            "event=store_init module=project_store status=ok records={} next_id={next_id}",
            projects.len()
        );
        Ok(Self {
            storage,
            tasks,
            next_id: Mutex::new(next_id),
        })
    }

    /// Returns a snapshot of all projects in insertion order.
    pub fn get_all(&self) -> StoreResult<Vec<Project>> {
        load_collection(self.storage.as_ref(), PROJECT_STORE_KEY)
    }

    /// Returns the project with the given id, or `None`.
    pub fn get_by_id(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        let projects = self.get_all()?;
        Ok(projects.into_iter().find(|project| project.id == id))
    }

    /// Returns all projects belonging to the given category.
    pub fn get_by_category(&self, category_id: CategoryId) -> StoreResult<Vec<Project>> {
        let projects = self.get_all()?;
        Ok(projects
            .into_iter()
            .filter(|project| project.category_id == category_id)
            .collect())
    }

    /// Creates a project with a freshly assigned id and returns it.
    ///
    /// Every call produces a new record, even for identical content. The
    /// referenced category is not checked to exist.
    pub fn create(&self, new: NewProject) -> StoreResult<Project> {
        let mut next_id = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut projects = self.get_all()?;
        let project = Project {
            id: *next_id,
            name: new.name,
            category_id: new.category_id,
        };
        *next_id += 1;
        projects.push(project.clone());
        save_collection(self.storage.as_ref(), PROJECT_STORE_KEY, &projects)?;
        info!(
            "event=project_create module=project_store status=ok id={} category_id={}",
            project.id, project.category_id
        );
        Ok(project)
    }

    /// Merges the partial update into the stored project.
    ///
    /// Returns `Ok(false)` without persisting anything when the id is
    /// unknown.
    pub fn update(&self, id: ProjectId, update: &ProjectUpdate) -> StoreResult<bool> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut projects = self.get_all()?;
        let Some(project) = projects.iter_mut().find(|project| project.id == id) else {
            return Ok(false);
        };
        project.apply(update);
        save_collection(self.storage.as_ref(), PROJECT_STORE_KEY, &projects)?;
        Ok(true)
    }

    /// Removes the project and all of its tasks.
    ///
    /// Returns `Ok(false)` when the id is unknown; no tasks are touched in
    /// that case. Task deletes run first, sequentially; failures are
    /// logged and do not stop the cascade or the project removal.
    pub fn delete(&self, id: ProjectId) -> StoreResult<bool> {
        let _guard = self.next_id.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut projects = self.get_all()?;
        if !projects.iter().any(|project| project.id == id) {
            return Ok(false);
        }

        let tasks = self.tasks.get_by_project(id)?;
        let cascade_total = tasks.len();
        for task in tasks {
            match self.tasks.delete(task.id) {
                Ok(_) => {}
                Err(err) => warn!(
                    "event=project_cascade module=project_store status=error project_id={id} task_id={} error={err}",
                    task.id
                ),
            }
        }

        projects.retain(|project| project.id != id);
        save_collection(self.storage.as_ref(), PROJECT_STORE_KEY, &projects)?;
        info!(
            "event=project_delete module=project_store status=ok id={id} cascaded_tasks={cascade_total}"
        );
        Ok(true)
    }
}
