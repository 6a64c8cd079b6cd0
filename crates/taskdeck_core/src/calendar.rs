//! Transient calendar read-model over tasks.
//!
//! # Responsibility
//! - Group tasks by the calendar day written in their due date.
//! - Answer day-view queries without re-scanning the task collection.
//!
//! # Invariants
//! - The group key is the literal date portion of the due date string;
//!   time of day and offset are dropped.
//! - Tasks with an empty or unparseable due date appear in no group.
//! - The index is never persisted; callers rebuild it whenever the task
//!   collection may have changed.

use crate::model::task::Task;
use std::collections::BTreeMap;
use time::Date;

/// Date-keyed grouping of tasks for day-view lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarIndex {
    groups: BTreeMap<Date, Vec<Task>>,
}

impl CalendarIndex {
    /// Builds the index from a task snapshot.
    ///
    /// Within each day, tasks keep the order of the supplied snapshot.
    pub fn build(tasks: &[Task]) -> Self {
        let mut groups: BTreeMap<Date, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            if let Some(day) = task.due_day() {
                groups.entry(day).or_default().push(task.clone());
            }
        }
        Self { groups }
    }

    /// Returns whether any task is due on the given day.
    pub fn has_tasks(&self, day: Date) -> bool {
        self.groups.contains_key(&day)
    }

    /// Returns the number of tasks due on the given day.
    pub fn task_count(&self, day: Date) -> usize {
        self.groups.get(&day).map_or(0, Vec::len)
    }

    /// Returns the tasks due on the given day, empty when none.
    pub fn tasks_on(&self, day: Date) -> &[Task] {
        self.groups.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all populated days in ascending order.
    pub fn days(&self) -> Vec<Date> {
        self.groups.keys().copied().collect()
    }

    /// Returns the number of populated days.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether no day has tasks.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
