//! Task domain model and due-date helpers.
//!
//! # Responsibility
//! - Define the leaf work item with optional due date and attachment.
//! - Own due-date parsing semantics shared by overdue and calendar queries.
//!
//! # Invariants
//! - `id` is assigned by `TaskStore` and never changes afterwards.
//! - `due_date` is either an RFC 3339 date-time string or empty; empty
//!   means "no due date".
//! - An unparseable `due_date` degrades to "no due date" instead of
//!   raising an error.

use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Stable identifier for a task.
pub type TaskId = i64;

/// Leaf work item scoped to one project.
///
/// Serialized field names are part of the persisted format and must not
/// change. `image` holds a data URI or URL and is omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "dataLimite")]
    pub due_date: String,
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "projetoId")]
    pub project_id: ProjectId,
}

/// Create payload for a task; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub image: Option<String>,
    pub project_id: ProjectId,
}

/// Partial update for a task. `None` fields are left unchanged.
///
/// `image` is doubly optional so callers can distinguish "leave the
/// attachment alone" (`None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub image: Option<Option<String>>,
    pub project_id: Option<ProjectId>,
}

impl Task {
    /// Merges a partial update into this task in place.
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(due_date) = &update.due_date {
            self.due_date = due_date.clone();
        }
        if let Some(image) = &update.image {
            self.image = image.clone();
        }
        if let Some(project_id) = update.project_id {
            self.project_id = project_id;
        }
    }

    /// Returns the due instant, or `None` when the due date is empty or
    /// unparseable.
    ///
    /// Offset-less date-times and bare dates are accepted and taken as
    /// UTC (a bare date means midnight UTC).
    pub fn due_instant(&self) -> Option<OffsetDateTime> {
        if self.due_date.is_empty() {
            return None;
        }
        if let Ok(instant) = OffsetDateTime::parse(&self.due_date, &Rfc3339) {
            return Some(instant);
        }
        if let Ok(naive) = PrimitiveDateTime::parse(&self.due_date, &Iso8601::DEFAULT) {
            return Some(naive.assume_utc());
        }
        if let Ok(day) = Date::parse(&self.due_date, &Iso8601::DEFAULT) {
            return Some(day.midnight().assume_utc());
        }
        None
    }

    /// Returns the calendar day written in the due date's date portion.
    ///
    /// The key is the literal `YYYY-MM-DD` prefix of the string, not the
    /// day of the due instant in any particular zone; an offset-bearing
    /// due date groups under the day it was written with. Empty and
    /// unparseable date portions yield `None`.
    pub fn due_day(&self) -> Option<Date> {
        let prefix = self
            .due_date
            .split('T')
            .next()
            .filter(|prefix| !prefix.is_empty())?;
        Date::parse(prefix, &Iso8601::DEFAULT).ok()
    }

    /// Returns whether the task is overdue relative to the given instant.
    ///
    /// Tasks with no (or unparseable) due date are never overdue; the
    /// comparison is strict, so a task due exactly at `now` is not overdue.
    pub fn is_overdue_at(&self, now: OffsetDateTime) -> bool {
        match self.due_instant() {
            Some(due) => due < now,
            None => false,
        }
    }
}
