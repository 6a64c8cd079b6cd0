//! Domain model for the category/project/task hierarchy.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep persisted wire names stable across releases.
//!
//! # Invariants
//! - Every entity is identified by a positive integer id unique within its
//!   entity type.
//! - A task references exactly one project; a project references exactly
//!   one category. References are non-owning and not checked at write time.

pub mod category;
pub mod project;
pub mod task;
