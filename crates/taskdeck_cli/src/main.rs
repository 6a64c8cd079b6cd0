//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use std::sync::Arc;
use taskdeck_core::{
    CategoryStore, MemoryKeyValueStore, NewCategory, NewProject, NewTask, ProjectStore, TaskStore,
};

fn main() -> ExitCode {
    println!("taskdeck_core ping={}", taskdeck_core::ping());
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    match smoke_roundtrip() {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("taskdeck_core smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs a create/list round-trip against in-memory storage.
fn smoke_roundtrip() -> Result<String, taskdeck_core::StoreError> {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let tasks = Arc::new(TaskStore::try_new(Arc::clone(&storage))?);
    let projects = ProjectStore::try_new(Arc::clone(&storage), Arc::clone(&tasks))?;
    let categories = CategoryStore::try_new(Arc::clone(&storage))?;

    let category = categories.create(NewCategory {
        name: "inbox".to_string(),
    })?;
    let project = projects.create(NewProject {
        name: "smoke".to_string(),
        category_id: category.id,
    })?;
    tasks.create(NewTask {
        title: "probe".to_string(),
        description: String::new(),
        due_date: String::new(),
        image: None,
        project_id: project.id,
    })?;

    Ok(format!(
        "taskdeck_core smoke categories={} projects={} tasks={}",
        categories.get_all()?.len(),
        projects.get_all()?.len(),
        tasks.get_all()?.len()
    ))
}
