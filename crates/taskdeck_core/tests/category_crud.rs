use std::sync::Arc;
use taskdeck_core::{
    CategoryStore, CategoryUpdate, MemoryKeyValueStore, NewCategory, NewProject, NewTask,
    ProjectStore, TaskStore,
};

fn category_store() -> CategoryStore<MemoryKeyValueStore> {
    let storage = Arc::new(MemoryKeyValueStore::new());
    CategoryStore::try_new(storage).unwrap()
}

#[test]
fn create_assigns_strictly_increasing_ids_from_one() {
    let store = category_store();

    let first = store
        .create(NewCategory {
            name: "Work".to_string(),
        })
        .unwrap();
    let second = store
        .create(NewCategory {
            name: "Home".to_string(),
        })
        .unwrap();
    let third = store
        .create(NewCategory {
            name: "Work".to_string(),
        })
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    // Identical names still get a fresh id; create never deduplicates.
    assert_eq!(third.id, 3);
}

#[test]
fn get_all_is_empty_before_first_create_and_keeps_insertion_order() {
    let store = category_store();
    assert!(store.get_all().unwrap().is_empty());

    store
        .create(NewCategory {
            name: "b".to_string(),
        })
        .unwrap();
    store
        .create(NewCategory {
            name: "a".to_string(),
        })
        .unwrap();

    let names: Vec<String> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
}

#[test]
fn get_by_id_returns_match_or_none() {
    let store = category_store();
    let created = store
        .create(NewCategory {
            name: "Work".to_string(),
        })
        .unwrap();

    let found = store.get_by_id(created.id).unwrap().unwrap();
    assert_eq!(found, created);
    assert!(store.get_by_id(999).unwrap().is_none());
}

#[test]
fn update_merges_fields_and_rejects_unknown_id() {
    let store = category_store();
    let created = store
        .create(NewCategory {
            name: "Work".to_string(),
        })
        .unwrap();

    let updated = store
        .update(
            created.id,
            &CategoryUpdate {
                name: Some("Office".to_string()),
            },
        )
        .unwrap();
    assert!(updated);
    assert_eq!(store.get_by_id(created.id).unwrap().unwrap().name, "Office");

    // Empty partial update leaves the record unchanged.
    assert!(store.update(created.id, &CategoryUpdate::default()).unwrap());
    assert_eq!(store.get_by_id(created.id).unwrap().unwrap().name, "Office");

    let missing = store
        .update(
            999,
            &CategoryUpdate {
                name: Some("ghost".to_string()),
            },
        )
        .unwrap();
    assert!(!missing);
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn delete_removes_entry_and_rejects_unknown_id() {
    let store = category_store();
    let created = store
        .create(NewCategory {
            name: "Work".to_string(),
        })
        .unwrap();

    assert!(store.delete(created.id).unwrap());
    assert!(store.get_all().unwrap().is_empty());
    assert!(!store.delete(created.id).unwrap());
}

#[test]
fn deleted_ids_are_not_reused_within_store_lifetime() {
    let store = category_store();
    let first = store
        .create(NewCategory {
            name: "a".to_string(),
        })
        .unwrap();
    store.delete(first.id).unwrap();

    let second = store
        .create(NewCategory {
            name: "b".to_string(),
        })
        .unwrap();
    assert_eq!(second.id, 2);
}

#[test]
fn category_delete_does_not_cascade_to_projects() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let tasks = Arc::new(TaskStore::try_new(Arc::clone(&storage)).unwrap());
    let projects = ProjectStore::try_new(Arc::clone(&storage), Arc::clone(&tasks)).unwrap();
    let categories = CategoryStore::try_new(Arc::clone(&storage)).unwrap();

    let category = categories
        .create(NewCategory {
            name: "Work".to_string(),
        })
        .unwrap();
    let project = projects
        .create(NewProject {
            name: "Site".to_string(),
            category_id: category.id,
        })
        .unwrap();
    tasks
        .create(NewTask {
            title: "Design".to_string(),
            description: String::new(),
            due_date: String::new(),
            image: None,
            project_id: project.id,
        })
        .unwrap();

    assert!(categories.delete(category.id).unwrap());

    // Projects and tasks survive with a now-dangling category reference.
    let orphaned = projects.get_by_id(project.id).unwrap().unwrap();
    assert_eq!(orphaned.category_id, category.id);
    assert_eq!(tasks.get_all().unwrap().len(), 1);
}
