use std::sync::Arc;
use taskdeck_core::{MemoryKeyValueStore, NewTask, StoreError, TaskStore, TaskUpdate};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn task_store() -> TaskStore<MemoryKeyValueStore> {
    TaskStore::try_new(Arc::new(MemoryKeyValueStore::new())).unwrap()
}

fn new_task(title: &str, due_date: &str, project_id: i64) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        due_date: due_date.to_string(),
        image: None,
        project_id,
    }
}

fn instant(value: &str) -> OffsetDateTime {
    OffsetDateTime::parse(value, &Rfc3339).unwrap()
}

#[test]
fn get_by_project_filters_exact_matches_in_stored_order() {
    let store = task_store();
    store.create(new_task("a", "", 1)).unwrap();
    store.create(new_task("b", "", 2)).unwrap();
    store.create(new_task("c", "", 1)).unwrap();

    let in_one = store.get_by_project(1).unwrap();
    let titles: Vec<&str> = in_one.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c"]);
    assert!(store.get_by_project(3).unwrap().is_empty());
}

#[test]
fn overdue_includes_past_due_and_excludes_empty_and_future() {
    let store = task_store();
    let past = store
        .create(new_task("past", "2020-01-01T00:00:00.000Z", 1))
        .unwrap();
    store.create(new_task("none", "", 1)).unwrap();
    store
        .create(new_task("future", "2099-01-01T00:00:00Z", 1))
        .unwrap();

    let overdue = store.get_overdue_at(instant("2024-06-01T12:00:00Z")).unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, past.id);
}

#[test]
fn overdue_comparison_is_strict_at_the_due_instant() {
    let store = task_store();
    store
        .create(new_task("edge", "2024-06-01T12:00:00Z", 1))
        .unwrap();

    assert!(store
        .get_overdue_at(instant("2024-06-01T12:00:00Z"))
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .get_overdue_at(instant("2024-06-01T12:00:01Z"))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn offset_less_due_dates_are_compared_as_utc() {
    let store = task_store();
    store
        .create(new_task("naive", "2024-06-01T12:00:00", 1))
        .unwrap();

    assert!(store
        .get_overdue_at(instant("2024-06-01T11:00:00Z"))
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .get_overdue_at(instant("2024-06-01T13:00:00Z"))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn malformed_due_date_degrades_to_no_due_date() {
    let store = task_store();
    let task = store
        .create(new_task("broken", "not-a-date", 1))
        .unwrap();

    assert!(task.due_instant().is_none());
    assert!(store
        .get_overdue_at(instant("2099-01-01T00:00:00Z"))
        .unwrap()
        .is_empty());
}

#[test]
fn update_merges_only_supplied_fields() {
    let store = task_store();
    let task = store
        .create(NewTask {
            title: "draft".to_string(),
            description: "first pass".to_string(),
            due_date: "2025-01-01T00:00:00Z".to_string(),
            image: Some("cover.png".to_string()),
            project_id: 1,
        })
        .unwrap();

    assert!(store
        .update(
            task.id,
            &TaskUpdate {
                title: Some("final".to_string()),
                image: Some(None),
                ..TaskUpdate::default()
            },
        )
        .unwrap());

    let loaded = store.get_by_id(task.id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.description, "first pass");
    assert_eq!(loaded.due_date, "2025-01-01T00:00:00Z");
    assert_eq!(loaded.image, None);
    assert_eq!(loaded.project_id, 1);

    assert!(!store.update(999, &TaskUpdate::default()).unwrap());
}

#[test]
fn move_to_project_rewrites_only_the_project_reference() {
    let store = task_store();
    let task = store.create(new_task("move me", "", 1)).unwrap();

    assert!(store.move_to_project(task.id, 9).unwrap());
    let moved = store.get_by_id(task.id).unwrap().unwrap();
    assert_eq!(moved.project_id, 9);
    assert_eq!(moved.title, "move me");

    assert!(!store.move_to_project(999, 9).unwrap());
}

#[test]
fn reorder_persists_the_supplied_order_verbatim() {
    let store = task_store();
    let task_a = store.create(new_task("a", "", 1)).unwrap();
    let task_b = store.create(new_task("b", "", 1)).unwrap();

    store.reorder(vec![task_b.clone(), task_a.clone()]).unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(all, vec![task_b, task_a]);
}

#[test]
fn reorder_rejects_non_permutations_without_persisting() {
    let store = task_store();
    let task_a = store.create(new_task("a", "", 1)).unwrap();
    let task_b = store.create(new_task("b", "", 1)).unwrap();

    let mut stranger = task_a.clone();
    stranger.id = 42;

    let err = store
        .reorder(vec![task_b.clone(), stranger])
        .unwrap_err();
    match err {
        StoreError::ReorderMismatch { missing, unexpected } => {
            assert_eq!(missing, vec![task_a.id]);
            assert_eq!(unexpected, vec![42]);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Partial lists are rejected too; silent data loss is not allowed.
    let err = store.reorder(vec![task_b.clone()]).unwrap_err();
    assert!(matches!(err, StoreError::ReorderMismatch { .. }));

    let all = store.get_all().unwrap();
    assert_eq!(all, vec![task_a, task_b]);
}

#[test]
fn reorder_rejects_duplicated_ids() {
    let store = task_store();
    let task_a = store.create(new_task("a", "", 1)).unwrap();
    store.create(new_task("b", "", 1)).unwrap();

    let err = store
        .reorder(vec![task_a.clone(), task_a])
        .unwrap_err();
    assert!(matches!(err, StoreError::ReorderMismatch { .. }));
}
