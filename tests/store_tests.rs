mod common;
use common::{recorded_store, setup_test_db};
use rtodo::broadcast::{BroadcastChannel, BroadcastHub};
use rtodo::core::TodoStore;
use rtodo::db::pool::DbPool;
use rtodo::errors::AppError;
use rtodo::models::{ChangeKind, ListOptions, TodoDraft};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

#[test]
fn test_add_assigns_unique_ids() {
    let (store, _bus) = recorded_store();

    let mut ids = HashSet::new();
    for i in 0..50 {
        let item = store.add(TodoDraft::new(format!("task {i}"))).unwrap();
        assert!(ids.insert(item.id), "duplicate id generated");
    }

    assert_eq!(store.list(ListOptions::default()).unwrap().len(), 50);
}

#[test]
fn test_add_round_trip_preserves_draft() {
    let (store, _bus) = recorded_store();

    let mut draft = TodoDraft::new("Write report").with_description("quarterly numbers");
    draft.color = Some("#ffcc00".into());
    draft.complete_by = Some(1_900_000_000_000);

    let item = store.add(draft).unwrap();
    assert_eq!(item.created, item.updated);
    assert!(!item.completed);

    let listed = store.list(ListOptions::pending()).unwrap();
    assert_eq!(listed, vec![item.clone()]);

    let got = store.get(&item.id).unwrap().expect("record persisted");
    assert_eq!(got.title, "Write report");
    assert_eq!(got.description.as_deref(), Some("quarterly numbers"));
    assert_eq!(got.color.as_deref(), Some("#ffcc00"));
    assert_eq!(got.complete_by, Some(1_900_000_000_000));
}

#[test]
fn test_add_with_invalid_flag_is_pending() {
    let (store, _bus) = recorded_store();

    let item = store.add(TodoDraft::new("odd").with_completed(42)).unwrap();
    assert!(!item.completed);

    let done = store.add(TodoDraft::new("done").with_completed(1)).unwrap();
    assert!(done.completed);
    assert_eq!(store.list(ListOptions::completed()).unwrap(), vec![done]);
}

#[test]
fn test_partitions_cover_all_records_without_overlap() {
    let (store, _bus) = recorded_store();

    let mut all = Vec::new();
    for i in 0..6 {
        let item = store.add(TodoDraft::new(format!("item {i}"))).unwrap();
        if i % 2 == 0 {
            store.mark_complete(&item.id).unwrap();
        }
        all.push(item.id);
    }

    let pending: HashSet<String> = store
        .list(ListOptions::pending())
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    let completed: HashSet<String> = store
        .list(ListOptions::completed())
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();

    assert_eq!(pending.len(), 3);
    assert_eq!(completed.len(), 3);
    assert!(pending.is_disjoint(&completed));

    let union: HashSet<String> = pending.union(&completed).cloned().collect();
    let expected: HashSet<String> = all.into_iter().collect();
    assert_eq!(union, expected);
    assert_eq!(store.list_all().unwrap().len(), 6);
}

#[test]
fn test_update_keeps_identity_and_advances_updated() {
    let (store, _bus) = recorded_store();

    let item = store.add(TodoDraft::new("draft title")).unwrap();
    sleep(Duration::from_millis(3));

    let mut edit = item.clone();
    edit.title = "final title".into();
    edit.description = Some("now with text".into());
    let saved = store.update(edit).unwrap();

    assert_eq!(saved.id, item.id);
    assert_eq!(saved.created, item.created);
    assert!(saved.updated > item.updated);

    let stored = store.get(&item.id).unwrap().unwrap();
    assert_eq!(stored, saved);
}

#[test]
fn test_update_with_stale_copy_never_moves_updated_back() {
    let (store, _bus) = recorded_store();

    let item = store.add(TodoDraft::new("a")).unwrap();
    let first = store.update(item.clone()).unwrap();

    let mut stale = item.clone();
    stale.updated = 0;
    let second = store.update(stale).unwrap();

    assert!(second.updated >= first.updated);
}

#[test]
fn test_update_cannot_rewrite_created() {
    let (store, _bus) = recorded_store();

    let item = store.add(TodoDraft::new("created once")).unwrap();

    let mut copy = item.clone();
    copy.created = 42;
    let saved = store.update(copy).unwrap();

    assert_eq!(saved.created, item.created);
    assert_eq!(store.get(&item.id).unwrap().unwrap().created, item.created);
}

#[test]
fn test_update_ignores_future_updated_from_caller() {
    let (store, _bus) = recorded_store();

    let item = store.add(TodoDraft::new("clock skew")).unwrap();

    let mut copy = item.clone();
    copy.updated = i64::MAX - 5;
    let saved = store.update(copy).unwrap();

    let now = rtodo::utils::time::now_millis();
    assert!(saved.updated >= item.updated);
    assert!(saved.updated <= now, "updated pinned to {}", saved.updated);

    let done = store.mark_complete(&item.id).unwrap();
    assert!(done.updated <= rtodo::utils::time::now_millis());
}

#[test]
fn test_complete_then_incomplete_restores_record() {
    let (store, _bus) = recorded_store();

    let item = store.add(TodoDraft::new("toggle me")).unwrap();

    let done = store.mark_complete(&item.id).unwrap();
    assert!(done.completed);
    assert!(done.updated >= item.updated);

    let back = store.mark_incomplete(&item.id).unwrap();
    assert!(back.updated >= done.updated);

    let mut expected = item.clone();
    expected.updated = back.updated;
    assert_eq!(back, expected);
}

#[test]
fn test_delete_is_final_and_idempotent() {
    let (store, bus) = recorded_store();

    let item = store.add(TodoDraft::new("remove me")).unwrap();
    store.mark_complete(&item.id).unwrap();

    store.delete(&item.id).unwrap();
    store.delete(&item.id).unwrap();

    assert!(store.get(&item.id).unwrap().is_none());
    for opts in [ListOptions::pending(), ListOptions::completed()] {
        assert!(store.list(opts).unwrap().iter().all(|i| i.id != item.id));
    }

    let kinds: Vec<ChangeKind> = bus.events().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ChangeKind::Create,
            ChangeKind::Complete,
            ChangeKind::Delete,
            ChangeKind::Delete
        ]
    );
}

#[test]
fn test_every_mutation_posts_one_matching_event() {
    let (store, bus) = recorded_store();

    let item = store.add(TodoDraft::new("event source")).unwrap();
    let mut edit = item.clone();
    edit.title = "edited".into();
    let updated = store.update(edit).unwrap();
    let done = store.mark_complete(&item.id).unwrap();
    let undone = store.mark_incomplete(&item.id).unwrap();
    store.delete(&item.id).unwrap();

    // reads do not publish
    store.list(ListOptions::default()).unwrap();

    let events = bus.events();
    assert_eq!(events.len(), 5);
    assert!(bus.channels().iter().all(|c| c == "todo-broadcast"));

    assert_eq!(events[0].kind(), ChangeKind::Create);
    assert_eq!(events[0].item(), Some(&item));

    assert_eq!(events[1].kind(), ChangeKind::Update);
    assert_eq!(events[1].item(), Some(&updated));

    assert_eq!(events[2].kind(), ChangeKind::Complete);
    assert_eq!(events[2].item(), Some(&done));

    assert_eq!(events[3].kind(), ChangeKind::Incomplete);
    assert_eq!(events[3].item(), Some(&undone));

    assert_eq!(events[4].kind(), ChangeKind::Delete);
    assert_eq!(events[4].id(), item.id);
    assert!(events[4].item().is_none());
    assert!(!bus.messages()[4].contains("item"));
}

#[test]
fn test_buy_milk_scenario() {
    let (store, _bus) = recorded_store();

    let r = store.add(TodoDraft::new("Buy milk").with_completed(0)).unwrap();
    assert!(!r.id.is_empty());
    assert!(!r.completed);
    assert!(store
        .list(ListOptions { completed: false })
        .unwrap()
        .iter()
        .any(|i| i.id == r.id));

    store.mark_complete(&r.id).unwrap();

    let completed = store.list(ListOptions { completed: true }).unwrap();
    let found = completed.iter().find(|i| i.id == r.id).expect("moved to completed");
    assert!(found.completed);
    assert!(store
        .list(ListOptions { completed: false })
        .unwrap()
        .iter()
        .all(|i| i.id != r.id));
}

#[test]
fn test_mark_complete_unknown_id_is_not_found_and_silent() {
    let (store, bus) = recorded_store();

    let err = store.mark_complete("nonexistent-id").unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref id) if id == "nonexistent-id"));

    let err = store.mark_incomplete("nonexistent-id").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(bus.messages().is_empty());
}

#[test]
fn test_database_is_opened_lazily_and_persists() {
    let db_path = setup_test_db("store_lazy_open");
    let bus = Arc::new(BroadcastHub::new());

    let store = TodoStore::new(
        DbPool::new(&db_path),
        BroadcastChannel::store_channel(bus.clone()),
    );
    assert!(!store.pool().is_open());
    assert!(!std::path::Path::new(&db_path).exists());

    let item = store.add(TodoDraft::new("survives restart")).unwrap();
    assert!(store.pool().is_open());
    drop(store);

    let reopened = TodoStore::new(
        DbPool::new(&db_path),
        BroadcastChannel::store_channel(bus),
    );
    assert_eq!(reopened.get(&item.id).unwrap(), Some(item));
    assert!(!reopened.pool().created_schema());
}

#[test]
fn test_first_open_reports_schema_creation_instead_of_printing() {
    let db_path = setup_test_db("store_schema_flag");
    let store = TodoStore::new(
        DbPool::new(&db_path),
        BroadcastChannel::store_channel(Arc::new(BroadcastHub::new())),
    );

    assert!(!store.pool().created_schema());
    store.add(TodoDraft::new("first write")).unwrap();
    assert!(store.pool().created_schema());
}

#[test]
fn test_list_is_served_by_completed_index() {
    let (store, _bus) = recorded_store();
    store.add(TodoDraft::new("warm up")).unwrap();

    let plan: Vec<String> = store
        .pool()
        .with_conn(|conn| {
            let mut stmt = conn.prepare(
                "EXPLAIN QUERY PLAN SELECT id FROM items INDEXED BY idx_items_completed WHERE completed = 0",
            )?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(3))?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
        .unwrap();

    assert!(plan.iter().any(|line| line.contains("idx_items_completed")));
}
