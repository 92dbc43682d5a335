//! Behavioural tests for the in-memory task store.

use super::support::{SteppedClock, clock_start};
use crate::task::{
    adapters::{InMemoryTaskStore, TaskCounters},
    domain::TaskId,
    ports::{TaskMetrics, TaskStore, TaskStoreError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

struct Harness {
    store: Arc<InMemoryTaskStore<DefaultClock>>,
    counters: Arc<TaskCounters>,
}

#[fixture]
fn harness() -> Harness {
    let counters = Arc::new(TaskCounters::new());
    let metrics: Arc<dyn TaskMetrics> = Arc::<TaskCounters>::clone(&counters);
    let store = Arc::new(InMemoryTaskStore::new(metrics, Arc::new(DefaultClock)));
    Harness { store, counters }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_sequential_ids_and_matching_timestamps(harness: Harness) {
    let first = harness
        .store
        .create_task("buy milk")
        .await
        .expect("create should succeed");
    let second = harness
        .store
        .create_task("walk dog")
        .await
        .expect("create should succeed");

    assert_eq!(first.id().as_str(), "1");
    assert_eq!(second.id().as_str(), "2");
    assert_eq!(first.created_at(), first.updated_at());

    let fetched = harness
        .store
        .get_task(first.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, first);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_are_never_reused_after_deletion(harness: Harness) {
    let first = harness
        .store
        .create_task("buy milk")
        .await
        .expect("create should succeed");
    harness
        .store
        .delete_task(first.id())
        .await
        .expect("delete should succeed");

    let second = harness
        .store
        .create_task("walk dog")
        .await
        .expect("create should succeed");
    assert_eq!(second.id().as_str(), "2");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_renames_and_refreshes_updated_at() {
    let counters = Arc::new(TaskCounters::new());
    let clock = Arc::new(SteppedClock::starting_at(clock_start()));
    let metrics: Arc<dyn TaskMetrics> = Arc::<TaskCounters>::clone(&counters);
    let store = InMemoryTaskStore::new(metrics, clock);

    let created = store
        .create_task("buy milk")
        .await
        .expect("create should succeed");
    let updated = store
        .update_task(created.id(), "buy oat milk")
        .await
        .expect("update should succeed");

    assert_eq!(updated.name(), "buy oat milk");
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() > created.updated_at());

    let fetched = store
        .get_task(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, updated);
}

#[rstest]
#[case::absent_numeric("99")]
#[case::non_numeric("nope")]
#[case::empty("")]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_ids_are_not_found(harness: Harness, #[case] raw_id: &str) {
    let id = TaskId::new(raw_id);

    assert!(matches!(
        harness.store.get_task(&id).await,
        Err(TaskStoreError::NotFound(_))
    ));
    assert!(matches!(
        harness.store.update_task(&id, "renamed").await,
        Err(TaskStoreError::NotFound(_))
    ));
    assert!(matches!(
        harness.store.delete_task(&id).await,
        Err(TaskStoreError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_tasks_are_gone_for_every_operation(harness: Harness) {
    let task = harness
        .store
        .create_task("buy milk")
        .await
        .expect("create should succeed");
    harness
        .store
        .delete_task(task.id())
        .await
        .expect("delete should succeed");

    assert!(matches!(
        harness.store.get_task(task.id()).await,
        Err(TaskStoreError::NotFound(_))
    ));
    assert!(matches!(
        harness.store.update_task(task.id(), "renamed").await,
        Err(TaskStoreError::NotFound(_))
    ));
    assert!(matches!(
        harness.store.delete_task(task.id()).await,
        Err(TaskStoreError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_reverse_creation_order(harness: Harness) {
    for name in ["first", "second", "third"] {
        harness
            .store
            .create_task(name)
            .await
            .expect("create should succeed");
    }
    harness
        .store
        .delete_task(&TaskId::new("2"))
        .await
        .expect("delete should succeed");

    let tasks = harness
        .store
        .list_tasks()
        .await
        .expect("list should succeed");
    let names: Vec<_> = tasks.iter().map(|task| task.name()).collect();

    assert_eq!(names, vec!["third", "first"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listed_tasks_are_snapshots_not_aliases(harness: Harness) {
    let created = harness
        .store
        .create_task("buy milk")
        .await
        .expect("create should succeed");

    let mut listed = harness
        .store
        .list_tasks()
        .await
        .expect("list should succeed");
    if let Some(task) = listed.first_mut() {
        task.rename("mutated copy", &DefaultClock);
    }

    let fetched = harness
        .store
        .get_task(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched.name(), "buy milk");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_yield_distinct_ids(harness: Harness) {
    const WORKERS: usize = 32;

    let mut handles = Vec::with_capacity(WORKERS);
    for worker in 0..WORKERS {
        let store = Arc::clone(&harness.store);
        handles.push(tokio::spawn(async move {
            store.create_task(&format!("task-{worker}")).await
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let task = handle
            .await
            .expect("worker should not panic")
            .expect("create should succeed");
        assert!(ids.insert(task.id().clone()), "duplicate id handed out");
    }

    let tasks = harness
        .store
        .list_tasks()
        .await
        .expect("list should succeed");
    assert_eq!(tasks.len(), WORKERS);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counters_tick_once_per_successful_mutation(harness: Harness) {
    let task = harness
        .store
        .create_task("buy milk")
        .await
        .expect("create should succeed");
    harness
        .store
        .update_task(task.id(), "buy oat milk")
        .await
        .expect("update should succeed");
    harness
        .store
        .delete_task(task.id())
        .await
        .expect("delete should succeed");

    // Failed attempts must not count.
    let missing = TaskId::new("99");
    let _unused = harness.store.update_task(&missing, "nope").await;
    let _unused = harness.store.delete_task(&missing).await;

    let snapshot = harness.counters.snapshot();
    assert_eq!(snapshot.created, 1);
    assert_eq!(snapshot.updated, 1);
    assert_eq!(snapshot.deleted, 1);
}

/// Metrics sink that panics while the store still holds its lock.
struct PanickingMetrics;

impl TaskMetrics for PanickingMetrics {
    fn record_create(&self) {
        panic!("metrics sink failed");
    }

    fn record_update(&self) {}

    fn record_delete(&self) {}
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn poisoned_lock_surfaces_backend_errors() {
    let store = Arc::new(InMemoryTaskStore::new(
        Arc::new(PanickingMetrics),
        Arc::new(DefaultClock),
    ));

    let poisoner = Arc::clone(&store);
    let crashed = tokio::spawn(async move { poisoner.create_task("boom").await }).await;
    assert!(crashed.is_err(), "create should panic in the metrics sink");

    assert!(matches!(
        store.list_tasks().await,
        Err(TaskStoreError::Backend(_))
    ));
    assert!(matches!(
        store.get_task(&TaskId::new("1")).await,
        Err(TaskStoreError::Backend(_))
    ));
    assert!(matches!(
        store.create_task("after poison").await,
        Err(TaskStoreError::Backend(_))
    ));
}
