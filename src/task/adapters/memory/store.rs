//! In-memory task store without persistence.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskMetrics, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Tasks live in a single `BTreeMap` keyed by their numeric identifier, so
/// point lookup and a well-defined iteration order come from the same
/// structure; there is no separate index that could fall out of agreement
/// with the sequence. Descending key order is reverse creation order because
/// identifiers come from a counter that only ever increases.
///
/// Every operation holds one exclusive lock for its full duration. Expected
/// load does not warrant a read/write split, and full serialization makes
/// each call observe every previously completed call.
pub struct InMemoryTaskStore<C> {
    state: Mutex<State>,
    metrics: Arc<dyn TaskMetrics>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct State {
    tasks: BTreeMap<u64, Task>,
    // Monotonic; never reset or decremented, so identifiers are unique for
    // the lifetime of the store even after deletions.
    counter: u64,
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new(metrics: Arc<dyn TaskMetrics>, clock: Arc<C>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            metrics,
            clock,
        }
    }

    fn lock(&self) -> TaskStoreResult<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))
    }
}

/// Maps a task identifier onto its numeric map key.
///
/// Identifiers handed out by this store are always decimal renderings of the
/// counter, so anything that fails to parse cannot name a live task.
fn numeric_key(id: &TaskId) -> Option<u64> {
    id.as_str().parse().ok()
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create_task(&self, name: &str) -> TaskStoreResult<Task> {
        let mut state = self.lock()?;
        state.counter += 1;
        let key = state.counter;
        let task = Task::new(TaskId::new(key.to_string()), name, self.clock.as_ref());
        state.tasks.insert(key, task.clone());
        self.metrics.record_create();
        Ok(task)
    }

    async fn get_task(&self, id: &TaskId) -> TaskStoreResult<Task> {
        let state = self.lock()?;
        numeric_key(id)
            .and_then(|key| state.tasks.get(&key))
            .cloned()
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))
    }

    async fn update_task(&self, id: &TaskId, name: &str) -> TaskStoreResult<Task> {
        let mut state = self.lock()?;
        let task = numeric_key(id)
            .and_then(|key| state.tasks.get_mut(&key))
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        task.rename(name, self.clock.as_ref());
        let snapshot = task.clone();
        self.metrics.record_update();
        Ok(snapshot)
    }

    async fn delete_task(&self, id: &TaskId) -> TaskStoreResult<()> {
        let mut state = self.lock()?;
        numeric_key(id)
            .and_then(|key| state.tasks.remove(&key))
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        self.metrics.record_delete();
        Ok(())
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.lock()?;
        Ok(state.tasks.values().rev().cloned().collect())
    }
}
