//! Store port for task persistence and retrieval.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task storage contract shared by every backend.
///
/// The HTTP layer holds exactly one `Arc<dyn TaskStore>` selected at startup
/// and never inspects which backend it has. Callers always receive owned
/// snapshots; no returned value aliases store-internal state.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Creates a task with a fresh identifier and matching timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the backend fails.
    async fn create_task(&self, name: &str) -> TaskStoreResult<Task>;

    /// Fetches the task with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no live task has that
    /// identifier.
    async fn get_task(&self, id: &TaskId) -> TaskStoreResult<Task>;

    /// Renames the task with the given identifier, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no live task has that
    /// identifier.
    async fn update_task(&self, id: &TaskId, name: &str) -> TaskStoreResult<Task>;

    /// Removes the task with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no live task has that
    /// identifier.
    async fn delete_task(&self, id: &TaskId) -> TaskStoreResult<()>;

    /// Returns a snapshot of all live tasks in reverse creation order
    /// (most recently created first).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the backend fails.
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The identifier has no corresponding live task.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Storage-layer failure (I/O, connection, or query execution).
    #[error("storage error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
