//! Atomic counter implementation of the metrics port.

use crate::task::ports::TaskMetrics;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free per-kind mutation counters.
///
/// One instance is shared between the store (which records) and the HTTP
/// layer (which snapshots it for the `/metrics` endpoint).
#[derive(Debug, Default)]
pub struct TaskCounters {
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
}

/// Point-in-time copy of [`TaskCounters`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounterSnapshot {
    /// Number of tasks created.
    pub created: u64,
    /// Number of tasks renamed.
    pub updated: u64,
    /// Number of tasks deleted.
    pub deleted: u64,
}

impl TaskCounters {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> TaskCounterSnapshot {
        TaskCounterSnapshot {
            created: self.created.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
        }
    }
}

impl TaskMetrics for TaskCounters {
    fn record_create(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    fn record_update(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    fn record_delete(&self) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }
}
