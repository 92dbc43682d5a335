//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces consumed by the HTTP
//! adapter layer and implemented by storage backends.

pub mod metrics;
pub mod store;

pub use metrics::TaskMetrics;
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
