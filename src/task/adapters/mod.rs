//! Adapter implementations of the task ports.

pub mod memory;
pub mod metrics;
pub mod postgres;

pub use memory::InMemoryTaskStore;
pub use metrics::{TaskCounterSnapshot, TaskCounters};
pub use postgres::{PostgresTaskStore, TaskPgPool};
