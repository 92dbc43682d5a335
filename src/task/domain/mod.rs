//! Domain model for task management.
//!
//! The task domain models to-do items and their identifiers while keeping
//! all infrastructure concerns outside of the domain boundary.

mod ids;
mod task;

pub use ids::TaskId;
pub use task::{PersistedTaskData, Task};
