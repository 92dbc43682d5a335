//! `PostgreSQL` adapters for task persistence.

mod models;
mod store;

pub(crate) mod schema;

#[cfg(test)]
pub(crate) use models::{TaskRow, row_to_task};
pub use store::{PostgresTaskStore, TaskPgPool};
