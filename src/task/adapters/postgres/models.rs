//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::domain::{PersistedTaskData, Task, TaskId};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Backend-assigned task identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records; the identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Maps a fetched row into the domain entity.
///
/// Pure transformation: column values bind by name through the row model and
/// no I/O happens here.
pub(crate) fn row_to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id.to_string()),
        name: row.name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
