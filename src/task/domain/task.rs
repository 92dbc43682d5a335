//! Task entity and persisted-state reconstruction.

use super::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// The owning store holds the authoritative copy; values handed to callers
/// are snapshots and mutating them has no effect on stored state. `name` is
/// free-form text; whether an empty name is acceptable is the caller's
/// policy, not the entity's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task from persisted storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted display name.
    pub name: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a freshly assigned task.
    ///
    /// Both timestamps are set to the same clock reading, so
    /// `created_at == updated_at` until the first rename.
    #[must_use]
    pub fn new(id: TaskId, name: impl Into<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            name: name.into(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces the display name and refreshes `updated_at`.
    ///
    /// `created_at` is immutable after construction; this is the only
    /// mutation a live task undergoes.
    pub fn rename(&mut self, name: impl Into<String>, clock: &impl Clock) {
        self.name = name.into();
        self.updated_at = clock.utc();
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
