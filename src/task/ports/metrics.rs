//! Metrics port for mutation counters.

/// Sink for per-kind mutation counts.
///
/// Stores record exactly one tick per *successful* create, update, or delete
/// call; failed attempts are not counted. The sink is injected at store
/// construction rather than reached through process-wide state, so tests can
/// observe counts in isolation.
pub trait TaskMetrics: Send + Sync {
    /// Records one successful task creation.
    fn record_create(&self);

    /// Records one successful task rename.
    fn record_update(&self);

    /// Records one successful task deletion.
    fn record_delete(&self);
}
