//! `PostgreSQL` task store implementation.

use super::{
    models::{NewTaskRow, TaskRow, row_to_task},
    schema::tasks,
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskMetrics, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Rows fetched per round trip while listing, bounding per-batch memory on
/// large tables.
const LIST_BATCH_SIZE: usize = 5000;

/// `PostgreSQL`-backed task store.
///
/// Each operation acquires one pooled connection, runs exactly one statement
/// on the blocking thread pool, and releases the connection on scope exit.
/// Consistency is whatever the database guarantees for single statements; no
/// multi-statement transactions are used.
pub struct PostgresTaskStore<C> {
    pool: TaskPgPool,
    metrics: Arc<dyn TaskMetrics>,
    clock: Arc<C>,
}

impl<C> PostgresTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: TaskPgPool, metrics: Arc<dyn TaskMetrics>, clock: Arc<C>) -> Self {
        Self {
            pool,
            metrics,
            clock,
        }
    }

    /// Builds a connection pool for `database_url` and wraps it in a store.
    ///
    /// Every pooled connection gets `statement_timeout` applied on acquire,
    /// so a caller that stops waiting does not leave an unbounded query
    /// running on the server.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the pool cannot be built.
    pub fn connect(
        database_url: &str,
        statement_timeout: Duration,
        metrics: Arc<dyn TaskMetrics>,
        clock: Arc<C>,
    ) -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .connection_customizer(Box::new(StatementTimeout(statement_timeout)))
            .build(manager)
            .map_err(TaskStoreError::backend)?;
        Ok(Self::new(pool, metrics, clock))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::backend)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::backend)?
    }
}

/// Applies `statement_timeout` to every connection the pool hands out.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("SET statement_timeout TO {}", self.0.as_millis()))
            .execute(connection)
            .map(drop)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Maps a task identifier onto its `BIGSERIAL` column value.
///
/// Identifiers this backend hands out are always decimal renderings of the
/// sequence value, so anything that fails to parse cannot name a live row
/// and short-circuits to `NotFound` without touching the database.
fn db_key(id: &TaskId) -> TaskStoreResult<i64> {
    id.as_str()
        .parse()
        .map_err(|_| TaskStoreError::NotFound(id.clone()))
}

#[async_trait]
impl<C> TaskStore for PostgresTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create_task(&self, name: &str) -> TaskStoreResult<Task> {
        let timestamp = self.clock.utc();
        let new_row = NewTaskRow {
            name: name.to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        let task = self
            .run_blocking(move |connection| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .map(row_to_task)
                    .map_err(TaskStoreError::backend)
            })
            .await?;

        self.metrics.record_create();
        Ok(task)
    }

    async fn get_task(&self, id: &TaskId) -> TaskStoreResult<Task> {
        let key = db_key(id)?;
        let lookup_id = id.clone();
        self.run_blocking(move |connection| {
            tasks::table
                .find(key)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::backend)?
                .map(row_to_task)
                .ok_or(TaskStoreError::NotFound(lookup_id))
        })
        .await
    }

    async fn update_task(&self, id: &TaskId, name: &str) -> TaskStoreResult<Task> {
        let key = db_key(id)?;
        let lookup_id = id.clone();
        let new_name = name.to_owned();
        let timestamp = self.clock.utc();

        let task = self
            .run_blocking(move |connection| {
                diesel::update(tasks::table.find(key))
                    .set((tasks::name.eq(new_name), tasks::updated_at.eq(timestamp)))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .optional()
                    .map_err(TaskStoreError::backend)?
                    .map(row_to_task)
                    .ok_or(TaskStoreError::NotFound(lookup_id))
            })
            .await?;

        self.metrics.record_update();
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> TaskStoreResult<()> {
        let key = db_key(id)?;
        let lookup_id = id.clone();

        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.find(key))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::backend)?
                .map(drop)
                .ok_or(TaskStoreError::NotFound(lookup_id))
        })
        .await?;

        self.metrics.record_delete();
        Ok(())
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut all = Vec::new();
            let mut cursor: Option<i64> = None;
            loop {
                let mut query = tasks::table
                    .select(TaskRow::as_select())
                    .order(tasks::id.desc())
                    .limit(i64::try_from(LIST_BATCH_SIZE).unwrap_or(i64::MAX))
                    .into_boxed();
                if let Some(last_seen) = cursor {
                    query = query.filter(tasks::id.lt(last_seen));
                }

                let batch = query
                    .load::<TaskRow>(connection)
                    .map_err(TaskStoreError::backend)?;
                let exhausted = batch.len() < LIST_BATCH_SIZE;
                cursor = batch.last().map(|row| row.id);
                all.extend(batch.into_iter().map(row_to_task));
                if exhausted {
                    break;
                }
            }
            Ok(all)
        })
        .await
    }
}
