//! `PostgreSQL` implementation of the remote task store.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::config::TrackerConfig;
use crate::task::{
    domain::{Deadline, PersistedTaskData, Task, TaskDraft, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// DDL for the `tasks` table, applied by [`PostgresTaskStore::ensure_schema`].
pub const CREATE_TASKS_TABLE_SQL: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id UUID PRIMARY KEY DEFAULT gen_random_uuid(), ",
    "text TEXT NOT NULL, ",
    "completed BOOLEAN NOT NULL DEFAULT FALSE, ",
    "deadline VARCHAR(64) NOT NULL, ",
    "created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    ")",
);

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskStoreError::Persistence`] when the pool cannot establish
/// its initial connections.
pub fn build_pool(database_url: &str) -> TaskStoreResult<TaskPgPool> {
    Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(TaskStoreError::persistence)
}

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database named by [`TrackerConfig::database_url`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when no URL is configured or
    /// the pool cannot connect.
    pub fn from_config(config: &TrackerConfig) -> TaskStoreResult<Self> {
        let database_url = config
            .require_database_url()
            .map_err(TaskStoreError::persistence)?;
        build_pool(database_url).map(Self::new)
    }

    /// Creates the `tasks` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the statement fails.
    pub async fn ensure_schema(&self) -> TaskStoreResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query(CREATE_TASKS_TABLE_SQL)
                .execute(connection)
                .map_err(map_diesel_error)?;
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        let rows = self
            .run_blocking(|connection| {
                tasks::table
                    .order((tasks::created_at.asc(), tasks::id.asc()))
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection)
                    .map_err(map_diesel_error)
            })
            .await?;
        Ok(rows.into_iter().filter_map(row_to_task).collect())
    }

    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<TaskId> {
        let new_row = NewTaskRow {
            text: draft.text().to_owned(),
            completed: false,
            deadline: draft.deadline().as_str().to_owned(),
        };

        let id = self
            .run_blocking(move |connection| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(tasks::id)
                    .get_result::<Uuid>(connection)
                    .map_err(map_diesel_error)
            })
            .await?;
        Ok(TaskId::from_uuid(id))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        let task_id = id.clone();
        let key = parse_key(id)?;
        let changeset = to_changeset(patch);

        self.run_blocking(move |connection| {
            let target = tasks::table.filter(tasks::id.eq(key));
            let outcome = if changeset.is_empty() {
                diesel::select(diesel::dsl::exists(target))
                    .get_result::<bool>(connection)
                    .map(usize::from)
            } else {
                diesel::update(target)
                    .set(&changeset)
                    .execute(connection)
            };
            let matched = outcome.map_err(map_diesel_error)?;

            if matched == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        let task_id = id.clone();
        let key = parse_key(id)?;

        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(key)))
                .execute(connection)
                .map_err(map_diesel_error)?;
            if removed == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }
}

/// Identifiers this store did not issue cannot exist in it.
fn parse_key(id: &TaskId) -> TaskStoreResult<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| TaskStoreError::NotFound(id.clone()))
}

fn to_changeset(patch: &TaskPatch) -> TaskChangeset {
    TaskChangeset {
        text: patch.text.clone(),
        completed: patch.completed,
        deadline: patch.deadline.as_ref().map(|deadline| deadline.as_str().to_owned()),
    }
}

fn row_to_task(row: TaskRow) -> Option<Task> {
    let TaskRow {
        id,
        text,
        completed,
        deadline: persisted_deadline,
        ..
    } = row;

    match Deadline::parse(&persisted_deadline) {
        Ok(deadline) => Some(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(id),
            text,
            completed,
            deadline,
        })),
        Err(err) => {
            tracing::warn!(task_id = %id, error = %err, "skipping task with unreadable deadline");
            None
        }
    }
}

fn map_diesel_error(err: DieselError) -> TaskStoreError {
    match err {
        DieselError::DatabaseError(_, ref info)
            if info.message().starts_with("permission denied") =>
        {
            TaskStoreError::PermissionDenied(info.message().to_owned())
        }
        other => TaskStoreError::persistence(other),
    }
}
