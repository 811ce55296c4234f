//! `PostgreSQL` adapter acting as the remote task store.

mod models;
mod schema;
mod store;

pub use store::{CREATE_TASKS_TABLE_SQL, PostgresTaskStore, TaskPgPool, build_pool};
