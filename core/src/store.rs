//! SQLite-backed persistence for todos.
//!
//! # Design
//! `TodoStore` is a thin handle around a `SqlitePool`. Concurrent writers are
//! serialized by SQLite itself; there is no application-level locking and no
//! retry. A failed query fails that call only.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::FromRow;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::schema::SQLITE_INIT;
use crate::types::{Todo, TodoInput};

/// Row shape of the `todos` table.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            completed: row.completed,
        }
    }
}

/// Shared handle to the todo table.
#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Open (creating if missing) the database file at `path` and ensure the
    /// schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let connect_opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(StoreError::Open)?;

        let store = Self::with_pool(pool).await?;
        info!(path = %path.display(), "todo store opened");
        Ok(store)
    }

    /// A private in-memory database. Pinned to one connection, since every
    /// SQLite connection to `:memory:` sees its own empty database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let connect_opts =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(StoreError::Open)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await
            .map_err(StoreError::Open)?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        apply_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a new row and return it with its assigned id.
    pub async fn insert(&self, input: &TodoInput) -> Result<Todo, StoreError> {
        let row: TodoRow = sqlx::query_as(
            "INSERT INTO todos (title, completed) VALUES (?, ?) RETURNING id, title, completed",
        )
        .bind(input.title())
        .bind(input.completed())
        .fetch_one(&self.pool)
        .await?;

        debug!(id = row.id, "todo inserted");
        Ok(row.into())
    }

    /// All rows, oldest first.
    pub async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let rows: Vec<TodoRow> =
            sqlx::query_as("SELECT id, title, completed FROM todos ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let row: Option<TodoRow> =
            sqlx::query_as("SELECT id, title, completed FROM todos WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Todo::from))
    }

    /// Overwrite title and completed for `todo.id`. Returns `false` when the
    /// row no longer exists.
    pub async fn save(&self, todo: &Todo) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE todos SET title = ?, completed = ? WHERE id = ?")
            .bind(&todo.title)
            .bind(todo.completed)
            .bind(todo.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no row had this id.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Close the pool. Subsequent calls fail with `StoreError::Database`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s)
            .execute(pool)
            .await
            .map_err(StoreError::Migrate)?;
    }
    Ok(())
}
