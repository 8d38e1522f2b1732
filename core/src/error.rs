//! Error types for the persistence layer.
//!
//! # Design
//! Missing rows are not errors here: lookups return `Option` and mutations
//! return whether a row matched. Only genuine store failures surface as
//! `StoreError`.

use thiserror::Error;

/// Errors returned by `TodoStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or connected to.
    #[error("failed to open database: {0}")]
    Open(#[source] sqlx::Error),

    /// The schema could not be applied.
    #[error("failed to apply schema: {0}")]
    Migrate(#[source] sqlx::Error),

    /// A single query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
