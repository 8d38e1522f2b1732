//! Request handlers.
//!
//! # Design
//! Ids arrive as raw path text and are parsed here so a bad id produces the
//! same JSON error body as every other failure. Bodies are taken as
//! `Result<Json<_>, JsonRejection>` so update can report a missing row before
//! it looks at the body.
//!
//! Update only accepts positive ids. Delete accepts any integer and lets a
//! zero or negative id fall through to "not found".

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use todo_core::{Todo, TodoInput, TodoStore};

use crate::error::ApiError;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
}

pub async fn list_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.find_all().await?))
}

pub async fn create_todo(
    State(store): State<TodoStore>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = body?;
    let todo = store.insert(&input).await?;
    info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_positive_id(&raw_id)?;
    let mut todo = store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let Json(input) = body?;

    todo.apply(&input);
    // The row may have been deleted between the lookup and the write.
    if !store.save(&todo).await? {
        return Err(ApiError::NotFound);
    }
    info!(id, "todo updated");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id)?;
    if !store.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!(id, "todo deleted");
    Ok(Json(Deleted {
        message: "Todo deleted",
    }))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

fn parse_positive_id(raw: &str) -> Result<i64, ApiError> {
    match parse_id(raw)? {
        id if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidId),
    }
}
