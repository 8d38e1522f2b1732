//! `TodoStore` against real SQLite databases.
//!
//! # Design
//! Most tests use the single-connection in-memory store. The file-backed
//! tests use a temporary directory to check that the schema step is
//! non-destructive and that ids survive a reopen.

use tempfile::TempDir;
use todo_core::{StoreError, Todo, TodoInput, TodoStore};

fn input(title: &str, completed: bool) -> TodoInput {
    TodoInput {
        title: Some(title.to_string()),
        completed: Some(completed),
    }
}

#[tokio::test]
async fn find_all_on_empty_store() {
    let store = TodoStore::in_memory().await.unwrap();
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_assigns_positive_id() {
    let store = TodoStore::in_memory().await.unwrap();
    let todo = store.insert(&input("buy milk", false)).await.unwrap();
    assert!(todo.id > 0);
    assert_eq!(todo.title, "buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn insert_with_empty_input_uses_defaults() {
    let store = TodoStore::in_memory().await.unwrap();
    let todo = store.insert(&TodoInput::default()).await.unwrap();
    assert_eq!(todo.title, "");
    assert!(!todo.completed);
}

#[tokio::test]
async fn ids_are_unique_and_ordered() {
    let store = TodoStore::in_memory().await.unwrap();
    let a = store.insert(&input("a", false)).await.unwrap();
    let b = store.insert(&input("b", true)).await.unwrap();
    assert_ne!(a.id, b.id);

    let all = store.find_all().await.unwrap();
    assert_eq!(all, vec![a, b]);
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
    let store = TodoStore::in_memory().await.unwrap();
    assert!(store.find_by_id(999_999).await.unwrap().is_none());
}

#[tokio::test]
async fn save_overwrites_existing_row() {
    let store = TodoStore::in_memory().await.unwrap();
    let mut todo = store.insert(&input("x", false)).await.unwrap();
    todo.title = "y".to_string();
    todo.completed = true;

    assert!(store.save(&todo).await.unwrap());
    assert_eq!(store.find_by_id(todo.id).await.unwrap(), Some(todo));
}

#[tokio::test]
async fn save_missing_row_reports_false() {
    let store = TodoStore::in_memory().await.unwrap();
    let ghost = Todo {
        id: 42,
        title: "ghost".to_string(),
        completed: false,
    };
    assert!(!store.save(&ghost).await.unwrap());
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_row_once() {
    let store = TodoStore::in_memory().await.unwrap();
    let todo = store.insert(&input("gone", false)).await.unwrap();

    assert!(store.delete(todo.id).await.unwrap());
    assert!(store.find_by_id(todo.id).await.unwrap().is_none());
    assert!(!store.delete(todo.id).await.unwrap());
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let store = TodoStore::in_memory().await.unwrap();
    let first = store.insert(&input("first", false)).await.unwrap();
    store.delete(first.id).await.unwrap();

    let second = store.insert(&input("second", false)).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn closed_store_returns_database_error() {
    let store = TodoStore::in_memory().await.unwrap();
    store.close().await;

    let err = store.find_all().await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.db");

    let store = TodoStore::open(&path).await.unwrap();
    let created = store.insert(&input("persisted", true)).await.unwrap();
    store.close().await;

    let reopened = TodoStore::open(&path).await.unwrap();
    assert_eq!(reopened.find_all().await.unwrap(), vec![created]);
    reopened.close().await;
}

#[tokio::test]
async fn open_fails_for_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("todo.db");

    let err = TodoStore::open(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Open(_)));
}
