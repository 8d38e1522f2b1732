//! SQL DDL for the todo table.

/// Non-destructive: safe to run on every startup.
///
/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    completed INTEGER NOT NULL DEFAULT 0
);
"#;
