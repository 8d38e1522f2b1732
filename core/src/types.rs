//! Domain DTOs for the todo API.
//!
//! # Design
//! `TodoInput` is shared by create and update. Both fields are optional on
//! the wire; absent and `null` values collapse to the zero value, so an
//! update that omits `completed` resets it to `false`.
//!
//! `TodoInput` deserializes from a JSON object only. The derived impl would
//! also take a positional array, which is not a valid request body.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A single persisted todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating or overwriting a todo.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoInput {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }
}

impl<'de> Deserialize<'de> for TodoInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TodoInputVisitor)
    }
}

struct TodoInputVisitor;

impl<'de> Visitor<'de> for TodoInputVisitor {
    type Value = TodoInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a todo object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<TodoInput, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut input = TodoInput::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "title" => input.title = map.next_value()?,
                "completed" => input.completed = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(input)
    }
}

impl Todo {
    /// Overwrite every mutable field from `input`, keeping the id.
    pub fn apply(&mut self, input: &TodoInput) {
        self.title = input.title().to_string();
        self.completed = input.completed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: 7,
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn input_defaults_completed_to_false() {
        let input: TodoInput = serde_json::from_str(r#"{"title":"No completed field"}"#).unwrap();
        assert_eq!(input.title(), "No completed field");
        assert!(!input.completed());
    }

    #[test]
    fn input_accepts_explicit_completed() {
        let input: TodoInput =
            serde_json::from_str(r#"{"title":"Done","completed":true}"#).unwrap();
        assert!(input.completed());
    }

    #[test]
    fn input_allows_missing_title() {
        let input: TodoInput = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(input.title(), "");
        assert!(input.completed());
    }

    #[test]
    fn input_treats_null_as_absent() {
        let input: TodoInput =
            serde_json::from_str(r#"{"title":null,"completed":null}"#).unwrap();
        assert_eq!(input.title(), "");
        assert!(!input.completed());
    }

    #[test]
    fn input_ignores_unknown_fields() {
        let input: TodoInput =
            serde_json::from_str(r#"{"title":"x","id":42,"priority":"high"}"#).unwrap();
        assert_eq!(input.title(), "x");
    }

    #[test]
    fn input_rejects_wrong_types() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"completed":"yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn input_rejects_arrays() {
        for body in ["[]", r#"["t", true]"#] {
            let result: Result<TodoInput, _> = serde_json::from_str(body);
            assert!(result.is_err(), "expected {body} to be rejected");
        }
    }

    #[test]
    fn input_rejects_scalars() {
        for body in ["null", "42", r#""title""#] {
            let result: Result<TodoInput, _> = serde_json::from_str(body);
            assert!(result.is_err(), "expected {body} to be rejected");
        }
    }

    #[test]
    fn apply_overwrites_both_fields() {
        let mut todo = Todo {
            id: 3,
            title: "Old".to_string(),
            completed: true,
        };
        let input: TodoInput = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        todo.apply(&input);
        assert_eq!(todo.id, 3);
        assert_eq!(todo.title, "New");
        assert!(!todo.completed);
    }
}
