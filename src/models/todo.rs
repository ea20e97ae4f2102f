//! Todo item model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TodoId;
use super::validation::ValidationError;

/// On-disk shape of a todo item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: TodoId,
    pub content: String,
    pub due_date: NaiveDate,
    pub is_completed: bool,
}

/// A task due on a given day
///
/// Only the completion flag changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoRecord", into = "TodoRecord")]
pub struct TodoItem {
    id: TodoId,
    content: String,
    due_date: NaiveDate,
    is_completed: bool,
}

impl TodoItem {
    /// Create an open todo with a fresh identifier
    pub fn new(content: impl AsRef<str>, due_date: NaiveDate) -> Result<Self, ValidationError> {
        Self::with_id(TodoId::new(), content, due_date, false)
    }

    /// Rebuild a todo with a known identifier and state
    pub fn with_id(
        id: TodoId,
        content: impl AsRef<str>,
        due_date: NaiveDate,
        is_completed: bool,
    ) -> Result<Self, ValidationError> {
        let content = content.as_ref().trim();
        if content.is_empty() {
            return Err(ValidationError::BlankContent);
        }

        Ok(Self {
            id,
            content: content.to_string(),
            due_date,
            is_completed,
        })
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Set the completion flag, returning whether it changed
    pub fn set_completed(&mut self, completed: bool) -> bool {
        let changed = self.is_completed != completed;
        self.is_completed = completed;
        changed
    }
}

impl TryFrom<TodoRecord> for TodoItem {
    type Error = ValidationError;

    fn try_from(record: TodoRecord) -> Result<Self, Self::Error> {
        Self::with_id(
            record.id,
            record.content,
            record.due_date,
            record.is_completed,
        )
    }
}

impl From<TodoItem> for TodoRecord {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            content: item.content,
            due_date: item.due_date,
            is_completed: item.is_completed,
        }
    }
}

impl fmt::Display for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_completed { "[x]" } else { "[ ]" };
        write!(
            f,
            "{} {} {}",
            check,
            self.due_date.format("%Y-%m-%d"),
            self.content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_new_todo_is_open_and_trimmed() {
        let todo = TodoItem::new("  家賃を振り込む ", day()).unwrap();
        assert_eq!(todo.content(), "家賃を振り込む");
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_blank_content_rejected() {
        assert_eq!(TodoItem::new(" \t", day()), Err(ValidationError::BlankContent));
    }

    #[test]
    fn test_set_completed_reports_change() {
        let mut todo = TodoItem::new("買い物", day()).unwrap();
        assert!(todo.set_completed(true));
        assert!(!todo.set_completed(true));
        assert!(todo.is_completed());
    }

    #[test]
    fn test_record_shape() {
        let todo = TodoItem::new("買い物", day()).unwrap();
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["content"], "買い物");
        assert_eq!(json["due_date"], "2024-05-10");
        assert_eq!(json["is_completed"], false);

        let back: TodoItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, todo);
    }
}
