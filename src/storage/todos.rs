//! Todo store backed by todos.json

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{TodoId, TodoItem};

use super::file_io::{read_json_or_default, write_json_atomic, LoadIssue};

/// Owns the todo list, stored in insertion order
#[derive(Debug)]
pub struct TodoStore {
    path: PathBuf,
    todos: Vec<TodoItem>,
    load_issue: Option<LoadIssue>,
}

impl TodoStore {
    /// Load todos from disk, starting empty if the file is missing or broken
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = read_json_or_default::<Vec<TodoItem>, _>(&path);

        tracing::debug!(count = loaded.value.len(), path = %path.display(), "todos loaded");
        Self {
            path,
            todos: loaded.value,
            load_issue: loaded.issue.filter(LoadIssue::discarded_data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_issue(&self) -> Option<&LoadIssue> {
        self.load_issue.as_ref()
    }

    /// Create a todo and persist
    ///
    /// Invalid content is rejected before anything is stored.
    pub fn add(&mut self, content: &str, due_date: NaiveDate) -> KakeiboResult<TodoItem> {
        let todo = TodoItem::new(content, due_date)?;
        tracing::info!(id = %todo.id(), due = %due_date, "adding todo");

        self.todos.push(todo.clone());
        self.save()?;
        Ok(todo)
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id() == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Every todo, by due date then open before completed
    pub fn all_sorted(&self) -> Vec<&TodoItem> {
        let mut sorted: Vec<&TodoItem> = self.todos.iter().collect();
        sorted.sort_by_key(|todo| (todo.due_date(), todo.is_completed()));
        sorted
    }

    /// Open todos due on `date`, in insertion order
    pub fn uncompleted_for_day(&self, date: NaiveDate) -> Vec<&TodoItem> {
        self.todos
            .iter()
            .filter(|todo| todo.due_date() == date && !todo.is_completed())
            .collect()
    }

    pub fn uncompleted_count_for_day(&self, date: NaiveDate) -> usize {
        self.todos
            .iter()
            .filter(|todo| todo.due_date() == date && !todo.is_completed())
            .count()
    }

    /// Set the completion flag of a todo
    ///
    /// Unknown ids are ignored. Returns whether anything changed; the file is
    /// only rewritten in that case.
    pub fn set_completed(&mut self, id: &TodoId, completed: bool) -> KakeiboResult<bool> {
        let changed = match self.todos.iter_mut().find(|todo| todo.id() == id) {
            Some(todo) => todo.set_completed(completed),
            None => false,
        };

        if changed {
            tracing::info!(%id, completed, "todo status changed");
            self.save()?;
        }
        Ok(changed)
    }

    /// Remove a todo, returning whether it existed
    pub fn delete(&mut self, id: &TodoId) -> KakeiboResult<bool> {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id() != id);

        if self.todos.len() == before {
            return Ok(false);
        }
        tracing::info!(%id, "todo deleted");
        self.save()?;
        Ok(true)
    }

    /// Resolve a user-typed id fragment to exactly one todo
    pub fn find_by_prefix(&self, fragment: &str) -> KakeiboResult<&TodoItem> {
        let mut matches = self.todos.iter().filter(|todo| todo.id().matches_prefix(fragment));

        match (matches.next(), matches.next()) {
            (Some(todo), None) => Ok(todo),
            (None, _) => Err(KakeiboError::todo_not_found(fragment)),
            (Some(_), Some(_)) => Err(KakeiboError::Ambiguous {
                entity_type: "Todo",
                identifier: fragment.to_string(),
            }),
        }
    }

    fn save(&self) -> KakeiboResult<()> {
        write_json_atomic(&self.path, &self.todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn create_test_store() -> (TempDir, TodoStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = TodoStore::load(temp_dir.path().join("todos.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_add_and_reload() {
        let (temp_dir, mut store) = create_test_store();
        let todo = store.add("家賃を振り込む", date(25)).unwrap();

        let reloaded = TodoStore::load(temp_dir.path().join("todos.json"));
        assert_eq!(reloaded.get(todo.id()), Some(&todo));
    }

    #[test]
    fn test_blank_content_is_not_stored() {
        let (temp_dir, mut store) = create_test_store();
        let err = store.add("   ", date(1)).unwrap_err();

        assert!(err.is_validation());
        assert!(store.is_empty());
        assert!(!temp_dir.path().join("todos.json").exists());
    }

    #[test]
    fn test_all_sorted_by_due_date_then_open_first() {
        let (_temp_dir, mut store) = create_test_store();
        let done = store.add("済み", date(3)).unwrap();
        store.add("後で", date(9)).unwrap();
        store.add("未完了", date(3)).unwrap();
        store.set_completed(done.id(), true).unwrap();

        let contents: Vec<&str> = store.all_sorted().iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["未完了", "済み", "後で"]);
    }

    #[test]
    fn test_uncompleted_for_day() {
        let (_temp_dir, mut store) = create_test_store();
        let a = store.add("A", date(5)).unwrap();
        store.add("B", date(5)).unwrap();
        store.add("C", date(6)).unwrap();
        store.set_completed(a.id(), true).unwrap();

        let open = store.uncompleted_for_day(date(5));
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].content(), "B");
        assert_eq!(store.uncompleted_count_for_day(date(5)), 1);
    }

    #[test]
    fn test_set_completed_unknown_id_is_noop() {
        let (temp_dir, mut store) = create_test_store();
        assert!(!store.set_completed(&TodoId::new(), true).unwrap());
        assert!(!temp_dir.path().join("todos.json").exists());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, mut store) = create_test_store();
        let todo = store.add("消す", date(1)).unwrap();

        assert!(store.delete(todo.id()).unwrap());
        assert!(!store.delete(todo.id()).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, mut store) = create_test_store();
        let todo = store.add("探す", date(1)).unwrap();

        let found = store.find_by_prefix(&todo.id().to_string()).unwrap();
        assert_eq!(found.id(), todo.id());

        let err = store.find_by_prefix("todo-zzzz").unwrap_err();
        assert!(err.is_not_found());
    }
}
