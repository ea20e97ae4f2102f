//! Storage layer for Kakeibo
//!
//! JSON file storage with atomic writes. Each store owns one file and writes
//! it back in full after every mutation.

pub mod file_io;
pub mod ledger;
pub mod todos;

pub use file_io::{read_json_or_default, write_json_atomic, LoadIssue};
pub use ledger::Ledger;
pub use todos::TodoStore;

use crate::config::paths::KakeiboPaths;
use crate::error::KakeiboError;

/// Storage coordinator that opens every store under one data directory
#[derive(Debug)]
pub struct Storage {
    paths: KakeiboPaths,
    pub ledger: Ledger,
    pub todos: TodoStore,
}

impl Storage {
    /// Open all stores, creating the data directory if needed
    pub fn open(paths: KakeiboPaths) -> Result<Self, KakeiboError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: Ledger::load(paths.transactions_file()),
            todos: TodoStore::load(paths.todos_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &KakeiboPaths {
        &self.paths
    }

    /// Stores that started empty because their file could not be used
    pub fn load_issues(&self) -> Vec<&LoadIssue> {
        self.ledger
            .load_issue()
            .into_iter()
            .chain(self.todos.load_issue())
            .collect()
    }
}
