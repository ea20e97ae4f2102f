//! Path management for Kakeibo
//!
//! All files live in one per-application directory.
//!
//! ## Path Resolution Order
//!
//! 1. `KAKEIBO_DATA_DIR` environment variable (if set)
//! 2. `~/.simple_kakeibo` under the user's home directory

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::KakeiboError;

/// Name of the application directory under the home directory
pub const APP_DIR_NAME: &str = ".simple_kakeibo";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "KAKEIBO_DATA_DIR";

/// Manages all paths used by Kakeibo
#[derive(Debug, Clone)]
pub struct KakeiboPaths {
    /// Base directory for all Kakeibo data
    base_dir: PathBuf,
}

impl KakeiboPaths {
    /// Create a new KakeiboPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the home directory cannot
    /// be determined.
    pub fn new() -> Result<Self, KakeiboError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create KakeiboPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.base_dir.join("transactions.json")
    }

    /// Path to todos.json
    pub fn todos_file(&self) -> PathBuf {
        self.base_dir.join("todos.json")
    }

    /// Path to app_settings.json
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("app_settings.json")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("kakeibo.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), KakeiboError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KakeiboError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, KakeiboError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| KakeiboError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(APP_DIR_NAME))
}
