//! File I/O utilities with atomic writes
//!
//! Reads are forgiving: a missing or unreadable file yields the default value
//! together with a [`LoadIssue`] describing what was discarded. Writes are
//! atomic (temp file + rename) and always report failure to the caller.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::KakeiboError;

/// Why a store started out empty instead of with file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    /// No file existed yet
    Missing { path: PathBuf },
    /// The file could not be opened
    Unreadable { path: PathBuf, reason: String },
    /// The file was not valid data for this store
    Malformed { path: PathBuf, reason: String },
}

impl LoadIssue {
    /// Whether data on disk was thrown away (as opposed to simply absent)
    pub fn discarded_data(&self) -> bool {
        !matches!(self, Self::Missing { .. })
    }
}

/// Result of a forgiving read
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub issue: Option<LoadIssue>,
}

/// Read JSON from a file, falling back to `T::default()` on any failure
///
/// The fallback keeps the application usable with a corrupt file; the
/// discarded error is logged and returned so callers can surface it.
pub fn read_json_or_default<T, P>(path: P) -> Loaded<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file yet, starting empty");
        return Loaded {
            value: T::default(),
            issue: Some(LoadIssue::Missing {
                path: path.to_path_buf(),
            }),
        };
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "data file unreadable, starting empty");
            return Loaded {
                value: T::default(),
                issue: Some(LoadIssue::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }),
            };
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(value) => Loaded { value, issue: None },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "data file malformed, starting empty");
            Loaded {
                value: T::default(),
                issue: Some(LoadIssue::Malformed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), KakeiboError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            KakeiboError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| KakeiboError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| KakeiboError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| KakeiboError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| KakeiboError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        KakeiboError::Storage(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_missing_file_is_default_with_issue() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let loaded: Loaded<TestData> = read_json_or_default(&path);
        assert_eq!(loaded.value, TestData::default());
        assert!(matches!(loaded.issue, Some(LoadIssue::Missing { .. })));
        assert!(!loaded.issue.unwrap().discarded_data());
    }

    #[test]
    fn test_malformed_file_is_default_with_issue() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let loaded: Loaded<TestData> = read_json_or_default(&path);
        assert_eq!(loaded.value, TestData::default());
        let issue = loaded.issue.unwrap();
        assert!(matches!(issue, LoadIssue::Malformed { .. }));
        assert!(issue.discarded_data());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "食費".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: Loaded<TestData> = read_json_or_default(&path);
        assert_eq!(loaded.value, data);
        assert!(loaded.issue.is_none());

        // Non-ASCII text is stored as-is, not escaped
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("食費"));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_failure_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the final rename fail
        let path = temp_dir.path().join("occupied.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_json_atomic(&path, &TestData::default()).unwrap_err();
        assert!(err.is_storage());
    }
}
