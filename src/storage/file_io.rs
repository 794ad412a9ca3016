//! File I/O utilities
//!
//! Opening helpers for the record file and atomic JSON writes for settings.
//! The record file is opened per operation and closed before it returns.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

/// Open the record file for reading
///
/// A file that cannot be opened reads as an empty store, so a fresh system
/// behaves as zero accounts.
pub fn open_for_read<P: AsRef<Path>>(path: P) -> Option<File> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => Some(file),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "record file unreadable, treating as empty");
            None
        }
    }
}

/// Open the record file for appending, creating it and its directory if needed
pub fn open_for_append<P: AsRef<Path>>(path: P) -> Result<File, LedgerError> {
    let path = path.as_ref();
    ensure_parent(path)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| unavailable(path, e))
}

/// Open an existing record file for in-place updates
pub fn open_for_update<P: AsRef<Path>>(path: P) -> Result<File, LedgerError> {
    let path = path.as_ref();

    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| unavailable(path, e))
}

fn unavailable(path: &Path, e: std::io::Error) -> LedgerError {
    LedgerError::StorageUnavailable(format!("Failed to open {}: {}", path.display(), e))
}

fn ensure_parent(path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::StorageUnavailable(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| LedgerError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| LedgerError::Json(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Io(format!("Failed to rename temp file: {}", e))
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
    fn test_open_for_read_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert!(open_for_read(temp_dir.path().join("accounts.dat")).is_none());
    }

    #[test]
    fn test_open_for_append_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("accounts.dat");

        open_for_append(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_for_update_missing_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let err = open_for_update(temp_dir.path().join("accounts.dat")).unwrap_err();
        assert!(matches!(err, LedgerError::StorageUnavailable(_)));
    }

    #[test]
    fn test_open_for_append_on_directory_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let err = open_for_append(temp_dir.path()).unwrap_err();
        assert!(matches!(err, LedgerError::StorageUnavailable(_)));
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: TestData = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());
        assert!(!temp_path.exists());

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }
}
