//! Storage layer for the ledger
//!
//! Provides the fixed-width account record file, its codec, and the lock that
//! serializes ledger operations within one process.

pub mod accounts;
pub mod file_io;
pub mod record;

pub use accounts::{AccountStore, Records};
pub use file_io::{read_json, write_json_atomic};

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;

/// Main storage coordinator
///
/// Every read-modify-write ledger operation holds [`Storage::exclusive`] for
/// its whole duration. Access from several processes at once is not guarded.
pub struct Storage {
    pub accounts: AccountStore,
    op_lock: Mutex<()>,
}

impl Storage {
    /// Create storage for the configured record file
    pub fn new(paths: &LedgerPaths, settings: &Settings) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;
        Ok(Self::at(settings.record_file(paths)))
    }

    /// Create storage backed directly by a record file
    pub fn at(path: PathBuf) -> Self {
        Self {
            accounts: AccountStore::new(path),
            op_lock: Mutex::new(()),
        }
    }

    /// Take the operation lock
    pub fn exclusive(&self) -> Result<MutexGuard<'_, ()>, LedgerError> {
        self.op_lock
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire operation lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.accounts.path(), paths.accounts_file());
        // The record file itself appears on first append
        assert!(!paths.accounts_file().exists());
    }

    #[test]
    fn test_settings_override_record_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            data_file: Some(temp_dir.path().join("elsewhere.dat")),
            ..Settings::default()
        };

        let storage = Storage::new(&paths, &settings).unwrap();
        assert_eq!(storage.accounts.path(), temp_dir.path().join("elsewhere.dat"));
    }
}
