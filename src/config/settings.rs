//! Ledger settings
//!
//! Holds the administrative secret, display preferences, and an optional
//! override for the record file location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Shared secret gating the admin commands
    #[serde(default = "default_admin_secret")]
    pub admin_secret: String,

    /// Currency symbol prefixed to displayed amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Record file location, defaults to `<base>/data/accounts.dat`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_admin_secret() -> String {
    "admin123".to_string()
}

fn default_currency() -> String {
    "Rs ".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            admin_secret: default_admin_secret(),
            currency_symbol: default_currency(),
            data_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written; the caller decides when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        read_json(paths.settings_file())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Resolve the record file, relative overrides being taken from the base directory
    pub fn record_file(&self, paths: &LedgerPaths) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => paths.base_dir().join(path),
            None => paths.accounts_file(),
        }
    }

    /// Whether the admin secret is still the shipped default
    pub fn uses_default_admin_secret(&self) -> bool {
        self.admin_secret == default_admin_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.currency_symbol, "Rs ");
        assert!(settings.uses_default_admin_secret());
        assert!(settings.data_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            admin_secret: "s3cret".into(),
            currency_symbol: "$".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.admin_secret, "s3cret");
        assert_eq!(loaded.currency_symbol, "$");
        assert!(!loaded.uses_default_admin_secret());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"admin_secret": "x"}"#).unwrap();
        assert_eq!(loaded.admin_secret, "x");
        assert_eq!(loaded.currency_symbol, "Rs ");
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_record_file_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(settings.record_file(&paths), paths.accounts_file());

        settings.data_file = Some(PathBuf::from("bank.dat"));
        assert_eq!(settings.record_file(&paths), temp_dir.path().join("bank.dat"));
    }
}
