//! Configuration module for the ledger
//!
//! This module provides configuration management including:
//! - data directory resolution
//! - settings persistence (admin secret, display preferences)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
