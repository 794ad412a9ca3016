//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every rejection carries the account number
//! and the violated constraint so the CLI can explain what went wrong.

use thiserror::Error;

use crate::models::{AccountNumber, Money};

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Account missing or soft-deleted
    #[error("Account not found: {account}")]
    NotFound { account: AccountNumber },

    /// Amount was zero or negative
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Money),

    /// Balance would go negative
    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: AccountNumber,
        requested: Money,
        available: Money,
    },

    /// Transfer source and destination are the same
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountNumber),

    /// Credential mismatch
    #[error("Authentication rejected for account {0}")]
    Rejected(AccountNumber),

    /// Update target has no record in the store
    #[error("No stored record for account {0}")]
    RecordNotFound(AccountNumber),

    /// The record store cannot be opened for writing
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Record file is malformed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Administrative secret mismatch
    #[error("Wrong admin secret")]
    Unauthorized,
}

impl LedgerError {
    /// Create a "not found" error for an account
    pub fn account_not_found(account: AccountNumber) -> Self {
        Self::NotFound { account }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::account_not_found(AccountNumber::new(1001));
        assert_eq!(err.to_string(), "Account not found: 1001");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = LedgerError::InsufficientFunds {
            account: AccountNumber::new(1001),
            requested: Money::from_cents(100000),
            available: Money::from_cents(75000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account 1001: requested 1000.00, available 750.00"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
