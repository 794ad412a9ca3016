//! Account model
//!
//! The sole entity of the ledger: a numbered balance with a holder name and a
//! shared-secret credential. Accounts are never physically removed; deletion
//! clears the `active` flag.

use std::fmt;

use super::ids::AccountNumber;
use super::money::Money;

/// Maximum holder name length in bytes (record field holds one more for NUL)
pub const MAX_NAME_BYTES: usize = 99;

/// Maximum credential length in bytes (record field holds one more for NUL)
pub const MAX_CREDENTIAL_BYTES: usize = 31;

/// A ledger account
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique, immutable account number
    pub number: AccountNumber,

    /// Account holder's name
    pub holder_name: String,

    /// Password-equivalent shared secret
    pub credential: String,

    /// Current balance, never negative once an operation completes
    pub balance: Money,

    /// False once the account has been soft-deleted
    pub active: bool,
}

impl Account {
    /// Create a new active account
    pub fn new(
        number: AccountNumber,
        holder_name: impl Into<String>,
        credential: impl Into<String>,
        balance: Money,
    ) -> Self {
        Self {
            number,
            holder_name: holder_name.into(),
            credential: credential.into(),
            balance,
            active: true,
        }
    }

    /// Exact credential comparison
    pub fn credential_matches(&self, attempt: &str) -> bool {
        self.credential == attempt
    }

    /// Mark this account as deleted
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Validate field bounds before the account is written
    ///
    /// Only what the fixed-width record cannot hold is rejected; blank names
    /// are stored as given.
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.holder_name.len() > MAX_NAME_BYTES {
            return Err(AccountValidationError::NameTooLong(self.holder_name.len()));
        }

        if self.holder_name.contains('\0') || self.credential.contains('\0') {
            return Err(AccountValidationError::EmbeddedNul);
        }

        if self.credential.len() > MAX_CREDENTIAL_BYTES {
            return Err(AccountValidationError::CredentialTooLong(
                self.credential.len(),
            ));
        }

        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.balance));
        }

        Ok(())
    }
}

// Credentials stay out of debug output and therefore out of logs.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("number", &self.number)
            .field("holder_name", &self.holder_name)
            .field("credential", &"<redacted>")
            .field("balance", &self.balance)
            .field("active", &self.active)
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.holder_name)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    NameTooLong(usize),
    CredentialTooLong(usize),
    EmbeddedNul,
    NegativeBalance(Money),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooLong(len) => write!(
                f,
                "Holder name too long ({} bytes, max {})",
                len, MAX_NAME_BYTES
            ),
            Self::CredentialTooLong(len) => write!(
                f,
                "Password too long ({} bytes, max {})",
                len, MAX_CREDENTIAL_BYTES
            ),
            Self::EmbeddedNul => write!(f, "Text fields cannot contain NUL characters"),
            Self::NegativeBalance(balance) => {
                write!(f, "Balance cannot be negative ({})", balance)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
