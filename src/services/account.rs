//! Account service
//!
//! Provides account lifecycle operations: creation with sequential numbering,
//! credential checks, lookups, edits, and soft deletion.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money};
use crate::storage::Storage;

use super::require_active;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    ///
    /// The number is one past the highest ever assigned. A negative initial
    /// deposit is clamped to zero.
    pub fn create(
        &self,
        holder_name: &str,
        credential: &str,
        initial_deposit: Money,
    ) -> LedgerResult<Account> {
        let _guard = self.storage.exclusive()?;

        let number = self.storage.accounts.next_account_number()?;
        let account = Account::new(
            number,
            holder_name,
            credential,
            initial_deposit.clamp_non_negative(),
        );

        account
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.accounts.append(&account)?;

        tracing::info!(account = %account.number, balance = %account.balance, "account created");
        Ok(account)
    }

    /// Check a credential against an active account
    pub fn authenticate(
        &self,
        number: AccountNumber,
        credential: &str,
    ) -> LedgerResult<AccountNumber> {
        let account = require_active(self.storage, number)?;

        if !account.credential_matches(credential) {
            tracing::warn!(account = %number, "credential rejected");
            return Err(LedgerError::Rejected(number));
        }

        tracing::debug!(account = %number, "authenticated");
        Ok(number)
    }

    /// Get an active account
    pub fn view(&self, number: AccountNumber) -> LedgerResult<Account> {
        require_active(self.storage, number)
    }

    /// Change the holder name and/or credential
    ///
    /// `None` or blank values leave the current value in place.
    pub fn modify(
        &self,
        number: AccountNumber,
        new_name: Option<&str>,
        new_credential: Option<&str>,
    ) -> LedgerResult<Account> {
        let _guard = self.storage.exclusive()?;

        let mut account = require_active(self.storage, number)?;

        let name_changed = match new_name {
            Some(name) if !name.is_empty() => {
                account.holder_name = name.to_string();
                true
            }
            _ => false,
        };
        let credential_changed = match new_credential {
            Some(credential) if !credential.is_empty() => {
                account.credential = credential.to_string();
                true
            }
            _ => false,
        };

        account
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.accounts.update_by_key(&account)?;

        tracing::info!(account = %number, name_changed, credential_changed, "account modified");
        Ok(account)
    }

    /// Soft-delete an account
    ///
    /// Returns whether the account was deleted; without confirmation nothing
    /// is written. The record stays in storage and its number is never reused.
    pub fn delete(&self, number: AccountNumber, confirmed: bool) -> LedgerResult<bool> {
        let _guard = self.storage.exclusive()?;

        let mut account = require_active(self.storage, number)?;
        if !confirmed {
            tracing::debug!(account = %number, "deletion not confirmed");
            return Ok(false);
        }

        account.deactivate();
        self.storage.accounts.update_by_key(&account)?;

        tracing::info!(account = %number, "account deleted");
        Ok(true)
    }

    /// All active accounts in storage order
    pub fn list_active(&self) -> LedgerResult<Vec<Account>> {
        self.storage.accounts.list_active()
    }
}
