//! Transfer service
//!
//! Moves money between two active accounts. Both new balances are committed
//! through one paired store update: if writing the destination fails, the
//! source record is restored and the transfer fails as a whole.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money};
use crate::storage::Storage;

use super::{require_active, require_positive};

/// Service for transfers between accounts
pub struct TransferService<'a> {
    storage: &'a Storage,
}

/// Result of a completed transfer
#[derive(Debug, Clone)]
pub struct TransferResult {
    /// Source account after the debit
    pub from: Account,
    /// Destination account after the credit
    pub to: Account,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Move `amount` from one account to another
    pub fn transfer(
        &self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Money,
    ) -> LedgerResult<TransferResult> {
        if from == to {
            return Err(LedgerError::SameAccount(from));
        }
        require_positive(amount)?;

        let _guard = self.storage.exclusive()?;

        let mut source = require_active(self.storage, from)?;
        let mut destination = require_active(self.storage, to)?;

        if amount > source.balance {
            tracing::warn!(from = %from, to = %to, amount = %amount, balance = %source.balance, "transfer exceeds balance");
            return Err(LedgerError::InsufficientFunds {
                account: from,
                requested: amount,
                available: source.balance,
            });
        }

        destination.balance = destination.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Transfer of {} would take account {} past the maximum balance {}",
                amount,
                to,
                Money::MAX
            ))
        })?;
        source.balance -= amount;

        self.storage.accounts.update_pair(&source, &destination)?;

        tracing::info!(from = %from, to = %to, amount = %amount, "transfer");
        Ok(TransferResult {
            from: source,
            to: destination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AccountService, FundsService};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, AccountNumber, AccountNumber) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::at(temp_dir.path().join("accounts.dat"));
        let accounts = AccountService::new(&storage);
        let a = accounts.create("Asha", "pw", Money::from_cents(75000)).unwrap().number;
        let b = accounts.create("Ravi", "pw", Money::zero()).unwrap().number;
        (temp_dir, storage, a, b)
    }

    fn balance(storage: &Storage, number: AccountNumber) -> Money {
        AccountService::new(storage).view(number).unwrap().balance
    }

    #[test]
    fn test_transfer_conserves_total() {
        let (_temp_dir, storage, a, b) = setup();
        let service = TransferService::new(&storage);

        let result = service.transfer(a, b, Money::from_cents(30000)).unwrap();
        assert_eq!(result.from.balance.cents(), 45000);
        assert_eq!(result.to.balance.cents(), 30000);

        assert_eq!(balance(&storage, a).cents(), 45000);
        assert_eq!(balance(&storage, b).cents(), 30000);
        assert_eq!((balance(&storage, a) + balance(&storage, b)).cents(), 75000);
    }

    #[test]
    fn test_transfer_to_self_is_rejected() {
        let (_temp_dir, storage, a, _b) = setup();
        let service = TransferService::new(&storage);

        assert!(matches!(
            service.transfer(a, a, Money::from_cents(100)),
            Err(LedgerError::SameAccount(n)) if n == a
        ));
    }

    #[test]
    fn test_transfer_rejects_bad_amounts() {
        let (_temp_dir, storage, a, b) = setup();
        let service = TransferService::new(&storage);

        assert!(matches!(
            service.transfer(a, b, Money::zero()),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.transfer(a, b, Money::from_cents(75001)),
            Err(LedgerError::InsufficientFunds { account, .. }) if account == a
        ));
        assert_eq!(balance(&storage, a).cents(), 75000);
        assert_eq!(balance(&storage, b).cents(), 0);
    }

    #[test]
    fn test_transfer_reports_missing_side() {
        let (_temp_dir, storage, a, b) = setup();
        let service = TransferService::new(&storage);
        let ghost = AccountNumber::new(4242);

        match service.transfer(ghost, b, Money::from_cents(1)) {
            Err(LedgerError::NotFound { account }) => assert_eq!(account, ghost),
            other => panic!("unexpected: {other:?}"),
        }

        AccountService::new(&storage).delete(b, true).unwrap();
        match service.transfer(a, b, Money::from_cents(1)) {
            Err(LedgerError::NotFound { account }) => assert_eq!(account, b),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(balance(&storage, a).cents(), 75000);
    }

    #[test]
    fn test_transfer_past_max_balance_is_rejected() {
        let (_temp_dir, storage, a, b) = setup();
        FundsService::new(&storage)
            .deposit(b, Money::from_cents(Money::MAX.cents() - 100))
            .unwrap();

        let err = TransferService::new(&storage)
            .transfer(a, b, Money::from_cents(101))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(balance(&storage, a).cents(), 75000);
        assert_eq!(balance(&storage, b).cents(), Money::MAX.cents() - 100);
    }

    #[test]
    fn test_transfer_whole_balance_then_back() {
        let (_temp_dir, storage, a, b) = setup();
        let service = TransferService::new(&storage);

        service.transfer(a, b, Money::from_cents(75000)).unwrap();
        assert_eq!(balance(&storage, a), Money::zero());

        service.transfer(b, a, Money::from_cents(75000)).unwrap();
        assert_eq!(balance(&storage, a).cents(), 75000);
        assert_eq!(balance(&storage, b), Money::zero());

        FundsService::new(&storage).deposit(b, Money::from_cents(1)).unwrap();
        assert_eq!(balance(&storage, b).cents(), 1);
    }
}
