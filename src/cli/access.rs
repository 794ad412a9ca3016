//! Access gates for the command groups
//!
//! The admin secret and account logins decide who may call which ledger
//! operations; they are not ledger operations themselves.

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::AccountNumber;
use crate::services::AccountService;
use crate::storage::Storage;

/// Check the admin secret, prompting for it when not supplied
pub fn verify_admin(settings: &Settings, supplied: Option<String>) -> LedgerResult<()> {
    if settings.uses_default_admin_secret() {
        tracing::warn!("admin secret is the shipped default; set admin_secret in config.json");
    }

    let attempt = match supplied {
        Some(secret) => secret,
        None => prompt_secret("Enter admin password: ")?,
    };

    if attempt == settings.admin_secret {
        Ok(())
    } else {
        tracing::warn!("admin secret rejected");
        Err(LedgerError::Unauthorized)
    }
}

/// Authenticate an account holder, prompting for the password when not supplied
pub fn login(
    storage: &Storage,
    account: AccountNumber,
    supplied: Option<String>,
) -> LedgerResult<AccountNumber> {
    let password = match supplied {
        Some(password) => password,
        None => prompt_secret("Password: ")?,
    };

    AccountService::new(storage).authenticate(account, &password)
}

/// Read a secret from the terminal without echo
pub fn prompt_secret(prompt: &str) -> LedgerResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| LedgerError::Io(format!("Failed to read password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_verify_admin() {
        let settings = Settings {
            admin_secret: "letmein".into(),
            ..Settings::default()
        };

        assert!(verify_admin(&settings, Some("letmein".into())).is_ok());
        assert!(matches!(
            verify_admin(&settings, Some("admin123".into())),
            Err(LedgerError::Unauthorized)
        ));
    }

    #[test]
    fn test_login() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::at(temp_dir.path().join("accounts.dat"));
        let number = AccountService::new(&storage)
            .create("Asha", "pw", Money::zero())
            .unwrap()
            .number;

        assert_eq!(login(&storage, number, Some("pw".into())).unwrap(), number);
        assert!(matches!(
            login(&storage, number, Some("nope".into())),
            Err(LedgerError::Rejected(_))
        ));
    }
}
