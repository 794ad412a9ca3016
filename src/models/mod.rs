//! Core data models for the ledger
//!
//! The ledger has one entity, the account, plus the value types it is built
//! from: account numbers and money amounts.

pub mod account;
pub mod ids;
pub mod money;

pub use account::{Account, AccountValidationError, MAX_CREDENTIAL_BYTES, MAX_NAME_BYTES};
pub use ids::AccountNumber;
pub use money::{Money, MoneyParseError};
