//! Account number newtype
//!
//! Account numbers are assigned sequentially, never reused, and fit the
//! 32-bit field of the record file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an account in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(i32);

impl AccountNumber {
    /// Number handed to the first account of an empty store
    pub const FIRST: AccountNumber = AccountNumber(1001);

    /// Wrap a raw account number
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// The number following this one, if it still fits the record field
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AccountNumber {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl FromStr for AccountNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number() {
        assert_eq!(AccountNumber::FIRST.value(), 1001);
    }

    #[test]
    fn test_next() {
        assert_eq!(AccountNumber::new(1001).next(), Some(AccountNumber::new(1002)));
        assert_eq!(AccountNumber::new(i32::MAX).next(), None);
    }

    #[test]
    fn test_parse_and_display() {
        let n: AccountNumber = " 1042 ".parse().unwrap();
        assert_eq!(n, AccountNumber::new(1042));
        assert_eq!(n.to_string(), "1042");
        assert!("abc".parse::<AccountNumber>().is_err());
    }
}
