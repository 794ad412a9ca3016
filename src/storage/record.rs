//! Fixed-width binary record codec
//!
//! Every account occupies exactly [`RECORD_SIZE`] bytes, so record `i` starts at
//! byte `i * RECORD_SIZE` and can be overwritten in place. There is no file
//! header, record count, or checksum.
//!
//! ```text
//! offset  size  field
//!      0     4  account number (i32, little-endian)
//!      4   100  holder name (UTF-8, NUL-padded)
//!    104    32  credential (UTF-8, NUL-padded)
//!    136     8  balance (f64, little-endian, currency units)
//!    144     4  active flag (i32, 0 or 1)
//!    148     4  padding (zero)
//! ```

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money, MAX_CREDENTIAL_BYTES, MAX_NAME_BYTES};

/// Size of one encoded account record in bytes
pub const RECORD_SIZE: usize = 152;

const NUMBER_OFFSET: usize = 0;
const NAME_OFFSET: usize = 4;
const NAME_LEN: usize = MAX_NAME_BYTES + 1;
const CREDENTIAL_OFFSET: usize = NAME_OFFSET + NAME_LEN;
const CREDENTIAL_LEN: usize = MAX_CREDENTIAL_BYTES + 1;
const BALANCE_OFFSET: usize = CREDENTIAL_OFFSET + CREDENTIAL_LEN;
const ACTIVE_OFFSET: usize = BALANCE_OFFSET + 8;

const _: () = assert!(ACTIVE_OFFSET + 8 == RECORD_SIZE);

/// One raw record buffer
pub type RecordBuf = [u8; RECORD_SIZE];

/// Byte offset of the record at `index`
pub fn offset_of(index: u64) -> u64 {
    index * RECORD_SIZE as u64
}

/// Encode an account into its fixed-width form
///
/// Text longer than its field (leaving room for the terminating NUL) is
/// rejected rather than truncated, as is a balance the f64 field cannot hold
/// to the hundredth.
pub fn encode(account: &Account) -> LedgerResult<RecordBuf> {
    if !account.balance.is_storable() {
        return Err(LedgerError::Validation(format!(
            "Balance {} of account {} exceeds the maximum {}",
            account.balance,
            account.number,
            Money::MAX
        )));
    }

    let mut buf = [0u8; RECORD_SIZE];

    buf[NUMBER_OFFSET..NUMBER_OFFSET + 4].copy_from_slice(&account.number.value().to_le_bytes());
    write_text(
        &mut buf[NAME_OFFSET..NAME_OFFSET + NAME_LEN],
        &account.holder_name,
        "holder name",
        account.number,
    )?;
    write_text(
        &mut buf[CREDENTIAL_OFFSET..CREDENTIAL_OFFSET + CREDENTIAL_LEN],
        &account.credential,
        "password",
        account.number,
    )?;
    buf[BALANCE_OFFSET..BALANCE_OFFSET + 8].copy_from_slice(&account.balance.to_f64().to_le_bytes());
    buf[ACTIVE_OFFSET..ACTIVE_OFFSET + 4].copy_from_slice(&i32::from(account.active).to_le_bytes());

    Ok(buf)
}

/// Decode a full account from a record buffer
pub fn decode(buf: &RecordBuf) -> LedgerResult<Account> {
    let (number, active) = decode_key(buf);

    let raw_balance = f64::from_le_bytes(read_array(buf, BALANCE_OFFSET));
    let balance = Money::from_f64(raw_balance).ok_or_else(|| {
        LedgerError::Storage(format!(
            "Record for account {} has an unreadable or out-of-range balance",
            number
        ))
    })?;

    Ok(Account {
        number,
        holder_name: read_text(&buf[NAME_OFFSET..NAME_OFFSET + NAME_LEN]),
        credential: read_text(&buf[CREDENTIAL_OFFSET..CREDENTIAL_OFFSET + CREDENTIAL_LEN]),
        balance,
        active,
    })
}

/// Decode only the key and active flag, enough to build an index
pub fn decode_key(buf: &RecordBuf) -> (AccountNumber, bool) {
    let number = i32::from_le_bytes(read_array(buf, NUMBER_OFFSET));
    let active = i32::from_le_bytes(read_array(buf, ACTIVE_OFFSET)) != 0;
    (AccountNumber::new(number), active)
}

fn read_array<const N: usize>(buf: &RecordBuf, offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    out
}

fn read_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn write_text(
    field: &mut [u8],
    value: &str,
    label: &str,
    number: AccountNumber,
) -> LedgerResult<()> {
    let bytes = value.as_bytes();
    if bytes.len() >= field.len() {
        return Err(LedgerError::Validation(format!(
            "{} for account {} is {} bytes, max {}",
            label,
            number,
            bytes.len(),
            field.len() - 1
        )));
    }
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account::new(
            AccountNumber::new(1001),
            "Asha Rao",
            "hunter2",
            Money::from_cents(75025),
        )
    }

    #[test]
    fn test_layout_offsets() {
        assert_eq!(CREDENTIAL_OFFSET, 104);
        assert_eq!(BALANCE_OFFSET, 136);
        assert_eq!(ACTIVE_OFFSET, 144);
        assert_eq!(offset_of(3), 456);
    }

    #[test]
    fn test_encode_field_positions() {
        let buf = encode(&sample()).unwrap();

        assert_eq!(&buf[0..4], &1001i32.to_le_bytes());
        assert_eq!(&buf[4..12], b"Asha Rao");
        assert_eq!(buf[12], 0);
        assert_eq!(&buf[104..111], b"hunter2");
        assert_eq!(&buf[136..144], &750.25f64.to_le_bytes());
        assert_eq!(&buf[144..148], &1i32.to_le_bytes());
        assert_eq!(&buf[148..152], &[0u8; 4]);
    }

    #[test]
    fn test_decode_matches_encoded_account() {
        let mut account = sample();
        account.deactivate();

        let decoded = decode(&encode(&account).unwrap()).unwrap();
        assert_eq!(decoded, account);
        assert_eq!(decode_key(&encode(&account).unwrap()), (account.number, false));
    }

    #[test]
    fn test_decode_stops_at_first_nul() {
        let mut buf = encode(&sample()).unwrap();
        // Garbage after the terminator is ignored
        buf[NAME_OFFSET + 9] = b'Z';
        assert_eq!(decode(&buf).unwrap().holder_name, "Asha Rao");
    }

    #[test]
    fn test_any_nonzero_active_flag_is_active() {
        let mut buf = encode(&sample()).unwrap();
        buf[ACTIVE_OFFSET..ACTIVE_OFFSET + 4].copy_from_slice(&7i32.to_le_bytes());
        assert!(decode(&buf).unwrap().active);
    }

    #[test]
    fn test_encode_rejects_overlong_text() {
        let mut account = sample();
        account.holder_name = "n".repeat(NAME_LEN);
        assert!(encode(&account).unwrap_err().is_validation());

        let mut account = sample();
        account.credential = "p".repeat(CREDENTIAL_LEN);
        assert!(encode(&account).unwrap_err().is_validation());

        let mut account = sample();
        account.credential = "p".repeat(CREDENTIAL_LEN - 1);
        assert!(encode(&account).is_ok());
    }

    #[test]
    fn test_balance_limit() {
        let mut account = sample();
        account.balance = Money::MAX;
        let buf = encode(&account).unwrap();
        assert_eq!(decode(&buf).unwrap().balance, Money::MAX);

        account.balance = Money::from_cents(9_007_199_254_740_993);
        assert!(encode(&account).unwrap_err().is_validation());

        let mut buf = encode(&sample()).unwrap();
        buf[BALANCE_OFFSET..BALANCE_OFFSET + 8].copy_from_slice(&1.0e17f64.to_le_bytes());
        assert!(matches!(decode(&buf), Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_decode_rejects_nan_balance() {
        let mut buf = encode(&sample()).unwrap();
        buf[BALANCE_OFFSET..BALANCE_OFFSET + 8].copy_from_slice(&f64::NAN.to_le_bytes());
        assert!(matches!(decode(&buf), Err(LedgerError::Storage(_))));
    }
}
