//! Account record store
//!
//! Manages the fixed-width record file: appends new accounts, scans in storage
//! order, and overwrites records in place by account number.
//!
//! Lookups go through an in-memory index from account number to record
//! position. The index is built by one scan, maintained on append, dropped
//! when an update flips an active flag, and rebuilt whenever the file length
//! no longer matches the length it was built from. Its answers are the same as
//! a linear scan: the first record with a key for updates, the first active
//! record with a key for lookups, and the maximum key for numbering.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber};

use super::file_io::{open_for_append, open_for_read, open_for_update};
use super::record::{self, RecordBuf, RECORD_SIZE};

/// Positions of the records carrying one account number
#[derive(Debug, Clone, Copy)]
struct Slot {
    first: u64,
    first_active: Option<u64>,
}

#[derive(Debug, Default)]
struct Index {
    file_len: u64,
    slots: HashMap<AccountNumber, Slot>,
    max_number: Option<AccountNumber>,
}

impl Index {
    fn record(&mut self, position: u64, number: AccountNumber, active: bool) {
        let slot = self.slots.entry(number).or_insert(Slot {
            first: position,
            first_active: None,
        });
        if active && slot.first_active.is_none() {
            slot.first_active = Some(position);
        }
        if self.max_number.map_or(true, |max| number > max) {
            self.max_number = Some(number);
        }
    }
}

/// Durable store of account records
pub struct AccountStore {
    path: PathBuf,
    index: RwLock<Option<Index>>,
}

impl AccountStore {
    /// Create a store backed by the record file at `path`
    ///
    /// Nothing is opened until the first operation.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            index: RwLock::new(None),
        }
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate over every record in storage order
    ///
    /// Each call re-reads from the start of the file. A missing file yields
    /// nothing.
    pub fn scan_all(&self) -> Records {
        Records {
            reader: open_for_read(&self.path).map(BufReader::new),
            path: self.path.clone(),
            position: 0,
        }
    }

    /// All active accounts in storage order
    pub fn list_active(&self) -> LedgerResult<Vec<Account>> {
        self.scan_all()
            .filter(|res| res.as_ref().map_or(true, |a| a.active))
            .collect()
    }

    /// Append a new record
    ///
    /// The caller is responsible for the account number being unused.
    pub fn append(&self, account: &Account) -> LedgerResult<()> {
        let buf = record::encode(account)?;
        let mut file = open_for_append(&self.path)?;

        let len = file.metadata()?.len();
        if len % RECORD_SIZE as u64 != 0 {
            return Err(misaligned(&self.path, len));
        }

        file.write_all(&buf)?;
        file.sync_data()?;

        tracing::debug!(account = %account.number, position = len / RECORD_SIZE as u64, "appended record");

        let mut guard = self.write_index()?;
        match guard.as_mut() {
            Some(index) if index.file_len == len => {
                index.record(len / RECORD_SIZE as u64, account.number, account.active);
                index.file_len = len + RECORD_SIZE as u64;
            }
            _ => *guard = None,
        }

        Ok(())
    }

    /// Find the first active record with this account number
    ///
    /// Returns a copy; inactive records are treated as absent.
    pub fn find_by_key(&self, number: AccountNumber) -> LedgerResult<Option<Account>> {
        let position = self.with_index(|index| {
            index.slots.get(&number).and_then(|slot| slot.first_active)
        })?;

        let Some(position) = position else {
            return Ok(None);
        };
        let Some(mut file) = open_for_read(&self.path) else {
            return Ok(None);
        };

        let buf = read_at(&mut file, position)?;
        let found = record::decode(&buf)?;
        if found.number == number && found.active {
            return Ok(Some(found));
        }

        // Rewritten behind our back without a length change
        tracing::debug!(account = %number, "index entry stale, falling back to scan");
        self.invalidate()?;
        for res in self.scan_all() {
            let account = res?;
            if account.number == number && account.active {
                return Ok(Some(account));
            }
        }
        Ok(None)
    }

    /// Overwrite the first record (active or not) with this account's number
    pub fn update_by_key(&self, account: &Account) -> LedgerResult<()> {
        self.update_many(&[account])
    }

    /// Overwrite two records as one commit
    ///
    /// Both positions are resolved before anything is written. If the second
    /// write fails the first record is restored to its previous contents.
    pub fn update_pair(&self, first: &Account, second: &Account) -> LedgerResult<()> {
        if first.number == second.number {
            return Err(LedgerError::Validation(format!(
                "Cannot update account {} twice in one commit",
                first.number
            )));
        }
        self.update_many(&[first, second])
    }

    /// Next unused account number: one past the highest ever stored, never below 1001
    pub fn next_account_number(&self) -> LedgerResult<AccountNumber> {
        let max = self.with_index(|index| index.max_number)?;

        match max {
            Some(max) if max >= AccountNumber::FIRST => max.next().ok_or_else(|| {
                LedgerError::Storage("Account numbers exhausted".into())
            }),
            _ => Ok(AccountNumber::FIRST),
        }
    }

    fn update_many(&self, accounts: &[&Account]) -> LedgerResult<()> {
        let encoded = accounts
            .iter()
            .map(|a| record::encode(a))
            .collect::<LedgerResult<Vec<_>>>()?;

        let mut file = open_for_update(&self.path)?;

        let mut targets = Vec::with_capacity(accounts.len());
        for account in accounts {
            targets.push(self.locate(&mut file, account.number)?);
        }

        let pending: Vec<PendingWrite> = targets
            .into_iter()
            .zip(encoded)
            .map(|((position, before), after)| PendingWrite {
                position,
                before,
                after,
            })
            .collect();

        if let Err(e) = commit(&mut file, &pending) {
            sync_restored(&file);
            return Err(e);
        }
        if let Err(e) = file.sync_data() {
            restore(&mut file, &pending);
            sync_restored(&file);
            return Err(e.into());
        }

        let flag_changed = pending
            .iter()
            .any(|w| record::decode_key(&w.before).1 != record::decode_key(&w.after).1);
        if flag_changed {
            self.invalidate()?;
        }

        for account in accounts {
            tracing::debug!(account = %account.number, "updated record in place");
        }
        Ok(())
    }

    /// Resolve the position and current contents of the first record with `number`
    fn locate(&self, file: &mut File, number: AccountNumber) -> LedgerResult<(u64, RecordBuf)> {
        for attempt in 0..2 {
            let position = self
                .with_index(|index| index.slots.get(&number).map(|slot| slot.first))?
                .ok_or(LedgerError::RecordNotFound(number))?;

            let buf = read_at(file, position)?;
            if record::decode_key(&buf).0 == number {
                return Ok((position, buf));
            }

            tracing::debug!(account = %number, attempt, "index entry stale, rebuilding");
            self.invalidate()?;
        }

        Err(LedgerError::Storage(format!(
            "Record for account {} moved during update",
            number
        )))
    }

    fn with_index<R>(&self, f: impl FnOnce(&Index) -> R) -> LedgerResult<R> {
        let current_len = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        {
            let guard = self.index.read().map_err(|e| {
                LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(index) = guard.as_ref() {
                if index.file_len == current_len {
                    return Ok(f(index));
                }
            }
        }

        let rebuilt = self.build_index()?;
        let result = f(&rebuilt);
        *self.write_index()? = Some(rebuilt);
        Ok(result)
    }

    fn build_index(&self) -> LedgerResult<Index> {
        let mut index = Index::default();

        let Some(file) = open_for_read(&self.path) else {
            return Ok(index);
        };
        let mut reader = BufReader::new(file);
        let mut buf = [0u8; RECORD_SIZE];
        let mut position = 0u64;

        while read_record(&mut reader, &mut buf, position, &self.path)? {
            let (number, active) = record::decode_key(&buf);
            index.record(position, number, active);
            position += 1;
        }
        index.file_len = position * RECORD_SIZE as u64;

        tracing::debug!(records = position, accounts = index.slots.len(), "built account index");
        Ok(index)
    }

    fn invalidate(&self) -> LedgerResult<()> {
        *self.write_index()? = None;
        Ok(())
    }

    fn write_index(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, Option<Index>>> {
        self.index
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Lazy iterator over stored records
///
/// Stops after the first error.
pub struct Records {
    reader: Option<BufReader<File>>,
    path: PathBuf,
    position: u64,
}

impl Iterator for Records {
    type Item = LedgerResult<Account>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let mut buf = [0u8; RECORD_SIZE];

        match read_record(reader, &mut buf, self.position, &self.path) {
            Ok(true) => {
                self.position += 1;
                Some(record::decode(&buf))
            }
            Ok(false) => {
                self.reader = None;
                None
            }
            Err(e) => {
                self.reader = None;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` with the next record; `false` on a clean end of file
fn read_record<R: Read>(
    reader: &mut R,
    buf: &mut RecordBuf,
    position: u64,
    path: &Path,
) -> LedgerResult<bool> {
    let mut filled = 0;
    while filled < RECORD_SIZE {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    match filled {
        0 => Ok(false),
        RECORD_SIZE => Ok(true),
        partial => Err(LedgerError::Storage(format!(
            "{} ends with a truncated record ({} of {} bytes at record {})",
            path.display(),
            partial,
            RECORD_SIZE,
            position
        ))),
    }
}

fn read_at(file: &mut File, position: u64) -> LedgerResult<RecordBuf> {
    let mut buf = [0u8; RECORD_SIZE];
    file.seek(SeekFrom::Start(record::offset_of(position)))?;
    file.read_exact(&mut buf)?;
    Ok(buf)
}

fn write_at<F: Write + Seek>(file: &mut F, position: u64, buf: &RecordBuf) -> LedgerResult<()> {
    file.seek(SeekFrom::Start(record::offset_of(position)))?;
    file.write_all(buf)?;
    Ok(())
}

/// One in-place overwrite with the contents it replaces
struct PendingWrite {
    position: u64,
    before: RecordBuf,
    after: RecordBuf,
}

/// Apply every write in order; on failure restore the ones already applied
fn commit<F: Write + Seek>(file: &mut F, pending: &[PendingWrite]) -> LedgerResult<()> {
    for (done, write) in pending.iter().enumerate() {
        if let Err(e) = write_at(file, write.position, &write.after) {
            restore(file, &pending[..done]);
            return Err(e);
        }
    }
    Ok(())
}

fn restore<F: Write + Seek>(file: &mut F, written: &[PendingWrite]) {
    for write in written.iter().rev() {
        if let Err(e) = write_at(file, write.position, &write.before) {
            tracing::error!(position = write.position, error = %e, "failed to restore record after aborted update");
            return;
        }
        tracing::warn!(position = write.position, "restored record after aborted update");
    }
}

fn sync_restored(file: &File) {
    if let Err(e) = file.sync_data() {
        tracing::error!(error = %e, "failed to sync restored records");
    }
}

fn misaligned(path: &Path, len: u64) -> LedgerError {
    LedgerError::Storage(format!(
        "{} is {} bytes, not a whole number of {}-byte records",
        path.display(),
        len,
        RECORD_SIZE
    ))
}
