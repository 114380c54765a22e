//! Session handle tying the book and its backing store together.

use crate::book::AccountBook;
use crate::error::Result;
use crate::report;
use crate::store::{FileStore, LoadStatus, StoreConfig};
use crate::types::{Account, AccountUpdate};
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use tracing::debug;

/// A single-session handle over the account book and its backing file.
///
/// Opening a ledger loads the store exactly once; every successful
/// mutation rewrites the full book before returning (write-through, no
/// batching), and failed preconditions write nothing. Mutations commit
/// to the session's book only after the save succeeds, so a failed call
/// leaves the book as it was. The handle is internally synchronized so
/// it can be shared behind an `Arc`, but the backing file itself still
/// expects one session at a time.
pub struct Ledger {
    /// Persistence for the book.
    store: FileStore,

    /// The session's account book.
    book: RwLock<AccountBook>,

    /// How the book was obtained at open time.
    load_status: LoadStatus,

    /// Serializes mutate-then-persist pairs.
    write_lock: Mutex<()>,
}

impl Ledger {
    /// Open a ledger, loading the book from the backing file once.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = FileStore::new(config);
        let (book, load_status) = store.load()?;
        Ok(Self {
            store,
            book: RwLock::new(book),
            load_status,
            write_lock: Mutex::new(()),
        })
    }

    /// How this session's book was obtained. `LoadStatus::Corrupt` is the
    /// recoverable warning callers are expected to surface.
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    // --- Mutations ---

    /// Create a new account and persist the book.
    ///
    /// Fails with `AlreadyExists` if the holder already has an account;
    /// nothing is persisted on failure. Returns the created record.
    pub fn create(&self, holder: &str, pin: &str, balance: f64) -> Result<Account> {
        let _guard = self.write_lock.lock();

        // Mutate a staged copy; the session adopts it only once it is
        // on disk.
        let account = Account::new(holder, pin, balance);
        let mut staged = self.book.read().clone();
        staged.insert(account.clone())?;
        self.store.save(&staged)?;
        *self.book.write() = staged;

        debug!(holder, "created account");
        Ok(account)
    }

    /// Apply a partial update to an existing account and persist the book.
    ///
    /// Fails with `NotFound` if the holder is absent; nothing is persisted
    /// on failure. A successful call persists exactly once, whether or not
    /// any field value changed. Returns the post-update record.
    pub fn update(&self, holder: &str, update: AccountUpdate) -> Result<Account> {
        let _guard = self.write_lock.lock();

        let mut staged = self.book.read().clone();
        let updated = staged.apply(holder, update)?.clone();
        self.store.save(&staged)?;
        *self.book.write() = staged;

        debug!(holder, "updated account");
        Ok(updated)
    }

    /// Delete an account and persist the book.
    ///
    /// Fails with `NotFound` if the holder is absent; nothing is persisted
    /// on failure. Returns the removed record.
    pub fn delete(&self, holder: &str) -> Result<Account> {
        let _guard = self.write_lock.lock();

        let mut staged = self.book.read().clone();
        let removed = staged.remove(holder)?;
        self.store.save(&staged)?;
        *self.book.write() = staged;

        debug!(holder, "deleted account");
        Ok(removed)
    }

    // --- Reads (never write) ---

    /// All accounts, sorted by holder name for stable presentation.
    pub fn accounts(&self) -> Vec<Account> {
        let book = self.book.read();
        let mut accounts: Vec<Account> = book.accounts().cloned().collect();
        accounts.sort_by(|a, b| a.holder.cmp(&b.holder));
        accounts
    }

    /// Look up a single account.
    pub fn get(&self, holder: &str) -> Option<Account> {
        self.book.read().get(holder).cloned()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.book.read().len()
    }

    /// Whether the book holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.book.read().is_empty()
    }

    /// All accounts tied for the highest balance. Empty book yields none.
    pub fn richest(&self) -> Vec<Account> {
        let book = self.book.read();
        report::tied_maxima(book.accounts().map(|a| (a, a.balance)))
            .into_iter()
            .cloned()
            .collect()
    }
}
