//! # Passbook
//!
//! A file-backed account record store: one JSON file holding a set of
//! holder-keyed accounts, mutated through a session handle that writes the
//! whole book back after every change.
//!
//! ## Core Concepts
//!
//! - **Accounts**: Holder-keyed records carrying a PIN and a balance
//! - **Book**: The in-memory record set, keyed by holder name
//! - **Store**: The backing file, loaded once per session and rewritten
//!   whole on every mutation
//! - **Ledger**: The session handle exposing create, list, update, delete
//!
//! ## Example
//!
//! ```ignore
//! use passbook::{AccountUpdate, Ledger, StoreConfig};
//!
//! let ledger = Ledger::open(StoreConfig {
//!     path: "./accounts.json".into(),
//!     ..Default::default()
//! })?;
//!
//! ledger.create("Alice", "1234", 500.0)?;
//! ledger.update("Alice", AccountUpdate::new().with_balance(750.0))?;
//!
//! for account in ledger.accounts() {
//!     println!("{}: {:.2}", account.holder, account.balance);
//! }
//! ```
//!
//! ## Corrupt backing files
//!
//! A backing file that exists but cannot be decoded is not an error. The
//! session starts with an empty book, the condition is reported through
//! `LoadStatus::Corrupt` plus a `tracing` warning, and the next save
//! overwrites the file. The old content is lost under that default; set
//! `StoreConfig::preserve_corrupt` to have the unreadable file moved aside
//! to `<path>.corrupt` before the session can overwrite it.

pub mod book;
pub mod error;
pub mod ledger;
pub mod report;
pub mod store;
pub mod types;

// Re-exports
pub use book::AccountBook;
pub use error::{Result, StoreError};
pub use ledger::Ledger;
pub use report::tied_maxima;
pub use store::{FileStore, LoadStatus, StoreConfig};
pub use types::{Account, AccountUpdate};
