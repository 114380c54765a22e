//! File-backed persistence for the account book.

use crate::book::AccountBook;
use crate::error::Result;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Path of the backing file.
    pub path: PathBuf,

    /// Move an undecodable backing file aside to `<path>.corrupt` at load
    /// time instead of leaving it to be overwritten by the next save.
    pub preserve_corrupt: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./accounts.json"),
            preserve_corrupt: false,
        }
    }
}

impl StoreConfig {
    /// Config for the given backing file path with default options.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// How a load obtained its book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// No backing file yet; the session starts empty.
    Missing,

    /// Backing file decoded cleanly.
    Decoded,

    /// Backing file was present but empty or undecodable. The session
    /// starts empty and the next save replaces the file.
    Corrupt { detail: String },
}

impl LoadStatus {
    /// True for the recoverable corrupt-store case.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadStatus::Corrupt { .. })
    }
}

/// The file-backed record store.
///
/// Owns the on-disk representation: one UTF-8 JSON object mapping holder
/// names to account records. Load and save move the whole book at once;
/// there is no partial read or write.
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    /// Create a store handle. No I/O happens until `load` or `save`.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Sibling path an unreadable backing file is moved to.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name: OsString = self.config.path.clone().into_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Load the book from the backing file.
    ///
    /// A missing file yields an empty book. A file that is present but
    /// empty or undecodable also yields an empty book, reported through
    /// `LoadStatus::Corrupt` rather than an error. Any other filesystem
    /// failure propagates.
    pub fn load(&self) -> Result<(AccountBook, LoadStatus)> {
        let raw = match fs::read(&self.config.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.config.path.display(), "no backing file, starting empty");
                return Ok((AccountBook::new(), LoadStatus::Missing));
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<AccountBook>(&raw) {
            Ok(mut book) => {
                book.adopt_keys();
                debug!(
                    path = %self.config.path.display(),
                    accounts = book.len(),
                    "loaded book"
                );
                Ok((book, LoadStatus::Decoded))
            }
            Err(e) => {
                warn!(
                    path = %self.config.path.display(),
                    error = %e,
                    "backing file empty or corrupt, starting with an empty book"
                );
                if self.config.preserve_corrupt {
                    self.preserve_corrupt_file()?;
                }
                let status = LoadStatus::Corrupt {
                    detail: e.to_string(),
                };
                Ok((AccountBook::new(), status))
            }
        }
    }

    /// Serialize the whole book and overwrite the backing file.
    ///
    /// The write is a single whole-file rewrite with no atomicity
    /// guarantee; a crash mid-write leaves a file the next `load` treats
    /// as corrupt. Encoding is pretty-printed JSON and round-trips exactly.
    pub fn save(&self, book: &AccountBook) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(book)?;
        fs::write(&self.config.path, encoded)?;
        debug!(
            path = %self.config.path.display(),
            accounts = book.len(),
            "saved book"
        );
        Ok(())
    }

    /// Rename the unreadable backing file to its `.corrupt` sibling.
    fn preserve_corrupt_file(&self) -> Result<()> {
        let backup = self.corrupt_path();
        fs::rename(&self.config.path, &backup)?;
        info!(
            from = %self.config.path.display(),
            to = %backup.display(),
            "preserved corrupt backing file"
        );
        Ok(())
    }
}
