//! Durable JSON document store.
//!
//! # Responsibility
//! - Persist one collection per file as a human-diffable JSON document.
//! - Recover missing or corrupt documents to a caller-supplied default.
//!
//! # Invariants
//! - `save` fully overwrites the target file. Writes are not atomic; a crash
//!   mid-write can leave a corrupt document, which the next `load` replaces.
//! - Corrupt content is discarded on recovery; there is no backup.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json;

pub use json::{load, save, LoadStatus, Loaded};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Reading, writing or creating the document location failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The in-memory collection could not be encoded.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage I/O failed at `{}`: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "failed to encode `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}
