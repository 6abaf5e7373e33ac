//! Application configuration passed explicitly to managers.
//!
//! # Responsibility
//! - Name the storage location of every collection.
//! - Carry logging level and directory for `init_logging`.
//!
//! # Invariants
//! - Exactly one file per collection kind; no process-wide location state.

use crate::logging::default_log_level;
use crate::model::record::{CollectionKind, Record};
use crate::repo::collection::Collection;
use crate::repo::RepoResult;
use std::path::{Path, PathBuf};

pub const DEFAULT_NOTES_FILE: &str = "notes.json";
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";
pub const DEFAULT_FINANCE_FILE: &str = "finance.json";
const DEFAULT_LOG_SUBDIR: &str = "logs";

/// Where each collection document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub notes_file: String,
    pub tasks_file: String,
    pub contacts_file: String,
    pub finance_file: String,
}

impl StorageConfig {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            notes_file: DEFAULT_NOTES_FILE.to_string(),
            tasks_file: DEFAULT_TASKS_FILE.to_string(),
            contacts_file: DEFAULT_CONTACTS_FILE.to_string(),
            finance_file: DEFAULT_FINANCE_FILE.to_string(),
        }
    }

    pub fn path_for(&self, kind: CollectionKind) -> PathBuf {
        let file = match kind {
            CollectionKind::Notes => &self.notes_file,
            CollectionKind::Tasks => &self.tasks_file,
            CollectionKind::Contacts => &self.contacts_file,
            CollectionKind::Finance => &self.finance_file,
        };
        self.data_dir.join(file)
    }

    /// Opens the collection of record type `R` at its configured path.
    pub fn open<R: Record>(&self) -> RepoResult<Collection<R>> {
        Collection::open(self.path_for(R::KIND))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// `None` disables file logging.
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Storage in `data_dir`, logs in `<data_dir>/logs` at the build default
    /// level.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            storage: StorageConfig::in_dir(data_dir),
            logging: Some(LoggingConfig::new(
                default_log_level(),
                data_dir.join(DEFAULT_LOG_SUBDIR),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, StorageConfig};
    use crate::model::record::CollectionKind;
    use std::path::Path;

    #[test]
    fn every_kind_gets_its_own_file() {
        let config = StorageConfig::in_dir("/data");
        let paths: Vec<_> = CollectionKind::ALL
            .iter()
            .map(|kind| config.path_for(*kind))
            .collect();
        assert_eq!(paths[0], Path::new("/data/notes.json"));
        assert_eq!(paths[3], Path::new("/data/finance.json"));
        for (index, path) in paths.iter().enumerate() {
            assert!(!paths[index + 1..].contains(path));
        }
    }

    #[test]
    fn app_config_places_logs_under_data_dir() {
        let config = AppConfig::in_dir("/data");
        let logging = config.logging.unwrap();
        assert_eq!(logging.log_dir, Path::new("/data/logs"));
    }
}
