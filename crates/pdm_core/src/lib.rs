//! Core domain logic for the personal data manager.
//! This crate is the single source of truth for record invariants.

pub mod calc;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod transfer;

pub use calc::{evaluate, CalcError};
pub use config::{AppConfig, LoggingConfig, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactDraft, ContactPatch};
pub use model::date::{format_date, parse_date, DateParseError, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use model::finance::{FinanceDraft, FinancePatch, FinanceRecord};
pub use model::note::{Note, NoteDraft, NotePatch};
pub use model::record::{CollectionKind, Record, RecordId, ValidationError};
pub use model::task::{Task, TaskDraft, TaskPatch, TaskPriority};
pub use repo::collection::Collection;
pub use repo::{RepoError, RepoResult};
pub use service::finance::{
    filter_records, generate_report, Boundary, FinanceQuery, FinanceQueryError, FinanceReport,
};
pub use store::{LoadStatus, Loaded, StoreError, StoreResult};
pub use transfer::{export_csv, import_csv, CsvRecord, ImportSummary, TransferError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
