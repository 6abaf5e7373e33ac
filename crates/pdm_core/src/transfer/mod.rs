//! CSV import/export for collections.
//!
//! # Responsibility
//! - Export one row per record with `id` plus the record fields.
//! - Import rows through `Collection::add`, allocating fresh ids.
//!
//! # Invariants
//! - Imported rows never keep the source `id` value.
//! - A malformed file or missing column fails before any record is added.
//! - Import is not transactional across rows: rows added before a failing
//!   row stay persisted.

use crate::model::record::{Record, RecordId};
use crate::repo::collection::Collection;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

mod records;
pub mod table;

pub use table::{Table, TableError, TableRow};

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a well-formed table.
    Malformed(TableError),
    /// A column required by import is missing from the header row.
    MissingColumn(&'static str),
    /// A data row could not be converted; `row` is 1-based, header excluded.
    Row { row: usize, message: String },
    /// The collection rejected a row or failed to persist it.
    Repo { row: usize, source: RepoError },
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot access `{}`: {source}", path.display()),
            Self::Malformed(err) => write!(f, "malformed table: {err}"),
            Self::MissingColumn(name) => write!(f, "missing required column `{name}`"),
            Self::Row { row, message } => write!(f, "row {row}: {message}"),
            Self::Repo { row, source } => write!(f, "row {row}: {source}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Repo { source, .. } => Some(source),
            Self::Malformed(_) | Self::MissingColumn(_) | Self::Row { .. } => None,
        }
    }
}

impl From<TableError> for TransferError {
    fn from(value: TableError) -> Self {
        Self::Malformed(value)
    }
}

/// Ids allocated by one import, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: Vec<RecordId>,
}

/// Tabular shape of a record type.
pub trait CsvRecord: Record {
    /// Export columns: `id` then record fields in model order.
    const COLUMNS: &'static [&'static str];
    /// Columns an import file must provide.
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    fn draft_from_row(row: &TableRow<'_>) -> Result<Self::Draft, String>;
}

/// Writes every record of `collection` to `path`. Returns the row count.
pub fn export_csv<R: CsvRecord>(collection: &Collection<R>, path: &Path) -> TransferResult<usize> {
    let rows: Vec<Vec<String>> = collection.list().iter().map(CsvRecord::to_row).collect();
    let text = table::write_table(R::COLUMNS, &rows);

    fs::write(path, text).map_err(|source| {
        error!(
            "event=csv_export module=transfer status=error kind={} error={}",
            R::KIND,
            source
        );
        TransferError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "event=csv_export module=transfer status=ok kind={} rows={}",
        R::KIND,
        rows.len()
    );
    Ok(rows.len())
}

/// Adds one record per data row of the CSV file at `path`.
///
/// # Errors
/// - `Io`, `Malformed`, `MissingColumn`: nothing was added.
/// - `Row`, `Repo`: rows before the failing one were added and persisted.
pub fn import_csv<R: CsvRecord>(
    collection: &mut Collection<R>,
    path: &Path,
) -> TransferResult<ImportSummary> {
    let text = fs::read_to_string(path).map_err(|source| TransferError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = Table::parse(&text)?;
    if let Some(missing) = R::REQUIRED_COLUMNS
        .iter()
        .find(|column| !table.has_column(column))
    {
        return Err(TransferError::MissingColumn(*missing));
    }

    let mut summary = ImportSummary::default();
    for (position, row) in table.rows().enumerate() {
        let row_number = position + 1;
        let draft = R::draft_from_row(&row).map_err(|message| TransferError::Row {
            row: row_number,
            message,
        });
        let added = draft.and_then(|draft| {
            collection.add(draft).map_err(|source| TransferError::Repo {
                row: row_number,
                source,
            })
        });
        match added {
            Ok(id) => summary.imported.push(id),
            Err(err) => {
                error!(
                    "event=csv_import module=transfer status=error kind={} row={} imported={}",
                    R::KIND,
                    row_number,
                    summary.imported.len()
                );
                return Err(err);
            }
        }
    }

    info!(
        "event=csv_import module=transfer status=ok kind={} rows={}",
        R::KIND,
        summary.imported.len()
    );
    Ok(summary)
}
