//! Record descriptor shared by every collection.
//!
//! # Responsibility
//! - Describe how one entity type is created, edited and identified.
//! - Carry the skip-if-blank edit policy helpers used by record patches.
//!
//! # Invariants
//! - `Record::create` and `Record::apply` validate before mutating; a
//!   returned `ValidationError` means the record is unchanged.
//! - Record ids are positive and unique within one collection.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a record inside its own collection.
pub type RecordId = u32;

/// The four independent collections managed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Notes,
    Tasks,
    Contacts,
    Finance,
}

impl CollectionKind {
    /// All collection kinds in menu order.
    pub const ALL: [CollectionKind; 4] = [Self::Notes, Self::Tasks, Self::Contacts, Self::Finance];

    /// Stable lowercase name used in logs and default file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Tasks => "tasks",
            Self::Contacts => "contacts",
            Self::Finance => "finance",
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure raised before any record mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        kind: CollectionKind,
        field: &'static str,
    },
    /// Priority label outside `High|Medium|Low`.
    InvalidPriority(String),
    /// Finance amount is NaN or infinite.
    NonFiniteAmount(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { kind, field } => {
                write!(f, "{kind}: field `{field}` must not be empty")
            }
            Self::InvalidPriority(value) => write!(
                f,
                "invalid priority `{value}`; expected High|Medium|Low"
            ),
            Self::NonFiniteAmount(value) => write!(f, "amount must be a finite number, got {value}"),
        }
    }
}

impl Error for ValidationError {}

/// Entity descriptor consumed by the generic collection manager.
///
/// `Draft` carries the fields supplied to `add`; `Patch` carries the fields
/// supplied to `edit`. Each implementation decides its own edit policy.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Draft;
    type Patch;

    const KIND: CollectionKind;

    fn id(&self) -> RecordId;

    /// Builds a new record with an allocated id, applying type defaults.
    fn create(
        id: RecordId,
        draft: Self::Draft,
        now: NaiveDateTime,
    ) -> Result<Self, ValidationError>;

    /// Applies a field patch in place.
    fn apply(&mut self, patch: Self::Patch, now: NaiveDateTime) -> Result<(), ValidationError>;
}

/// Returns the value untouched when it carries non-blank text.
///
/// Both `None` and `Some("   ")` mean "no change requested".
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Owned variant of [`non_blank`] for optional record fields on create.
pub fn non_blank_owned(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

pub(crate) fn require_text(
    kind: CollectionKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { kind, field });
    }
    Ok(())
}
