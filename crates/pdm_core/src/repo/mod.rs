//! Collection managers over the durable store.
//!
//! # Responsibility
//! - Provide one generic CRUD manager instantiated per record type.
//! - Host record-type specific lookups (task completion, contact search,
//!   finance queries) as inherent extensions of that manager.
//!
//! # Invariants
//! - Every successful mutation ends with a full-collection persist.
//! - `NotFound` and `Validation` errors leave state unchanged.

use crate::model::record::{CollectionKind, RecordId, ValidationError};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection;
pub mod contacts;
pub mod finance;
pub mod tasks;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    NotFound(RecordId),
    Validation(ValidationError),
    Store(StoreError),
    IdExhausted(CollectionKind),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::IdExhausted(kind) => write!(f, "{kind}: no identifiers left to allocate"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::IdExhausted(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
