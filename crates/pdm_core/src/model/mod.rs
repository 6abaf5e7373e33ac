//! Domain model for the four record collections.
//!
//! # Responsibility
//! - Define the record shapes persisted by the store.
//! - Encode per-type defaults and edit policies behind the `Record` trait.
//!
//! # Invariants
//! - Collections are fully independent; records never reference each other.
//! - Every record is identified by a `RecordId` unique within its collection.

pub mod contact;
pub mod date;
pub mod finance;
pub mod note;
pub mod record;
pub mod task;
