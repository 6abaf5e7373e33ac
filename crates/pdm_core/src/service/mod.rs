//! Read-only use-case services over collection data.
//!
//! # Responsibility
//! - Keep query/aggregation logic out of the collection managers.
//! - Stay storage-agnostic: services operate on record slices only.

pub mod finance;
