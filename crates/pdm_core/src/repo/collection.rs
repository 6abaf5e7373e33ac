//! Generic persisted collection manager.
//!
//! # Responsibility
//! - Own the in-memory sequence of one record type for the process lifetime.
//! - Allocate ids and persist the whole sequence after every mutation.
//!
//! # Invariants
//! - The in-memory `Vec` is the single source of truth once opened.
//! - Next id = max(stored ids, ids already issued here) + 1, so an id freed
//!   by `delete` is never handed out again by the same instance.
//! - A failed persist leaves memory ahead of disk. The divergence is logged
//!   and returned as `RepoError::Store`; it is not rolled back.

use super::{RepoError, RepoResult};
use crate::model::date::local_now;
use crate::model::record::{Record, RecordId};
use crate::store::{self, LoadStatus};
use chrono::NaiveDateTime;
use log::{error, info};
use std::path::{Path, PathBuf};

/// Clock used for timestamps and date defaults.
pub type Clock = fn() -> NaiveDateTime;

/// Ordered, file-backed set of records of one type.
#[derive(Debug)]
pub struct Collection<R: Record> {
    path: PathBuf,
    records: Vec<R>,
    high_water: RecordId,
    load_status: LoadStatus,
    clock: Clock,
}

impl<R: Record> Collection<R> {
    /// Loads the collection stored at `path`.
    ///
    /// A missing or corrupt document yields an empty collection; see
    /// [`Collection::load_status`].
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        let loaded = store::load(&path, Vec::<R>::new())?;
        let high_water = max_id(&loaded.data);

        info!(
            "event=collection_open module=repo status=ok kind={} records={}",
            R::KIND,
            loaded.data.len()
        );

        Ok(Self {
            path,
            records: loaded.data,
            high_water,
            load_status: loaded.status,
            clock: local_now,
        })
    }

    /// Replaces the wall clock, mainly for deterministic tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the backing document was obtained at open time.
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Creates a record from `draft` and persists the collection.
    ///
    /// # Errors
    /// - `Validation` when the draft is rejected; nothing is mutated.
    /// - `IdExhausted` when no further id can be allocated.
    /// - `Store` when persisting fails after the record was appended.
    pub fn add(&mut self, draft: R::Draft) -> RepoResult<RecordId> {
        let id = self.next_id()?;
        let record = R::create(id, draft, (self.clock)())?;

        self.records.push(record);
        self.high_water = id;
        self.persist("record_add")?;

        info!(
            "event=record_add module=repo status=ok kind={} id={}",
            R::KIND,
            id
        );
        Ok(id)
    }

    /// Applies `patch` to the record with `id` and persists the collection.
    ///
    /// The record type decides which patch fields count as "no change".
    pub fn edit(&mut self, id: RecordId, patch: R::Patch) -> RepoResult<()> {
        let now = (self.clock)();
        let record = self.get_mut(id)?;
        record.apply(patch, now)?;
        self.persist("record_edit")?;

        info!(
            "event=record_edit module=repo status=ok kind={} id={}",
            R::KIND,
            id
        );
        Ok(())
    }

    /// Removes the record with `id` and persists the collection.
    pub fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(RepoError::NotFound(id))?;
        self.records.remove(index);
        self.persist("record_delete")?;

        info!(
            "event=record_delete module=repo status=ok kind={} id={}",
            R::KIND,
            id
        );
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, id: RecordId) -> RepoResult<&mut R> {
        self.records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(RepoError::NotFound(id))
    }

    pub(crate) fn persist(&self, event: &str) -> RepoResult<()> {
        store::save(&self.path, &self.records).map_err(|err| {
            error!(
                "event={} module=repo status=error kind={} error_code=persist_failed error={}",
                event,
                R::KIND,
                err
            );
            RepoError::Store(err)
        })
    }

    fn next_id(&self) -> RepoResult<RecordId> {
        max_id(&self.records)
            .max(self.high_water)
            .checked_add(1)
            .ok_or(RepoError::IdExhausted(R::KIND))
    }
}

fn max_id<R: Record>(records: &[R]) -> RecordId {
    records.iter().map(Record::id).max().unwrap_or(0)
}
