//! Note record.
//!
//! # Invariants
//! - `timestamp` is refreshed on every edit.
//! - Note edits overwrite title and content unconditionally; there is no
//!   skip-if-blank policy for notes.

use super::date::format_timestamp;
use super::record::{CollectionKind, Record, RecordId, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Free-form text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(alias = "note_id")]
    pub id: RecordId,
    pub title: String,
    pub content: String,
    /// Creation or last-edit time, `DD-MM-YYYY HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Full replacement of a note's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub title: String,
    pub content: String,
}

impl NotePatch {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Record for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const KIND: CollectionKind = CollectionKind::Notes;

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(id: RecordId, draft: NoteDraft, now: NaiveDateTime) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            title: draft.title,
            content: draft.content,
            timestamp: format_timestamp(now),
        })
    }

    fn apply(&mut self, patch: NotePatch, now: NaiveDateTime) -> Result<(), ValidationError> {
        self.title = patch.title;
        self.content = patch.content;
        self.timestamp = format_timestamp(now);
        Ok(())
    }
}
