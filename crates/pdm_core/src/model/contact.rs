//! Contact record.

use super::record::{
    non_blank, non_blank_owned, require_text, CollectionKind, Record, RecordId, ValidationError,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(alias = "contact_id")]
    pub id: RecordId,
    /// Required, never blank.
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Skip-if-blank contact edit. Optional fields cannot be cleared through it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Record for Contact {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const KIND: CollectionKind = CollectionKind::Contacts;

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(
        id: RecordId,
        draft: ContactDraft,
        _now: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        require_text(Self::KIND, "name", &draft.name)?;
        Ok(Self {
            id,
            name: draft.name,
            phone: non_blank_owned(draft.phone),
            email: non_blank_owned(draft.email),
        })
    }

    fn apply(&mut self, patch: ContactPatch, _now: NaiveDateTime) -> Result<(), ValidationError> {
        if let Some(name) = non_blank(patch.name.as_deref()) {
            self.name = name.to_string();
        }
        if let Some(phone) = non_blank(patch.phone.as_deref()) {
            self.phone = Some(phone.to_string());
        }
        if let Some(email) = non_blank(patch.email.as_deref()) {
            self.email = Some(email.to_string());
        }
        Ok(())
    }
}
