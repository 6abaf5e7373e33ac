//! Finance record.
//!
//! # Invariants
//! - Positive `amount` is income, negative is expense, zero is neither.
//! - `category` is never blank.
//! - `date` is stored as supplied; it may fail to parse, in which case
//!   range-bounded queries omit the record.

use super::date::format_date;
use super::record::{
    non_blank, non_blank_owned, require_text, CollectionKind, Record, RecordId, ValidationError,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    #[serde(alias = "record_id")]
    pub id: RecordId,
    pub amount: f64,
    pub category: String,
    /// `DD-MM-YYYY`.
    pub date: String,
    pub description: Option<String>,
}

impl FinanceRecord {
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinanceDraft {
    pub amount: f64,
    pub category: String,
    /// Blank or absent means the creation date.
    pub date: Option<String>,
    pub description: Option<String>,
}

impl FinanceDraft {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            date: None,
            description: None,
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Skip-if-blank finance edit; `amount: None` keeps the current amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancePatch {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

fn check_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(ValidationError::NonFiniteAmount(amount))
    }
}

impl Record for FinanceRecord {
    type Draft = FinanceDraft;
    type Patch = FinancePatch;

    const KIND: CollectionKind = CollectionKind::Finance;

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(
        id: RecordId,
        draft: FinanceDraft,
        now: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let amount = check_amount(draft.amount)?;
        require_text(Self::KIND, "category", &draft.category)?;
        let date = match non_blank(draft.date.as_deref()) {
            Some(date) => date.trim().to_string(),
            None => format_date(now.date()),
        };

        Ok(Self {
            id,
            amount,
            category: draft.category,
            date,
            description: non_blank_owned(draft.description),
        })
    }

    fn apply(&mut self, patch: FinancePatch, _now: NaiveDateTime) -> Result<(), ValidationError> {
        let amount = patch.amount.map(check_amount).transpose()?;

        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(category) = non_blank(patch.category.as_deref()) {
            self.category = category.to_string();
        }
        if let Some(date) = non_blank(patch.date.as_deref()) {
            self.date = date.trim().to_string();
        }
        if let Some(description) = non_blank(patch.description.as_deref()) {
            self.description = Some(description.to_string());
        }
        Ok(())
    }
}
