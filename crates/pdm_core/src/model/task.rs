//! Task record.
//!
//! # Invariants
//! - `priority` is one of `High|Medium|Low`; `Low` when not supplied.
//!   `Высокий|Средний|Низкий` are read as the same three labels, so task
//!   files written by the earlier Python tool still load.
//! - `due_date` defaults to the creation date when not supplied.
//! - Edits follow the skip-if-blank policy.

use super::date::format_date;
use super::record::{non_blank, CollectionKind, Record, RecordId, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed priority label set. Always written in its English form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskPriority {
    High,
    Medium,
    #[default]
    Low,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "high" | "высокий" => Ok(Self::High),
            "medium" | "средний" => Ok(Self::Medium),
            "low" | "низкий" => Ok(Self::Low),
            _ => Err(ValidationError::InvalidPriority(value.to_string())),
        }
    }
}

impl TryFrom<String> for TaskPriority {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "task_id")]
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub done: bool,
    pub priority: TaskPriority,
    /// `DD-MM-YYYY`, stored as supplied.
    pub due_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// Blank or absent means `Low`.
    pub priority: Option<String>,
    /// Blank or absent means the creation date.
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Skip-if-blank task edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

impl Record for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const KIND: CollectionKind = CollectionKind::Tasks;

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(id: RecordId, draft: TaskDraft, now: NaiveDateTime) -> Result<Self, ValidationError> {
        let priority = match non_blank(draft.priority.as_deref()) {
            Some(label) => label.parse()?,
            None => TaskPriority::default(),
        };
        let due_date = match non_blank(draft.due_date.as_deref()) {
            Some(date) => date.trim().to_string(),
            None => format_date(now.date()),
        };

        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            done: false,
            priority,
            due_date,
        })
    }

    fn apply(&mut self, patch: TaskPatch, _now: NaiveDateTime) -> Result<(), ValidationError> {
        let priority = non_blank(patch.priority.as_deref())
            .map(TaskPriority::from_str)
            .transpose()?;

        if let Some(title) = non_blank(patch.title.as_deref()) {
            self.title = title.to_string();
        }
        if let Some(description) = non_blank(patch.description.as_deref()) {
            self.description = description.to_string();
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due_date) = non_blank(patch.due_date.as_deref()) {
            self.due_date = due_date.trim().to_string();
        }
        Ok(())
    }
}
