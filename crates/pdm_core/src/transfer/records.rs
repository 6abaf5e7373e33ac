//! Column mappings for each record type.

use super::{CsvRecord, TableRow};
use crate::model::contact::{Contact, ContactDraft};
use crate::model::finance::{FinanceDraft, FinanceRecord};
use crate::model::note::{Note, NoteDraft};
use crate::model::task::{Task, TaskDraft};

impl CsvRecord for Note {
    const COLUMNS: &'static [&'static str] = &["id", "title", "content", "timestamp"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["title", "content"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.content.clone(),
            self.timestamp.clone(),
        ]
    }

    fn draft_from_row(row: &TableRow<'_>) -> Result<NoteDraft, String> {
        Ok(NoteDraft::new(row.get("title"), row.get("content")))
    }
}

impl CsvRecord for Task {
    const COLUMNS: &'static [&'static str] =
        &["id", "title", "description", "done", "priority", "due_date"];
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["title", "description", "priority", "due_date"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.description.clone(),
            self.done.to_string(),
            self.priority.to_string(),
            self.due_date.clone(),
        ]
    }

    fn draft_from_row(row: &TableRow<'_>) -> Result<TaskDraft, String> {
        Ok(TaskDraft {
            title: row.get("title").to_string(),
            description: row.get("description").to_string(),
            priority: row.optional("priority"),
            due_date: row.optional("due_date"),
        })
    }
}

impl CsvRecord for Contact {
    const COLUMNS: &'static [&'static str] = &["id", "name", "phone", "email"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["name", "phone", "email"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.phone.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        ]
    }

    fn draft_from_row(row: &TableRow<'_>) -> Result<ContactDraft, String> {
        Ok(ContactDraft {
            name: row.get("name").to_string(),
            phone: row.optional("phone"),
            email: row.optional("email"),
        })
    }
}

impl CsvRecord for FinanceRecord {
    const COLUMNS: &'static [&'static str] = &["id", "amount", "category", "date", "description"];
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["amount", "category", "date", "description"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.amount.to_string(),
            self.category.clone(),
            self.date.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }

    fn draft_from_row(row: &TableRow<'_>) -> Result<FinanceDraft, String> {
        let raw_amount = row.get("amount").trim();
        let amount = raw_amount
            .parse::<f64>()
            .map_err(|_| format!("invalid amount `{raw_amount}`"))?;

        Ok(FinanceDraft {
            amount,
            category: row.get("category").to_string(),
            date: row.optional("date"),
            description: row.optional("description"),
        })
    }
}
