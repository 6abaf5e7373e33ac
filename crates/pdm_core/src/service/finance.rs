//! Finance query engine: range/category filtering and income reports.
//!
//! # Responsibility
//! - Select finance records by inclusive date range and category.
//! - Aggregate income, expense and balance over a selection.
//!
//! # Invariants
//! - Pure functions over a borrowed slice; records are never mutated.
//! - A boundary that fails to parse aborts the whole query with no results.
//! - With any boundary present, a record whose own date fails to parse is
//!   omitted silently.
//! - A start after the end selects nothing; it is not an error.
//! - A record contributes to at most one of income/expense; zero to neither.
//! - An empty selection produces a zero report, not an error.

use crate::model::date::{parse_date, DateParseError};
use crate::model::finance::FinanceRecord;
use crate::model::record::non_blank;
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which side of a date range a boundary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl Display for Boundary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Validation failure for caller-supplied query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinanceQueryError {
    InvalidBoundary {
        boundary: Boundary,
        source: DateParseError,
    },
}

impl Display for FinanceQueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBoundary { boundary, source } => {
                write!(f, "{boundary} date: {source}")
            }
        }
    }
}

impl Error for FinanceQueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBoundary { source, .. } => Some(source),
        }
    }
}

/// Finance selection parameters. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinanceQuery {
    /// Inclusive lower bound, `DD-MM-YYYY`.
    pub start: Option<String>,
    /// Inclusive upper bound, `DD-MM-YYYY`.
    pub end: Option<String>,
    /// Case-insensitive exact category match. Surrounding whitespace of the
    /// query is ignored; the stored category is compared as is.
    pub category: Option<String>,
}

impl FinanceQuery {
    pub fn range(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            category: None,
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Aggregated totals over one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceReport {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Sum of positive amounts.
    pub total_income: f64,
    /// Sum of negative amounts (zero or negative).
    pub total_expense: f64,
    pub balance: f64,
    pub record_count: usize,
}

/// Parsed, validated form of a [`FinanceQuery`].
struct Selection {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    /// Lowercased category.
    category: Option<String>,
}

impl Selection {
    fn parse(query: &FinanceQuery) -> Result<Self, FinanceQueryError> {
        let start = parse_boundary(query.start.as_deref(), Boundary::Start)?;
        let end = parse_boundary(query.end.as_deref(), Boundary::End)?;

        Ok(Self {
            start,
            end,
            category: non_blank(query.category.as_deref()).map(|value| value.trim().to_lowercase()),
        })
    }

    fn matches(&self, record: &FinanceRecord) -> bool {
        if self.start.is_some() || self.end.is_some() {
            let Ok(date) = parse_date(&record.date) else {
                debug!(
                    "event=finance_filter module=service status=skip id={} reason=unparsable_date",
                    record.id
                );
                return false;
            };
            if self.start.is_some_and(|start| date < start) {
                return false;
            }
            if self.end.is_some_and(|end| date > end) {
                return false;
            }
        }

        match &self.category {
            Some(category) => record.category.to_lowercase() == *category,
            None => true,
        }
    }
}

fn parse_boundary(
    value: Option<&str>,
    boundary: Boundary,
) -> Result<Option<NaiveDate>, FinanceQueryError> {
    non_blank(value)
        .map(|text| {
            parse_date(text).map_err(|source| FinanceQueryError::InvalidBoundary { boundary, source })
        })
        .transpose()
}

/// Returns records matching `query`, preserving input order.
pub fn filter_records<'a>(
    records: &'a [FinanceRecord],
    query: &FinanceQuery,
) -> Result<Vec<&'a FinanceRecord>, FinanceQueryError> {
    let selection = Selection::parse(query)?;
    Ok(records
        .iter()
        .filter(|record| selection.matches(record))
        .collect())
}

/// Computes income/expense/balance over the records matching `query`.
pub fn generate_report(
    records: &[FinanceRecord],
    query: &FinanceQuery,
) -> Result<FinanceReport, FinanceQueryError> {
    let selection = Selection::parse(query)?;
    let mut report = FinanceReport {
        start: selection.start,
        end: selection.end,
        total_income: 0.0,
        total_expense: 0.0,
        balance: 0.0,
        record_count: 0,
    };

    for record in records.iter().filter(|record| selection.matches(record)) {
        if record.is_income() {
            report.total_income += record.amount;
        } else if record.is_expense() {
            report.total_expense += record.amount;
        }
        report.record_count += 1;
    }
    report.balance = report.total_income + report.total_expense;

    Ok(report)
}
