//! Calendar text formats shared by records and finance queries.
//!
//! Dates are stored as `DD-MM-YYYY` text and note timestamps as
//! `DD-MM-YYYY HH:MM:SS`. Parsing goes through [`parse_date`] only, so range
//! filtering and reporting apply identical date semantics.

use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `chrono` format for stored calendar dates.
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// `chrono` format for note creation/edit timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Date text that does not match `DD-MM-YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected DD-MM-YYYY", self.input)
    }
}

impl Error for DateParseError {}

/// Parses `DD-MM-YYYY` text, ignoring surrounding whitespace.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| DateParseError {
        input: text.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local wall-clock time, the default clock for collections.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::{format_date, format_timestamp, parse_date};
    use chrono::NaiveDate;

    #[test]
    fn parse_date_accepts_day_month_year() {
        let date = parse_date("15-01-2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(parse_date(" 01-02-2024 ").unwrap().to_string(), "2024-02-01");
    }

    #[test]
    fn parse_date_rejects_other_layouts_and_impossible_days() {
        for input in ["2024-01-15", "15/01/2024", "31-02-2024", "", "yesterday"] {
            let err = parse_date(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn formatting_uses_stored_layouts() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        assert_eq!(format_date(at.date()), "09-03-2024");
        assert_eq!(format_timestamp(at), "09-03-2024 07:05:03");
    }
}
