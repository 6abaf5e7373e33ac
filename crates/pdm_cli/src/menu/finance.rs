use super::{delete_record, export_records, import_records, list_records, view_record, Describe};
use crate::console::{Console, ConsoleResult};
use pdm_core::{
    format_date, Collection, FinanceDraft, FinancePatch, FinanceQuery, FinanceRecord, FinanceReport,
};
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Add record",
    "List records",
    "View record",
    "Edit record",
    "Delete record",
    "Filter records by date range",
    "Filter records by category",
    "Report for a date range",
    "Export records to CSV",
    "Import records from CSV",
    "Back",
];

impl Describe for FinanceRecord {
    const NOUN: &'static str = "record";

    fn summary(&self) -> String {
        format!(
            "[{}] {} {:.2} {}{}",
            self.id,
            self.date,
            self.amount,
            self.category,
            self.description
                .as_deref()
                .map(|text| format!(" - {text}"))
                .unwrap_or_default()
        )
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("amount", format!("{:.2}", self.amount)),
            ("category", self.category.clone()),
            ("date", self.date.clone()),
            ("description", self.description.clone().unwrap_or_default()),
        ]
    }
}

pub(super) fn run<R: BufRead, W: Write>(
    finance: &mut Collection<FinanceRecord>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    loop {
        match console.choose("Finance", ENTRIES)? {
            1 => {
                let Some(amount) =
                    console.ask_amount("Amount (positive for income, negative for expense): ")?
                else {
                    continue;
                };
                let category = console.ask("Category: ")?;
                let date = console.ask("Date (DD-MM-YYYY, blank for today): ")?;
                let description = console.ask("Description (optional): ")?;
                let draft = FinanceDraft::new(amount, category)
                    .date(date)
                    .description(description);
                match finance.add(draft) {
                    Ok(id) => console.say(format!("Added record {id}."))?,
                    Err(err) => console.say(format!("Could not add record: {err}"))?,
                }
            }
            2 => list_records(finance, console)?,
            3 => view_record(finance, console)?,
            4 => {
                let Some(id) = console.ask_id("Enter record id to edit: ")? else {
                    continue;
                };
                if finance.get(id).is_none() {
                    console.say(format!("No record with id {id}."))?;
                    continue;
                }
                console.say("Leave a field blank to keep its current value.")?;
                let Some(amount) = console.ask_optional_amount("New amount: ")? else {
                    continue;
                };
                let patch = FinancePatch {
                    amount,
                    category: Some(console.ask("New category: ")?),
                    date: Some(console.ask("New date: ")?),
                    description: Some(console.ask("New description: ")?),
                };
                match finance.edit(id, patch) {
                    Ok(()) => console.say(format!("Updated record {id}."))?,
                    Err(err) => console.say(format!("Could not edit record: {err}"))?,
                }
            }
            5 => delete_record(finance, console)?,
            6 => {
                let query = ask_range(console)?;
                show_selection(finance, &query, console)?;
            }
            7 => {
                let category = console.ask("Category: ")?;
                if category.trim().is_empty() {
                    console.say("Category must not be empty.")?;
                    continue;
                }
                show_selection(finance, &FinanceQuery::category(category), console)?;
            }
            8 => {
                let query = ask_range(console)?;
                match finance.report(&query) {
                    Ok(report) => show_report(&report, console)?,
                    Err(err) => console.say(format!("Invalid range: {err}"))?,
                }
            }
            9 => export_records(finance, console)?,
            10 => import_records(finance, console)?,
            _ => return Ok(()),
        }
    }
}

fn ask_range<R: BufRead, W: Write>(console: &mut Console<R, W>) -> ConsoleResult<FinanceQuery> {
    let start = console.ask("Start date (DD-MM-YYYY, blank for open): ")?;
    let end = console.ask("End date (DD-MM-YYYY, blank for open): ")?;
    Ok(FinanceQuery::range(Some(&start), Some(&end)))
}

fn show_selection<R: BufRead, W: Write>(
    finance: &Collection<FinanceRecord>,
    query: &FinanceQuery,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let records = match finance.filter(query) {
        Ok(records) => records,
        Err(err) => return console.say(format!("Invalid filter: {err}")),
    };
    if records.is_empty() {
        return console.say("No matching records.");
    }
    for record in records {
        console.say(record.summary())?;
    }
    Ok(())
}

fn show_report<R: BufRead, W: Write>(
    report: &FinanceReport,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let bound = |date: Option<_>| date.map(format_date).unwrap_or_else(|| "-".to_string());
    console.say(format!(
        "Report {} .. {} ({} records)",
        bound(report.start),
        bound(report.end),
        report.record_count
    ))?;
    console.say(format!("  Income:   {:.2}", report.total_income))?;
    console.say(format!("  Expenses: {:.2}", report.total_expense))?;
    console.say(format!("  Balance:  {:.2}", report.balance))
}

#[cfg(test)]
mod tests {
    use crate::menu::tests::drive;
    use pdm_core::{FinanceDraft, FinanceRecord, StorageConfig};

    fn seeded() -> (tempfile::TempDir, StorageConfig) {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());
        let mut finance = storage.open::<FinanceRecord>().unwrap();
        finance
            .add(FinanceDraft::new(100.0, "Salary").date("01-01-2024"))
            .unwrap();
        finance
            .add(FinanceDraft::new(-40.0, "Food").date("15-01-2024"))
            .unwrap();
        finance
            .add(FinanceDraft::new(20.0, "Gift").date("01-02-2024"))
            .unwrap();
        (dir, storage)
    }

    #[test]
    fn report_for_january() {
        let (_dir, storage) = seeded();

        let text = drive(&storage, "4\n8\n01-01-2024\n31-01-2024\n11\n6\n");

        assert!(text.contains("Report 01-01-2024 .. 31-01-2024 (2 records)"));
        assert!(text.contains("Income:   100.00"));
        assert!(text.contains("Expenses: -40.00"));
        assert!(text.contains("Balance:  60.00"));
    }

    #[test]
    fn filters_by_range_and_category() {
        let (_dir, storage) = seeded();

        let text = drive(&storage, "4\n6\n\n14-01-2024\n7\nfood\n7\n \n11\n6\n");

        assert!(text.contains("[1] 01-01-2024 100.00 Salary"));
        assert_eq!(text.matches("[2] 15-01-2024 -40.00 Food").count(), 1);
        assert!(text.contains("Category must not be empty."));
    }

    #[test]
    fn bad_boundary_is_reported_and_reversed_range_is_empty() {
        let (_dir, storage) = seeded();

        let text = drive(&storage, "4\n8\n2024-01-01\n\n6\n31-01-2024\n01-01-2024\n11\n6\n");

        assert!(text.contains("Invalid range: start date"));
        assert!(text.contains("No matching records."));
    }

    #[test]
    fn reversed_report_range_is_all_zero() {
        let (_dir, storage) = seeded();

        let text = drive(&storage, "4\n8\n31-01-2024\n01-01-2024\n11\n6\n");

        assert!(text.contains("Report 31-01-2024 .. 01-01-2024 (0 records)"));
        assert!(text.contains("Balance:  0.00"));
        assert!(!text.contains("Invalid range"));
    }

    #[test]
    fn invalid_amount_adds_nothing_and_edit_keeps_blanks() {
        let (_dir, storage) = seeded();

        let text = drive(&storage, "4\n1\nten\n4\n2\n-55\n\n\nlunch\n11\n6\n");
        assert!(text.contains("Invalid amount `ten`."));
        assert!(text.contains("Updated record 2."));

        let finance = storage.open::<FinanceRecord>().unwrap();
        assert_eq!(finance.len(), 3);
        let record = finance.get(2).unwrap();
        assert_eq!(record.amount, -55.0);
        assert_eq!(record.category, "Food");
        assert_eq!(record.date, "15-01-2024");
        assert_eq!(record.description.as_deref(), Some("lunch"));
    }
}
