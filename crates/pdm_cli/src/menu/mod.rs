//! Interactive menu tree.
//!
//! # Responsibility
//! - Route the main menu to one submenu per collection plus the calculator.
//! - Host the list/view/delete/CSV flows every collection submenu shares.
//!
//! # Invariants
//! - A collection is loaded from disk once per session, when its submenu is
//!   first entered, and reused afterwards. Recovery notices are therefore
//!   shown in context, and ids freed by `delete` stay retired for the whole
//!   session.
//! - Every core error is printed and the menu continues.

mod calculator;
mod contacts;
mod finance;
mod notes;
mod tasks;

use crate::console::{Console, ConsoleError, ConsoleResult};
use log::{error, info, warn};
use pdm_core::{
    export_csv, import_csv, Collection, Contact, CsvRecord, FinanceRecord, LoadStatus, Note,
    StorageConfig, Task, TransferError,
};
use std::io::{self, BufRead, Write};
use std::path::Path;

const MAIN_ENTRIES: &[&str] = &["Notes", "Tasks", "Contacts", "Finance", "Calculator", "Exit"];

/// Runs the main menu until the user exits or input ends.
pub fn run_session<R: BufRead, W: Write>(
    storage: &StorageConfig,
    input: R,
    output: W,
) -> io::Result<()> {
    let mut console = Console::new(input, output);
    match main_menu(storage, &mut console) {
        Ok(()) | Err(ConsoleError::EndOfInput) => {
            info!("event=session_end module=cli status=ok");
            Ok(())
        }
        Err(ConsoleError::Io(err)) => {
            error!("event=session_end module=cli status=error error={err}");
            Err(err)
        }
    }
}

/// Collections loaded so far in this session.
#[derive(Default)]
struct Session {
    notes: Option<Collection<Note>>,
    tasks: Option<Collection<Task>>,
    contacts: Option<Collection<Contact>>,
    finance: Option<Collection<FinanceRecord>>,
}

fn main_menu<R: BufRead, W: Write>(
    storage: &StorageConfig,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let mut session = Session::default();
    loop {
        match console.choose("Personal data manager", MAIN_ENTRIES)? {
            1 => {
                if let Some(collection) = loaded(&mut session.notes, storage, console)? {
                    notes::run(collection, console)?;
                }
            }
            2 => {
                if let Some(collection) = loaded(&mut session.tasks, storage, console)? {
                    tasks::run(collection, console)?;
                }
            }
            3 => {
                if let Some(collection) = loaded(&mut session.contacts, storage, console)? {
                    contacts::run(collection, console)?;
                }
            }
            4 => {
                if let Some(collection) = loaded(&mut session.finance, storage, console)? {
                    finance::run(collection, console)?;
                }
            }
            5 => calculator::run(console)?,
            _ => {
                console.say("Goodbye.")?;
                return Ok(());
            }
        }
    }
}

/// Human-readable rendering of a record for menu output.
trait Describe: CsvRecord {
    /// Singular noun used in messages, e.g. `note`.
    const NOUN: &'static str;

    /// One line for list output.
    fn summary(&self) -> String;

    /// Labelled fields for the detail view.
    fn details(&self) -> Vec<(&'static str, String)>;
}

/// Returns the session's collection in `slot`, loading it on first use.
/// A failed load is reported and retried on the next entry.
fn loaded<'s, D: Describe, R: BufRead, W: Write>(
    slot: &'s mut Option<Collection<D>>,
    storage: &StorageConfig,
    console: &mut Console<R, W>,
) -> ConsoleResult<Option<&'s mut Collection<D>>> {
    if slot.is_none() {
        *slot = open_collection(storage, console)?;
    }
    Ok(slot.as_mut())
}

fn open_collection<D: Describe, R: BufRead, W: Write>(
    storage: &StorageConfig,
    console: &mut Console<R, W>,
) -> ConsoleResult<Option<Collection<D>>> {
    let collection = match storage.open::<D>() {
        Ok(collection) => collection,
        Err(err) => {
            error!(
                "event=collection_open module=cli status=error kind={}",
                D::KIND
            );
            console.say(format!("Cannot open {} storage: {err}", D::KIND))?;
            return Ok(None);
        }
    };

    if let LoadStatus::Recovered { reason } = collection.load_status() {
        warn!(
            "event=collection_open module=cli status=recovered kind={}",
            D::KIND
        );
        console.say(format!(
            "Warning: stored {} in `{}` were unreadable and have been reset ({reason}).",
            D::KIND,
            collection.path().display()
        ))?;
    }
    Ok(Some(collection))
}

fn list_records<D: Describe, R: BufRead, W: Write>(
    collection: &Collection<D>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    if collection.is_empty() {
        return console.say(format!("No {} yet.", D::KIND));
    }
    for record in collection.list() {
        console.say(record.summary())?;
    }
    Ok(())
}

fn show_details<D: Describe, R: BufRead, W: Write>(
    record: &D,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    for (label, value) in record.details() {
        console.say(format!("{label:>12}: {value}"))?;
    }
    Ok(())
}

fn view_record<D: Describe, R: BufRead, W: Write>(
    collection: &Collection<D>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let Some(id) = console.ask_id(&format!("Enter {} id: ", D::NOUN))? else {
        return Ok(());
    };
    match collection.get(id) {
        Some(record) => show_details(record, console),
        None => console.say(format!("No {} with id {id}.", D::NOUN)),
    }
}

fn delete_record<D: Describe, R: BufRead, W: Write>(
    collection: &mut Collection<D>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let Some(id) = console.ask_id(&format!("Enter {} id to delete: ", D::NOUN))? else {
        return Ok(());
    };
    match collection.delete(id) {
        Ok(()) => console.say(format!("Deleted {} {id}.", D::NOUN)),
        Err(err) => console.say(format!("Could not delete {}: {err}", D::NOUN)),
    }
}

fn export_records<D: Describe, R: BufRead, W: Write>(
    collection: &Collection<D>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let file = console.ask("CSV file to export to: ")?;
    if file.trim().is_empty() {
        return console.say("A file name is required.");
    }
    match export_csv(collection, Path::new(file.trim())) {
        Ok(count) => console.say(format!("Exported {count} {} to `{}`.", D::KIND, file.trim())),
        Err(err) => console.say(format!("Export failed: {err}")),
    }
}

fn import_records<D: Describe, R: BufRead, W: Write>(
    collection: &mut Collection<D>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    let file = console.ask("CSV file to import from: ")?;
    if file.trim().is_empty() {
        return console.say("A file name is required.");
    }
    let before = collection.len();
    match import_csv(collection, Path::new(file.trim())) {
        Ok(summary) => console.say(format!(
            "Imported {} {} from `{}`.",
            summary.imported.len(),
            D::KIND,
            file.trim()
        )),
        Err(err @ (TransferError::Row { .. } | TransferError::Repo { .. })) => {
            console.say(format!(
                "Import stopped at {err}; {} earlier rows were kept.",
                collection.len() - before
            ))
        }
        Err(err) => console.say(format!("Import failed: {err}")),
    }
}
