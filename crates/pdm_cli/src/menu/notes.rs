use super::{delete_record, export_records, import_records, list_records, view_record, Describe};
use crate::console::{Console, ConsoleResult};
use pdm_core::{Collection, Note, NoteDraft, NotePatch};
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Add note",
    "List notes",
    "View note",
    "Edit note",
    "Delete note",
    "Export notes to CSV",
    "Import notes from CSV",
    "Back",
];

impl Describe for Note {
    const NOUN: &'static str = "note";

    fn summary(&self) -> String {
        format!("[{}] {} ({})", self.id, self.title, self.timestamp)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("timestamp", self.timestamp.clone()),
        ]
    }
}

pub(super) fn run<R: BufRead, W: Write>(
    notes: &mut Collection<Note>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    loop {
        match console.choose("Notes", ENTRIES)? {
            1 => {
                let title = console.ask("Title: ")?;
                let content = console.ask("Content: ")?;
                match notes.add(NoteDraft::new(title, content)) {
                    Ok(id) => console.say(format!("Added note {id}."))?,
                    Err(err) => console.say(format!("Could not add note: {err}"))?,
                }
            }
            2 => list_records(notes, console)?,
            3 => view_record(notes, console)?,
            4 => {
                let Some(id) = console.ask_id("Enter note id to edit: ")? else {
                    continue;
                };
                if notes.get(id).is_none() {
                    console.say(format!("No note with id {id}."))?;
                    continue;
                }
                // Notes are rewritten as entered, blanks included.
                let title = console.ask("New title: ")?;
                let content = console.ask("New content: ")?;
                match notes.edit(id, NotePatch::new(title, content)) {
                    Ok(()) => console.say(format!("Updated note {id}."))?,
                    Err(err) => console.say(format!("Could not edit note: {err}"))?,
                }
            }
            5 => delete_record(notes, console)?,
            6 => export_records(notes, console)?,
            7 => import_records(notes, console)?,
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::tests::drive;
    use pdm_core::{Note, StorageConfig};

    #[test]
    fn add_list_and_view_note() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(&storage, "1\n1\nGroceries\nmilk, eggs\n2\n3\n1\n3\n99\n8\n6\n");

        assert!(text.contains("Added note 1."));
        assert!(text.contains("[1] Groceries ("));
        assert!(text.contains("content: milk, eggs"));
        assert!(text.contains("No note with id 99."));
    }

    #[test]
    fn edit_overwrites_with_blank_values() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        drive(&storage, "1\n1\nDraft\nbody\n4\n1\n\nnew body\n8\n6\n");

        let notes = storage.open::<Note>().unwrap();
        let note = notes.get(1).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.content, "new body");
    }

    #[test]
    fn bad_id_input_is_reported_and_menu_continues() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(&storage, "1\n5\nabc\n5\n4\n8\n6\n");
        assert!(text.contains("Invalid id `abc`."));
        assert!(text.contains("Could not delete note: record not found: 4"));
        assert!(text.contains("Goodbye."));
    }
}
