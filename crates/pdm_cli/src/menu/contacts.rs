use super::{
    delete_record, export_records, import_records, list_records, show_details,
    view_record, Describe,
};
use crate::console::{Console, ConsoleResult};
use pdm_core::{Collection, Contact, ContactDraft, ContactPatch};
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Add contact",
    "List contacts",
    "View contact",
    "Edit contact",
    "Delete contact",
    "Find contact by name",
    "Find contact by phone",
    "Export contacts to CSV",
    "Import contacts from CSV",
    "Back",
];

impl Describe for Contact {
    const NOUN: &'static str = "contact";

    fn summary(&self) -> String {
        format!(
            "[{}] {} (phone: {}, email: {})",
            self.id,
            self.name,
            self.phone.as_deref().unwrap_or("-"),
            self.email.as_deref().unwrap_or("-")
        )
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("phone", self.phone.clone().unwrap_or_default()),
            ("email", self.email.clone().unwrap_or_default()),
        ]
    }
}

pub(super) fn run<R: BufRead, W: Write>(
    contacts: &mut Collection<Contact>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    loop {
        match console.choose("Contacts", ENTRIES)? {
            1 => {
                let name = console.ask("Name: ")?;
                let phone = console.ask("Phone (optional): ")?;
                let email = console.ask("Email (optional): ")?;
                match contacts.add(ContactDraft::new(name).phone(phone).email(email)) {
                    Ok(id) => console.say(format!("Added contact {id}."))?,
                    Err(err) => console.say(format!("Could not add contact: {err}"))?,
                }
            }
            2 => list_records(contacts, console)?,
            3 => view_record(contacts, console)?,
            4 => {
                let Some(id) = console.ask_id("Enter contact id to edit: ")? else {
                    continue;
                };
                if contacts.get(id).is_none() {
                    console.say(format!("No contact with id {id}."))?;
                    continue;
                }
                console.say("Leave a field blank to keep its current value.")?;
                let patch = ContactPatch {
                    name: Some(console.ask("New name: ")?),
                    phone: Some(console.ask("New phone: ")?),
                    email: Some(console.ask("New email: ")?),
                };
                match contacts.edit(id, patch) {
                    Ok(()) => console.say(format!("Updated contact {id}."))?,
                    Err(err) => console.say(format!("Could not edit contact: {err}"))?,
                }
            }
            5 => delete_record(contacts, console)?,
            6 => {
                let name = console.ask("Name to search for: ")?;
                match contacts.find_by_name(&name) {
                    Some(contact) => show_details(contact, console)?,
                    None => console.say("Contact not found.")?,
                }
            }
            7 => {
                let phone = console.ask("Phone to search for: ")?;
                match contacts.find_by_phone(&phone) {
                    Some(contact) => show_details(contact, console)?,
                    None => console.say("Contact not found.")?,
                }
            }
            8 => export_records(contacts, console)?,
            9 => import_records(contacts, console)?,
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::tests::drive;
    use pdm_core::{Contact, StorageConfig};

    #[test]
    fn add_then_find_by_name_and_phone() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(
            &storage,
            "3\n1\nAnn Lee\n555-0100\n\n6\nann lee\n7\n555-0100\n7\n000\n10\n6\n",
        );

        assert!(text.contains("Added contact 1."));
        assert_eq!(text.matches("name: Ann Lee").count(), 2);
        assert!(text.contains("Contact not found."));

        let contacts = storage.open::<Contact>().unwrap();
        assert_eq!(contacts.get(1).unwrap().email, None);
    }

    #[test]
    fn blank_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(&storage, "3\n1\n   \n555\n\n10\n6\n");
        assert!(text.contains("Could not add contact: contacts: field `name` must not be empty"));
    }
}
