//! Contact lookups.

use super::collection::Collection;
use crate::model::contact::Contact;

impl Collection<Contact> {
    /// First contact whose name matches `name` ignoring case and surrounding
    /// whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.list()
            .iter()
            .find(|contact| contact.name.trim().to_lowercase() == wanted)
    }

    /// First contact whose phone equals `phone` exactly (after trimming).
    pub fn find_by_phone(&self, phone: &str) -> Option<&Contact> {
        let wanted = phone.trim();
        if wanted.is_empty() {
            return None;
        }
        self.list()
            .iter()
            .find(|contact| contact.phone.as_deref().map(str::trim) == Some(wanted))
    }
}
