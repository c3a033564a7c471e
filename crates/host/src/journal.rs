use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::{HostError, Result};

/// Journal handle shared between the command invocation and the script
/// facade. The host keeps its clone to read entries after the run ends.
pub type SharedJournal = Arc<Mutex<Journal>>;

/// Per-invocation key/message map the host persists with the command record.
///
/// At this level the journal is an ordinary map. The one-slot overwrite
/// contract lives in the script facade, which clears before inserting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    entries: BTreeMap<String, String>,
}

impl Journal {
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Direct lookup; a missing key is an error, not an empty default.
    pub fn get(&self, key: &str) -> Result<String> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| HostError::JournalKeyMissing { key: key.to_string() })
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Wrap in a fresh shared handle for a new invocation.
    #[must_use]
    pub fn into_shared(self) -> SharedJournal {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn insert_then_get_returns_the_message() {
        let mut journal = Journal::default();
        journal.insert("gantry", "wall check passed");
        assert_eq!(journal.get("gantry").unwrap(), "wall check passed");
    }

    #[test]
    fn get_missing_key_names_the_key() {
        let journal = Journal::default();
        let err = journal.get("absent").unwrap_err();
        assert_eq!(err.to_string(), "journal key not found: absent");
    }

    #[test]
    fn clear_removes_every_entry() {
        let mut journal = Journal::default();
        journal.insert("a", "1");
        journal.insert("b", "2");
        journal.clear();
        assert!(journal.is_empty());
    }
}
