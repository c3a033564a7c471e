use std::collections::BTreeMap;
use std::sync::Mutex;

/// Usage-record field names scripts may not override.
pub const RESERVED_FIELDS: &[&str] = &["time", "user", "host", "session", "command", "result"];

/// Per-script custom results recorder.
///
/// Scripts attach small key/value facts to the invocation's usage record.
/// Writes to reserved field names are logged and dropped rather than
/// clobbering the record's own columns.
#[derive(Debug, Default)]
pub struct CustomResults {
    values: Mutex<BTreeMap<String, String>>,
}

impl CustomResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if RESERVED_FIELDS.contains(&key.as_str()) {
            log::warn!("ignoring write to reserved results field {key:?}");
            return;
        }
        self.values
            .lock()
            .expect("results mutex poisoned")
            .insert(key, value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("results mutex poisoned").get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.lock().expect("results mutex poisoned").remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().expect("results mutex poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().expect("results mutex poisoned").is_empty()
    }

    /// Snapshot for the usage-log record.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.lock().expect("results mutex poisoned").clone()
    }
}
