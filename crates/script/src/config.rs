use std::sync::{Arc, Mutex};

use gantry_config::{ConfigStore, Value};

use crate::Result;

/// Postfix appended to the command name to form its private section name.
/// `WallCheck` keeps its options under `[WallCheckconfig]`.
pub const CONFIG_SECTION_POSTFIX: &str = "config";

/// Handle to one command's private config section.
///
/// The handle carries the section *name*, not the section: every read and
/// write goes through the shared store, so concurrent scripts and the host
/// observe a single consistent document. Changes stay in memory until
/// someone calls `save_config`.
#[derive(Clone)]
pub struct SectionHandle {
    store: Arc<Mutex<ConfigStore>>,
    section: String,
}

impl SectionHandle {
    pub(crate) fn new(store: Arc<Mutex<ConfigStore>>, section: String) -> Self {
        Self { store, section }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.section
    }

    pub fn has_option(&self, option: &str) -> Result<bool> {
        let store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section(&self.section)?.has_option(option))
    }

    pub fn get_option(&self, option: &str) -> Result<Value> {
        let store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section(&self.section)?.get_option(option)?.clone())
    }

    pub fn get_str(&self, option: &str) -> Result<String> {
        let store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section(&self.section)?.get_str(option)?.to_string())
    }

    pub fn get_bool(&self, option: &str) -> Result<bool> {
        let store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section(&self.section)?.get_bool(option)?)
    }

    pub fn get_int(&self, option: &str) -> Result<i64> {
        let store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section(&self.section)?.get_int(option)?)
    }

    pub fn get_str_list(&self, option: &str) -> Result<Vec<String>> {
        let store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section(&self.section)?.get_str_list(option)?)
    }

    pub fn set_option(&self, option: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let mut store = self.store.lock().expect("config store mutex poisoned");
        store.get_section_mut(&self.section)?.set_option(option, value);
        Ok(())
    }

    pub fn remove_option(&self, option: &str) -> Result<Option<Value>> {
        let mut store = self.store.lock().expect("config store mutex poisoned");
        Ok(store.get_section_mut(&self.section)?.remove_option(option))
    }
}
