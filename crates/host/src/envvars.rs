//! Session-wide variable registry shared by every script in the process.
//!
//! Distinct from OS environment variables: values live only for the host
//! session and never reach child processes. Scripts use it to pass state
//! between runs within one session.

use std::collections::BTreeMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

static SESSION_ENV: Lazy<Mutex<BTreeMap<String, String>>> =
    Lazy::new(|| Mutex::new(BTreeMap::new()));

pub fn set_env_var(name: impl Into<String>, value: impl Into<String>) {
    SESSION_ENV
        .lock()
        .expect("session env mutex poisoned")
        .insert(name.into(), value.into());
}

#[must_use]
pub fn get_env_var(name: &str) -> Option<String> {
    SESSION_ENV
        .lock()
        .expect("session env mutex poisoned")
        .get(name)
        .cloned()
}

pub fn remove_env_var(name: &str) -> Option<String> {
    SESSION_ENV
        .lock()
        .expect("session env mutex poisoned")
        .remove(name)
}

/// Snapshot of the whole registry, sorted by name.
#[must_use]
pub fn env_vars() -> BTreeMap<String, String> {
    SESSION_ENV.lock().expect("session env mutex poisoned").clone()
}
