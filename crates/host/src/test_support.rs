//! Shared helpers for tests that touch process-wide state.

use std::env;
use std::ffi::OsString;
use std::sync::Mutex;

/// Tests run in parallel, but OS environment variables are per-process.
/// Every test that reads or writes them holds this lock first.
pub(crate) static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clears the given variables for the test and restores their previous
/// values on drop.
pub(crate) struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    pub(crate) fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for &key in keys {
            saved.push((key.to_string(), env::var_os(key)));
            env::remove_var(key);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}
