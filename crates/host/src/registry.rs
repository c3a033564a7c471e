use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::{HostError, Result};

/// Registry handle shared between the host loader and script facades.
/// Extension reloads mutate it in place, so lookups made after a reload see
/// the new registrations.
pub type SharedRegistry = Arc<Mutex<CommandRegistry>>;

/// Registration metadata for one command bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub path: PathBuf,
    /// Extension (ribbon group) the bundle was discovered under.
    pub extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl CommandInfo {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            extension: extension.into(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Commands the host discovered at session start, keyed by bundle path.
///
/// Lookups go straight to the registry every time; nothing is cached on the
/// script side, so a reload is visible to the next lookup.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<PathBuf, CommandInfo>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle. Re-registering the same path replaces the earlier
    /// entry, which is what a reload does.
    pub fn register(&mut self, info: CommandInfo) {
        self.commands.insert(info.path.clone(), info);
    }

    pub fn command_at(&self, path: &Path) -> Result<&CommandInfo> {
        self.commands.get(path).ok_or_else(|| HostError::UnknownCommand {
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.values()
    }

    /// Wrap in a shared handle for the session.
    #[must_use]
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }
}
