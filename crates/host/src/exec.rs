use std::env;
use std::path::PathBuf;

use crate::engine::ScriptEngine;
use crate::journal::SharedJournal;
use crate::{HostError, Result};

/// Environment variable carrying the command name for spawned scripts.
pub const COMMAND_NAME_ENV_VAR: &str = "GANTRY_COMMAND_NAME";
/// Environment variable carrying the command bundle path for spawned scripts.
pub const COMMAND_PATH_ENV_VAR: &str = "GANTRY_COMMAND_PATH";

/// Per-invocation parameter block the host hands to a script run.
///
/// Identity (`command_name`, `command_path`) is fixed when the host
/// dispatches the command and does not change for the lifetime of the run.
/// The journal handle is shared so the host can read entries after the
/// script finishes.
#[derive(Debug, Clone)]
pub struct ExecParams {
    pub command_name: String,
    pub command_path: PathBuf,
    /// Engine handle, present only when the host runs the script in-engine.
    pub engine: Option<ScriptEngine>,
    pub journal: SharedJournal,
}

impl ExecParams {
    pub fn new(command_name: impl Into<String>, command_path: impl Into<PathBuf>) -> Self {
        Self {
            command_name: command_name.into(),
            command_path: command_path.into(),
            engine: None,
            journal: SharedJournal::default(),
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: ScriptEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    #[must_use]
    pub fn with_journal(mut self, journal: SharedJournal) -> Self {
        self.journal = journal;
        self
    }

    /// Read identity from the process environment, for scripts the host
    /// spawns as separate processes. Blank values count as missing.
    pub fn from_env() -> Result<Self> {
        let name = require_env(COMMAND_NAME_ENV_VAR)?;
        let path = require_env(COMMAND_PATH_ENV_VAR)?;
        Ok(Self::new(name, PathBuf::from(path)))
    }
}

fn require_env(var: &'static str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(HostError::ExecParamsMissing { var }),
    }
}
