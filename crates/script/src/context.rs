use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gantry_config::ConfigError;
use gantry_host::{
    CommandInfo, CustomResults, ExecParams, FrameworkVersion, HostServices, OutputWindow,
    RibbonButton, ScriptEngine, GANTRY_VERSION,
};

use crate::config::{SectionHandle, CONFIG_SECTION_POSTFIX};
use crate::{Result, ScriptError};

/// File id used when a script asks for its instance data file without
/// naming one.
pub const DEFAULT_INSTANCE_FILE_ID: &str = "defaultdata";

/// Per-run facade over the host services, handed to a script when its
/// command is dispatched.
///
/// The context pins the invocation identity (command name and bundle path)
/// for the whole run and routes every host interaction through one value,
/// so a script never reaches for session globals. Constructing one outside
/// a command invocation fails instead of producing a half-usable context.
pub struct ScriptContext {
    exec: ExecParams,
    services: Arc<HostServices>,
    results: CustomResults,
}

impl ScriptContext {
    /// Build the facade for one command invocation.
    ///
    /// `exec` must carry a real identity; a blank command name or an empty
    /// bundle path means this process is not running as a host command, and
    /// the error says so rather than deferring the failure to the first
    /// accessor.
    pub fn new(exec: ExecParams, services: Arc<HostServices>) -> Result<Self> {
        if exec.command_name.trim().is_empty() || exec.command_path.as_os_str().is_empty() {
            return Err(ScriptError::OutsideHost);
        }
        log::debug!(
            "executing script: {} @ {}",
            exec.command_name,
            exec.command_path.display()
        );
        Ok(Self {
            exec,
            services,
            results: CustomResults::new(),
        })
    }

    #[must_use]
    pub fn command_name(&self) -> &str {
        &self.exec.command_name
    }

    #[must_use]
    pub fn command_path(&self) -> &Path {
        &self.exec.command_path
    }

    /// Registry metadata for this command, looked up fresh on every call so
    /// an extension reload is visible to the next caller.
    pub fn info(&self) -> Result<CommandInfo> {
        let registry = self.services.registry();
        let guard = registry.lock().expect("command registry mutex poisoned");
        Ok(guard.command_at(&self.exec.command_path)?.clone())
    }

    /// Version of the Gantry framework running this script.
    #[must_use]
    pub fn gantry_version(&self) -> FrameworkVersion {
        *GANTRY_VERSION
    }

    /// Engine handle for this run. Scripts spawned outside a host engine
    /// have none, and asking is an error rather than a silent `None`.
    pub fn engine(&self) -> Result<&ScriptEngine> {
        self.exec.engine.as_ref().ok_or(ScriptError::EngineUnavailable)
    }

    /// The session output window.
    #[must_use]
    pub fn output(&self) -> Arc<OutputWindow> {
        self.services.output()
    }

    /// This command's private config section, created on first use.
    ///
    /// The section is named `<command name>config`. Only a missing section
    /// triggers creation; any other store failure propagates untouched.
    pub fn config(&self) -> Result<SectionHandle> {
        let name = format!("{}{CONFIG_SECTION_POSTFIX}", self.exec.command_name);
        let store = self.services.config();
        {
            let mut guard = store.lock().expect("config store mutex poisoned");
            match guard.get_section(&name) {
                Ok(_) => {}
                Err(ConfigError::SectionMissing(_)) => {
                    guard.add_section(&name)?;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(SectionHandle::new(store, name))
    }

    /// Flush the whole user configuration to disk: every pending change in
    /// the process, not just this command's section.
    pub fn save_config(&self) -> Result<()> {
        let store = self.services.config();
        let mut guard = store.lock().expect("config store mutex poisoned");
        guard.save_changes()?;
        Ok(())
    }

    /// This command's button on the ribbon, if the host placed one.
    ///
    /// Scans tabs in display order and returns the first button whose name
    /// matches the command name exactly. A missing button is `None`; plenty
    /// of commands run without one.
    #[must_use]
    pub fn ui_button(&self) -> Option<RibbonButton> {
        let ribbon = self.services.ribbon();
        let guard = ribbon.lock().expect("ribbon mutex poisoned");
        guard.find_button(&self.exec.command_name).cloned()
    }

    /// Custom results recorder for this run.
    #[must_use]
    pub fn results(&self) -> &CustomResults {
        &self.results
    }

    /// Data file shared across host versions. Namespaced to this command.
    pub fn universal_data_file(&self, file_id: &str, file_ext: &str) -> Result<PathBuf> {
        let path = self
            .services
            .appdata()
            .universal_data_file(&self.scoped_id(file_id), file_ext)?;
        Ok(path)
    }

    /// Data file tied to the current host version. Namespaced to this
    /// command.
    pub fn data_file(&self, file_id: &str, file_ext: &str) -> Result<PathBuf> {
        let path = self
            .services
            .appdata()
            .data_file(&self.scoped_id(file_id), file_ext)?;
        Ok(path)
    }

    /// Data file tied to this host session, cleaned up after it ends.
    /// Namespaced to this command.
    pub fn instance_data_file(&self, file_id: &str) -> Result<PathBuf> {
        let path = self
            .services
            .appdata()
            .instance_data_file(&self.scoped_id(file_id))?;
        Ok(path)
    }

    /// The command's conventional instance data file.
    pub fn default_instance_data_file(&self) -> Result<PathBuf> {
        self.instance_data_file(DEFAULT_INSTANCE_FILE_ID)
    }

    /// Path of a file shipped inside this command's bundle.
    #[must_use]
    pub fn bundle_file(&self, file_name: &str) -> PathBuf {
        self.exec.command_path.join(file_name)
    }

    /// Replace the journal's contents with a single entry.
    ///
    /// Destructive on purpose: the journal carries at most one message per
    /// run, and each write discards whatever was there before, including
    /// entries under other keys.
    pub fn journal_write(&self, key: impl Into<String>, message: impl Into<String>) {
        let mut journal = self.exec.journal.lock().expect("journal mutex poisoned");
        journal.clear();
        journal.insert(key, message);
    }

    /// Read a journal entry; a missing key is an error.
    pub fn journal_read(&self, key: &str) -> Result<String> {
        let journal = self.exec.journal.lock().expect("journal mutex poisoned");
        Ok(journal.get(key)?)
    }

    /// End the script run immediately. Nothing after this call executes and
    /// no cleanup hooks fire.
    pub fn exit(&self) -> ! {
        std::process::exit(0)
    }

    fn scoped_id(&self, file_id: &str) -> String {
        format!("{}_{file_id}", self.exec.command_name)
    }
}

// Only the invocation identity; the service handles carry nothing worth
// printing.
impl fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptContext")
            .field("command_name", &self.exec.command_name)
            .field("command_path", &self.exec.command_path)
            .finish_non_exhaustive()
    }
}
