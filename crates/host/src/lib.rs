//! # Gantry Host
//!
//! Host-side services for the Gantry scripting layer: the execution
//! parameter block a command invocation carries, the run journal, the
//! session output window, the ribbon model, the custom results recorder,
//! the command registry, and the [`HostServices`] aggregate handed to
//! script facades.
//!
//! Everything here is host infrastructure. Scripts consume these services
//! through `gantry-script`, which wraps them in a per-run facade.

mod engine;
pub mod envvars;
mod error;
mod exec;
mod journal;
mod output;
mod registry;
mod results;
mod ribbon;
mod services;
mod version;

#[cfg(test)]
mod test_support;

pub use engine::ScriptEngine;
pub use error::{HostError, Result};
pub use exec::{ExecParams, COMMAND_NAME_ENV_VAR, COMMAND_PATH_ENV_VAR};
pub use journal::{Journal, SharedJournal};
pub use output::{BufferSink, ConsoleSink, OutputKind, OutputSink, OutputWindow};
pub use registry::{CommandInfo, CommandRegistry, SharedRegistry};
pub use results::{CustomResults, RESERVED_FIELDS};
pub use ribbon::{Ribbon, RibbonButton, RibbonTab, SharedRibbon};
pub use services::{HostInfo, HostServices};
pub use version::{FrameworkVersion, GANTRY_VERSION};
