//! # Gantry Script
//!
//! The per-run context facade script authors hold while their command
//! executes. One [`ScriptContext`] wraps one invocation: identity, registry
//! metadata, the output window, the command's private config section, data
//! file paths, the run journal, and the custom results recorder all hang
//! off it.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gantry_host::{ExecParams, HostServices};
//! use gantry_script::ScriptContext;
//!
//! fn run(services: Arc<HostServices>) -> gantry_script::Result<()> {
//!     let ctx = ScriptContext::new(ExecParams::from_env()?, services)?;
//!     ctx.output().print_text(&format!("running {}", ctx.command_name()));
//!
//!     let cfg = ctx.config()?;
//!     cfg.set_option("last_run", "today")?;
//!     ctx.save_config()?;
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod error;
pub mod legacy;

pub use config::{SectionHandle, CONFIG_SECTION_POSTFIX};
pub use context::{ScriptContext, DEFAULT_INSTANCE_FILE_ID};
pub use error::{Result, ScriptError};

// Session variable registry, re-exported so scripts import one crate.
pub use gantry_host::envvars;
