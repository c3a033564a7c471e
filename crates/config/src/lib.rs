//! # Gantry Config
//!
//! User configuration store for the Gantry scripting layer.
//!
//! Configuration lives in one TOML document per user; top-level tables are
//! **sections**. Script-facing code asks for sections by name, reads typed
//! options out of them, and explicitly flushes the whole document with
//! [`ConfigStore::save_changes`]. Nothing is persisted implicitly.
//!
//! ## Example
//!
//! ```no_run
//! use gantry_config::ConfigStore;
//!
//! fn main() -> gantry_config::Result<()> {
//!     let mut store = ConfigStore::load_default()?;
//!     let section = store.add_section("exporterconfig")?;
//!     section.set_option("format", "dwg");
//!     store.save_changes()?;
//!     Ok(())
//! }
//! ```

mod error;
mod section;
mod store;

pub use error::{ConfigError, Result};
pub use section::Section;
pub use store::{default_config_path, ConfigStore, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

// Options are raw TOML values; re-exported so callers can build them without
// depending on `toml` directly.
pub use toml::value::Value;
