//! # Gantry AppData
//!
//! Managed data-file paths for the Gantry scripting layer.
//!
//! Scripts need scratch and cache files that outlive a single run. The host
//! keeps them in one per-user directory with three cleanup lifetimes:
//!
//! - **universal**: shared across host versions, never cleaned;
//! - **data**: stamped with the host version, survives restarts;
//! - **instance**: stamped with the session, purged at the next session's
//!   cleanup pass.
//!
//! [`AppDataPaths`] builds the paths; it never creates the files themselves.

mod cleanup;
mod error;
mod paths;

pub use cleanup::{list_managed_files, CleanupReport};
pub use error::{AppDataError, Result};
pub use paths::{AppDataPaths, DATA_DIR_NAME, FILE_PREFIX, TEMP_FILE_EXT};
