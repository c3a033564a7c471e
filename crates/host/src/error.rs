use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Error, Debug)]
pub enum HostError {
    #[error(
        "execution parameter {var} is not set; this process was not started by a Gantry command"
    )]
    ExecParamsMissing { var: &'static str },

    #[error("no command registered at {}", path.display())]
    UnknownCommand { path: PathBuf },

    #[error("journal key not found: {key}")]
    JournalKeyMissing { key: String },
}
