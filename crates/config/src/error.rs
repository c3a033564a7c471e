use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("section not found: {0}")]
    SectionMissing(String),

    #[error("section already exists: {0}")]
    SectionExists(String),

    #[error("option not found: {section}.{option}")]
    OptionMissing { section: String, option: String },

    #[error("option {section}.{option} is not a {expected}")]
    WrongType {
        section: String,
        option: String,
        expected: &'static str,
    },

    #[error("no user configuration directory available on this platform")]
    NoConfigDir,

    #[error("config lock error: {0}")]
    Lock(String),
}
