use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppDataError>;

#[derive(Error, Debug)]
pub enum AppDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no user data directory available on this platform")]
    NoDataDir,

    #[error("invalid data file id {0:?}: must be non-empty and free of path separators")]
    InvalidFileId(String),

    #[error("invalid data file extension {0:?}")]
    InvalidExtension(String),

    #[error("invalid host version {0:?}: must be non-empty, without underscores or separators")]
    InvalidHostVersion(String),
}
