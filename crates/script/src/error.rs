use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScriptError>;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error(
        "script context requires a command invocation; \
         command name and bundle path were not provided"
    )]
    OutsideHost,

    #[error(
        "no engine handle for this run; the script was started outside \
         a host engine, so engine metadata is unavailable"
    )]
    EngineUnavailable,

    #[error(transparent)]
    Config(#[from] gantry_config::ConfigError),

    #[error(transparent)]
    Host(#[from] gantry_host::HostError),

    #[error(transparent)]
    AppData(#[from] gantry_appdata::AppDataError),
}
