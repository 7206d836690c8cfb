use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to spawn classifier '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("classifier exited with code {code:?}: {stderr}")]
    ClassifierExit { code: Option<i32>, stderr: String },

    #[error("metadata access failed for '{name}': {reason}")]
    Metadata { name: String, reason: String },

    #[error("could not list folder '{path}': {reason}")]
    Selection { path: String, reason: String },

    #[error("report '{file_name}' could not be created in {destination}: {reason}")]
    ReportPersist {
        file_name: String,
        destination: String,
        reason: String,
    },

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
