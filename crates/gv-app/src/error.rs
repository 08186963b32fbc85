//! Error types for the gv-app service layer.

use std::path::PathBuf;

use gv_views::ViewError;

/// Application error type shared by the CLI and the GUI.
///
/// Collaborator failures never travel past the workflow controllers; they are
/// logged there and replaced by a mode-scoped message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Cannot reach {url}: {message}")]
    Connectivity { url: String, message: String },

    #[error("Request to {url} failed with status {status}")]
    RequestFailure { url: String, status: u16 },

    #[error("Malformed payload from {url}: {message}")]
    MalformedPayload { url: String, message: String },

    #[error("Simulation result contains no steps")]
    EmptySequence,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type for gv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::EmptySequence => AppError::EmptySequence,
        }
    }
}
