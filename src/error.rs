use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("template source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Message suitable for the `error` field of a tool result.
    ///
    /// Collaborator diagnostics (git stderr, missing directories) are passed
    /// through without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            AppError::VersionControl(detail)
            | AppError::SourceUnavailable(detail)
            | AppError::Validation(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
