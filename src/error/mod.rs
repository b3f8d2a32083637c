//! Error types for image override resolution

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OverrideError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OverrideError {
    /// Malformed image reference
    #[error("invalid image reference: {0}")]
    InvalidReference(String),
    /// Override configuration present but structurally invalid
    #[error("failed to unmarshal image override configurations: {0}")]
    Config(String),
    /// Configuration file IO errors
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for OverrideError {
    fn from(err: std::io::Error) -> Self {
        OverrideError::Io(err.to_string())
    }
}
