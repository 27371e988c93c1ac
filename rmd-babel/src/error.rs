//! Error types for format operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Reading or writing a file failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An external tool (executor, renderer, viewer) failed
    #[error("{tool} failed: {message}")]
    Collaborator { tool: String, message: String },
}

impl FormatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FormatError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn collaborator(tool: impl Into<String>, message: impl Into<String>) -> Self {
        FormatError::Collaborator {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}
