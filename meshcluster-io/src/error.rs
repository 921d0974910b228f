//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for meshcluster_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Io(inner) => meshcluster_core::Error::Io(inner),
            missing @ IoError::FileNotFound { .. } => meshcluster_core::Error::Io(
                std::io::Error::new(std::io::ErrorKind::NotFound, missing.to_string()),
            ),
            other => meshcluster_core::Error::InvalidData(other.to_string()),
        }
    }
}
