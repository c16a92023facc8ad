//! Error types for CLI commands
//!
//! This module defines structured error types using thiserror, providing
//! better type safety and error handling compared to using `anyhow::Error`
//! everywhere.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid path error
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Engine operation error
    #[error(transparent)]
    Engine(#[from] nuprep_engine::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Errors from the foundation crate arrive wrapped in anyhow context
impl From<nuprep_core::Error> for CommandError {
    fn from(err: nuprep_core::Error) -> Self {
        Self::Other(err.into())
    }
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
