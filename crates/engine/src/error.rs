//! Error types for the nuprep engine
//!
//! Host failures carry a structured kind ([`HostError`]) instead of opaque
//! message text. The recovery paths in the engine key on those kinds:
//! `AlreadyExists` and `AttributeUnsupported` are the only two classes with
//! defined recovery behavior, everything else is surfaced immediately.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failure classes surfaced by a project host
///
/// The engine classifies recovery by variant, never by message text. A host
/// implementation must report name collisions as [`HostError::AlreadyExists`]
/// and attribute writes on containers as [`HostError::AttributeUnsupported`];
/// any condition it cannot classify belongs in one of the fatal variants.
#[derive(Error, Debug)]
pub enum HostError {
    /// A child with this name already exists under the container
    #[error("a child named '{name}' already exists under this container")]
    AlreadyExists { name: String },

    /// The node does not expose this attribute (it is a container)
    #[error("attribute '{attribute}' is not supported on this node")]
    AttributeUnsupported { attribute: String },

    /// The handle does not refer to a live node
    #[error("node handle does not refer to a live node")]
    InvalidHandle,

    /// The operation requires a different node kind
    #[error("operation not valid for this node: {reason}")]
    WrongKind { reason: String },

    /// IO failure inside the host
    #[error("host IO failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unclassified host failure
    #[error("host failure: {0}")]
    Other(String),
}

/// Main error type for the nuprep engine
#[derive(Error, Debug)]
pub enum Error {
    /// A host operation failed fatally
    #[error(transparent)]
    Host(#[from] HostError),

    /// The requested build configuration does not exist
    #[error("build configuration '{name}' does not exist")]
    ConfigurationNotFound { name: String },

    /// The build configuration exists but lacks the requested property
    #[error("build configuration '{configuration}' has no property '{property}'")]
    PropertyNotFound {
        configuration: String,
        property: String,
    },

    /// No template file matching the manifest marker was found
    #[error("no template file matching '{marker}' under {}", dir.display())]
    TemplateNotFound { marker: String, dir: PathBuf },

    /// A source directory name is unusable as a destination node name
    #[error("source path {} has no usable name", path.display())]
    InvalidSourceName { path: PathBuf },

    /// Error reading a source directory
    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template content is not valid UTF-8
    #[error("invalid UTF-8 in {name}: {source}")]
    InvalidUtf8 {
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Error reading the project manifest
    #[error("failed to read project manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the project manifest
    #[error("failed to write project manifest {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project manifest does not parse
    #[error("failed to parse project manifest {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Convert from nuprep_core::Error
impl From<nuprep_core::Error> for Error {
    fn from(err: nuprep_core::Error) -> Self {
        match err {
            nuprep_core::Error::Io(e) => Error::Io(e),
            other => Error::Host(HostError::Other(other.to_string())),
        }
    }
}
