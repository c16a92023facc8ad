//! Type-safe path types
//!
//! This module provides two distinct path types using the newtype pattern:
//!
//! - [`AbsPath`]: Absolute filesystem paths
//! - [`RelPath`]: Relative paths (no leading slash)
//!
//! These types prevent common path manipulation errors at compile time: an
//! engine that addresses destination nodes by their path relative to the
//! project root can never accidentally treat one as an on-disk location
//! without joining it onto an [`AbsPath`] first.
//!
//! # Examples
//!
//! ```
//! use nuprep_core::path::{AbsPath, RelPath};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an absolute path
//! let project = AbsPath::new("/work/widgets".into())?;
//!
//! // Create a relative path
//! let manifest = RelPath::new("tools/install.ps1".into())?;
//!
//! // Join them to get a new absolute path
//! let on_disk = project.join(&manifest);
//! assert_eq!(on_disk.as_path().to_str().unwrap(), "/work/widgets/tools/install.ps1");
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An absolute path on the filesystem
///
/// This type guarantees that the path is absolute. Use this for file
/// operations and as base directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuprep_core::path::AbsPath;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let abs = AbsPath::new("/work/widgets".into())?;
    /// assert!(abs.as_path().is_absolute());
    ///
    /// let err = AbsPath::new("relative/path".into());
    /// assert!(err.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(AbsPath(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Create a new `AbsPath` from a reference to a `Path`
    ///
    /// This will clone the path internally.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(path.to_path_buf())
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with a relative path to create a new absolute path
    pub fn join(&self, rel: &RelPath) -> Self {
        AbsPath(self.0.join(rel.as_path()))
    }

    /// Get the parent directory
    ///
    /// Returns `None` if this is the root directory.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| AbsPath(p.to_path_buf()))
    }

    /// Strip a base directory prefix to get a relative path
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not under `base`.
    pub fn strip_prefix(&self, base: &AbsPath) -> Result<RelPath> {
        self.0
            .strip_prefix(&base.0)
            .map(|p| RelPath(p.to_path_buf()))
            .map_err(|_| Error::InvalidPathPrefix {
                path: self.0.clone(),
                base: base.0.clone(),
            })
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }
}

/// A relative path (no leading slash)
///
/// This type guarantees that the path is relative. Destination-tree nodes are
/// addressed by their `RelPath` below the project root.
///
/// # Examples
///
/// ```
/// use nuprep_core::path::RelPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rel = RelPath::new("tools/install.ps1".into())?;
/// assert_eq!(rel.as_path().to_str().unwrap(), "tools/install.ps1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelPath(PathBuf);

impl RelPath {
    /// Create a new `RelPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_relative() {
            Ok(RelPath(path))
        } else {
            Err(Error::PathNotRelative { path })
        }
    }

    /// The empty relative path, addressing the root itself
    pub fn root() -> Self {
        RelPath(PathBuf::new())
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with another relative path
    pub fn join(&self, other: &RelPath) -> Self {
        RelPath(self.0.join(&other.0))
    }

    /// Append a single path component
    ///
    /// Unlike [`RelPath::new`], this is infallible: a bare name can never
    /// make the path absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuprep_core::path::RelPath;
    ///
    /// let tools = RelPath::root().child("tools");
    /// let script = tools.child("install.ps1");
    /// assert_eq!(script.as_path().to_str().unwrap(), "tools/install.ps1");
    /// ```
    pub fn child(&self, name: &str) -> Self {
        RelPath(self.0.join(name))
    }

    /// Get the parent directory
    ///
    /// Returns `None` if this is a single component path.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| RelPath(p.to_path_buf()))
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }

    /// Check whether this is the empty (root) path
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

// Implement Display for all path types
impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
