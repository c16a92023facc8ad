//! Shared runtime state for commands

use crate::error::{CommandError, Result};
use nuprep_core::path::AbsPath;
use std::fs;
use std::path::PathBuf;

/// Resolved paths and shared state handed to every command
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    project_root: AbsPath,
}

impl RuntimeContext {
    /// Resolve the context from an optional project directory
    ///
    /// Falls back to the current directory, matching the ambient
    /// "currently selected project" the command operates on.
    pub fn resolve(project: Option<PathBuf>) -> Result<Self> {
        let raw = match project {
            Some(path) => path,
            None => std::env::current_dir()?,
        };

        let canonical = fs::canonicalize(&raw).map_err(|e| CommandError::InvalidPath {
            path: raw.display().to_string(),
            source: e,
        })?;
        let project_root = AbsPath::new(canonical)?;

        Ok(Self { project_root })
    }

    /// The project directory commands operate on
    pub fn project_root(&self) -> &AbsPath {
        &self.project_root
    }
}
