//! Template resources layout
//!
//! The resources root is a directory shipped with the tool: zero or more
//! subdirectories that are mirrored wholesale into the project, plus exactly
//! one file whose name carries the manifest marker, installed as the
//! project's package manifest. A missing marker file is a configuration
//! error, not a recoverable condition.

use crate::error::{Error, Result};
use crate::mirror::read_dir_sorted;
use std::path::{Path, PathBuf};

/// Substring identifying the package-manifest template among the resource
/// files; also the extension of the installed file.
pub const MANIFEST_MARKER: &str = "nuspec";

/// The immediate subdirectories of the resources root, sorted by name
pub fn resource_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let (dirs, _files) = read_dir_sorted(root)?;
    Ok(dirs)
}

/// The package-manifest template file under the resources root
///
/// Returns the first file (in name order) whose name contains
/// [`MANIFEST_MARKER`].
pub fn find_template(root: &Path) -> Result<PathBuf> {
    let (_dirs, files) = read_dir_sorted(root)?;
    files
        .into_iter()
        .find(|file| {
            file.file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| name.contains(MANIFEST_MARKER))
        })
        .ok_or_else(|| Error::TemplateNotFound {
            marker: MANIFEST_MARKER.to_string(),
            dir: root.to_path_buf(),
        })
}
