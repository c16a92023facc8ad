//! Template File Installer
//!
//! Copies the package manifest template into the destination container,
//! renames it after the project, rewrites its placeholders, and marks it for
//! output copy. The installer is idempotent: both conflict points, the copy
//! and the rename, treat a previous installation as success. Only the
//! rename conflict rolls back the duplicate it just created; a conflict on
//! the initial copy leaves the previous installation untouched.

use crate::error::{Error, HostError, Result};
use crate::host::{COPY_TO_OUTPUT, Host, NodeId};
use crate::propagate::propagate;
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

/// Placeholder keys mapped to their replacement values, applied in
/// insertion order
pub type PlaceholderMap = IndexMap<String, String>;

/// Install the template at `template` under `destination` as
/// `destination_name`, substituting `placeholders` in its content
pub fn install_template<H: Host>(
    host: &mut H,
    template: &Path,
    destination: NodeId,
    destination_name: &str,
    placeholders: &PlaceholderMap,
) -> Result<()> {
    let leaf = match host.create_child_leaf_from_file(destination, template) {
        Ok(node) => node,
        Err(HostError::AlreadyExists { name }) => {
            debug!(name = %name, "template copy already present, previous installation left untouched");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match host.rename(leaf, destination_name) {
        Ok(()) => {}
        Err(HostError::AlreadyExists { .. }) => {
            // The final name is taken by a previous installation; remove the
            // duplicate copy from step one instead of overwriting.
            debug!(destination_name, "renaming conflict, rolling back duplicate copy");
            host.delete(leaf)?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    let raw = host.read_content(leaf)?;
    let text = String::from_utf8(raw).map_err(|e| Error::InvalidUtf8 {
        name: destination_name.to_string(),
        source: e,
    })?;
    let rewritten = substitute(&text, placeholders);

    propagate(host, leaf, COPY_TO_OUTPUT, true)?;
    host.write_content(leaf, rewritten.as_bytes())?;
    Ok(())
}

/// Replace every occurrence of each placeholder key with its value
pub fn substitute(text: &str, placeholders: &PlaceholderMap) -> String {
    let mut out = text.to_string();
    for (key, value) in placeholders {
        out = out.replace(key.as_str(), value);
    }
    out
}
