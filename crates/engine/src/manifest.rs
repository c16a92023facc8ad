//! Project manifest model
//!
//! [`DirectoryHost`](crate::directory::DirectoryHost) keeps everything the
//! filesystem cannot express (project identity, build configurations, and
//! leaf attributes) in a TOML manifest (`nuprep.toml`) at the project root.
//!
//! ```toml
//! [project]
//! name = "Widgets"
//! assembly-name = "Acme.Widgets"
//!
//! [configurations.Release]
//! DocumentationFile = ""
//!
//! [attributes."tools/install.ps1"]
//! copyToOutput = true
//! ```

use crate::error::{Error, Result};
use indexmap::IndexMap;
use nuprep_core::path::{AbsPath, RelPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// File name of the project manifest inside the project root
pub const MANIFEST_FILE: &str = "nuprep.toml";

/// Property table of one build configuration
pub type ConfigurationProperties = IndexMap<String, String>;

/// All build configurations of a project, keyed by display name
pub type Configurations = IndexMap<String, ConfigurationProperties>;

/// Identity of the project being prepared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Display name of the project
    pub name: String,

    /// Name of the assembly the project produces
    #[serde(rename = "assembly-name")]
    pub assembly_name: String,
}

impl ProjectInfo {
    /// Create a project identity
    pub fn new(name: impl Into<String>, assembly_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assembly_name: assembly_name.into(),
        }
    }
}

/// Persistent project state for a directory-rooted host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project identity
    pub project: ProjectInfo,

    /// Build configurations and their properties
    #[serde(default)]
    pub configurations: Configurations,

    /// Leaf attributes, keyed by slash-separated path relative to the
    /// project root
    #[serde(default)]
    pub attributes: BTreeMap<String, BTreeMap<String, bool>>,
}

impl ProjectManifest {
    /// Load the manifest from `<project_root>/nuprep.toml`
    pub fn load(project_root: &AbsPath) -> Result<Self> {
        let manifest_path = project_root.as_path().join(MANIFEST_FILE);

        let content = fs::read_to_string(&manifest_path).map_err(|e| Error::ManifestRead {
            path: manifest_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::ManifestParse {
            path: manifest_path,
            message: e.to_string(),
        })
    }

    /// Save the manifest to `<project_root>/nuprep.toml`
    pub fn save(&self, project_root: &AbsPath) -> Result<()> {
        let manifest_path = project_root.as_path().join(MANIFEST_FILE);

        let content = toml::to_string_pretty(self).map_err(|e| Error::ManifestParse {
            path: manifest_path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&manifest_path, content).map_err(|e| Error::ManifestWrite {
            path: manifest_path,
            source: e,
        })
    }

    /// Set an attribute on the entry at `path`
    pub fn set_attribute(&mut self, path: &RelPath, attribute: &str, value: bool) {
        self.attributes
            .entry(attribute_key(path))
            .or_default()
            .insert(attribute.to_string(), value);
    }

    /// Read an attribute of the entry at `path`
    pub fn attribute(&self, path: &RelPath, attribute: &str) -> Option<bool> {
        self.attributes
            .get(&attribute_key(path))
            .and_then(|attrs| attrs.get(attribute))
            .copied()
    }

    /// Re-key attribute entries under `old` to live under `new`
    ///
    /// Used when a node (or a container holding attributed leaves) is
    /// renamed.
    pub fn rename_attributes(&mut self, old: &RelPath, new: &RelPath) {
        let old_key = attribute_key(old);
        let new_key = attribute_key(new);
        let prefix = format!("{old_key}/");
        let moved: Vec<String> = self
            .attributes
            .keys()
            .filter(|key| *key == &old_key || key.starts_with(&prefix))
            .cloned()
            .collect();

        for key in moved {
            if let Some(attrs) = self.attributes.remove(&key) {
                let rekeyed = format!("{new_key}{}", &key[old_key.len()..]);
                self.attributes.insert(rekeyed, attrs);
            }
        }
    }

    /// Drop attribute entries at and under `path`
    pub fn remove_attributes(&mut self, path: &RelPath) {
        let key = attribute_key(path);
        let prefix = format!("{key}/");
        self.attributes
            .retain(|entry, _| entry != &key && !entry.starts_with(&prefix));
    }
}

/// Attribute-table key for a relative path (slash-separated on every
/// platform, so manifests stay portable)
fn attribute_key(path: &RelPath) -> String {
    path.as_path()
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}

/// Find a configuration by case-insensitive name match
pub(crate) fn find_configuration_mut<'a>(
    configurations: &'a mut Configurations,
    name: &str,
) -> Option<&'a mut ConfigurationProperties> {
    configurations
        .iter_mut()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, properties)| properties)
}

/// Set `property = value` on the named configuration
///
/// Shared by both host implementations. The configuration is matched
/// case-insensitively; the property must already exist.
pub(crate) fn set_configuration_property(
    configurations: &mut Configurations,
    configuration: &str,
    property: &str,
    value: &str,
) -> Result<()> {
    let Some(properties) = find_configuration_mut(configurations, configuration) else {
        return Err(Error::ConfigurationNotFound {
            name: configuration.to_string(),
        });
    };

    let Some(slot) = properties.get_mut(property) else {
        return Err(Error::PropertyNotFound {
            configuration: configuration.to_string(),
            property: property.to_string(),
        });
    };

    *slot = value.to_string();
    Ok(())
}

/// Read a property of the named configuration, if present
pub(crate) fn configuration_property(
    configurations: &Configurations,
    configuration: &str,
    property: &str,
) -> Option<String> {
    configurations
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(configuration))
        .and_then(|(_, properties)| properties.get(property))
        .cloned()
}
