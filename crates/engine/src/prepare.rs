//! Orchestrator
//!
//! [`prepare`] sequences a full run against one project: mirror every
//! top-level resource subdirectory, stamp the output-copy attribute over
//! each mirrored subtree, install the package-manifest template, patch the
//! Release documentation output, and persist the project model. The
//! sequence owns no state beyond the single invocation and performs no
//! transactional rollback: a fatal error aborts the remaining steps and
//! leaves the work already done in place.

use crate::error::Result;
use crate::host::{BuildConfigurations, COPY_TO_OUTPUT, Host};
use crate::install::{PlaceholderMap, install_template};
use crate::manifest::ProjectInfo;
use crate::mirror::mirror;
use crate::propagate::propagate;
use crate::resources::{MANIFEST_MARKER, find_template, resource_directories};
use std::path::Path;
use tracing::{debug, info};

/// Build configuration patched with the documentation output
pub const RELEASE_CONFIGURATION: &str = "Release";

/// Property receiving the documentation output path
pub const DOCUMENTATION_FILE_PROPERTY: &str = "DocumentationFile";

/// Placeholder rewritten with the project's assembly name
pub const ASSEMBLY_NAME_PLACEHOLDER: &str = "$assemblyname$";

/// What a prepare run did, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareStats {
    /// Names of resource subdirectories mirrored into the project
    pub mirrored: Vec<String>,
    /// Names of resource subdirectories skipped because the project already
    /// had them
    pub skipped: Vec<String>,
    /// Name the package manifest was installed under
    pub manifest_name: String,
}

/// Run the full preparation sequence against `host`
pub fn prepare<H: Host + BuildConfigurations>(
    host: &mut H,
    resources_root: &Path,
    project: &ProjectInfo,
) -> Result<PrepareStats> {
    let root = host.root();
    let mut stats = PrepareStats::default();

    for dir in resource_directories(resources_root)? {
        let label = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        match mirror(host, &dir, root)? {
            Some(node) => {
                propagate(host, node, COPY_TO_OUTPUT, true)?;
                debug!(directory = %label, "mirrored and marked for output copy");
                stats.mirrored.push(label);
            }
            None => {
                debug!(directory = %label, "skipped");
                stats.skipped.push(label);
            }
        }
    }

    let template = find_template(resources_root)?;
    let manifest_name = format!("{}.{MANIFEST_MARKER}", project.name);
    let mut placeholders = PlaceholderMap::new();
    placeholders.insert(
        ASSEMBLY_NAME_PLACEHOLDER.to_string(),
        project.assembly_name.clone(),
    );
    install_template(host, &template, root, &manifest_name, &placeholders)?;
    stats.manifest_name = manifest_name;

    let documentation = format!("bin\\Release\\{}.xml", project.assembly_name);
    host.set_configuration_property(
        RELEASE_CONFIGURATION,
        DOCUMENTATION_FILE_PROPERTY,
        &documentation,
    )?;

    host.persist()?;
    info!(
        project = %project.name,
        mirrored = stats.mirrored.len(),
        skipped = stats.skipped.len(),
        "project prepared for packaging"
    );
    Ok(stats)
}
