//! Directory-rooted project host
//!
//! [`DirectoryHost`] maps the project model onto a real directory tree:
//! containers are directories, leaves are files, and everything the
//! filesystem cannot hold (project identity, build configurations, leaf
//! attributes) lives in the project manifest, written back on
//! [`Host::persist`].
//!
//! Handles are interned per relative path. Listing a container registers
//! handles for children the host discovers on disk, so pre-existing entries
//! can be traversed exactly like entries the engine created itself.

use crate::error::{HostError, HostResult, Result};
use crate::host::{BuildConfigurations, Host, NodeId, NodeKind};
use crate::manifest::{self, MANIFEST_FILE, ProjectInfo, ProjectManifest};
use nuprep_core::path::{AbsPath, RelPath};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct NodeRecord {
    rel: RelPath,
    kind: NodeKind,
}

/// A project host rooted in a directory on disk
#[derive(Debug)]
pub struct DirectoryHost {
    root_dir: AbsPath,
    manifest: ProjectManifest,
    records: BTreeMap<NodeId, NodeRecord>,
    by_path: BTreeMap<RelPath, NodeId>,
    next: u64,
}

impl DirectoryHost {
    /// Create a host over `root_dir` with an already-loaded manifest
    pub fn new(root_dir: AbsPath, manifest: ProjectManifest) -> Self {
        let mut host = Self {
            root_dir,
            manifest,
            records: BTreeMap::new(),
            by_path: BTreeMap::new(),
            next: 0,
        };
        host.intern(RelPath::root(), NodeKind::Container);
        host
    }

    /// Open the project at `root_dir`, loading its manifest
    pub fn open(root_dir: AbsPath) -> Result<Self> {
        let manifest = ProjectManifest::load(&root_dir)?;
        Ok(Self::new(root_dir, manifest))
    }

    /// The project identity from the manifest
    pub fn project(&self) -> &ProjectInfo {
        &self.manifest.project
    }

    /// The current manifest state
    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    /// The directory this host is rooted in
    pub fn root_dir(&self) -> &AbsPath {
        &self.root_dir
    }

    fn abs(&self, rel: &RelPath) -> PathBuf {
        self.root_dir.as_path().join(rel.as_path())
    }

    fn record(&self, id: NodeId) -> HostResult<&NodeRecord> {
        self.records.get(&id).ok_or(HostError::InvalidHandle)
    }

    fn intern(&mut self, rel: RelPath, kind: NodeKind) -> NodeId {
        if let Some(id) = self.by_path.get(&rel).copied() {
            if let Some(record) = self.records.get_mut(&id) {
                record.kind = kind;
            }
            return id;
        }
        let id = NodeId::from_raw(self.next);
        self.next += 1;
        self.records.insert(id, NodeRecord { rel: rel.clone(), kind });
        self.by_path.insert(rel, id);
        id
    }

    fn container_rel(&self, id: NodeId) -> HostResult<RelPath> {
        let record = self.record(id)?;
        if record.kind != NodeKind::Container {
            return Err(HostError::WrongKind {
                reason: "cannot create children under a leaf".to_string(),
            });
        }
        Ok(record.rel.clone())
    }

    /// Rewrite interned paths after a node moved from `old` to `new`
    fn repath(&mut self, old: &RelPath, new: &RelPath) {
        let moved: Vec<(NodeId, RelPath)> = self
            .records
            .iter()
            .filter_map(|(id, record)| {
                let suffix = record.rel.as_path().strip_prefix(old.as_path()).ok()?;
                Some((*id, RelPath::new(new.as_path().join(suffix)).ok()?))
            })
            .collect();

        for (id, rel) in moved {
            if let Some(record) = self.records.get_mut(&id) {
                self.by_path.remove(&record.rel);
                record.rel = rel.clone();
                self.by_path.insert(rel, id);
            }
        }
    }

    /// Drop interned entries at and under `rel`
    fn forget(&mut self, rel: &RelPath) {
        let gone: Vec<NodeId> = self
            .records
            .iter()
            .filter(|(_, record)| record.rel.as_path().starts_with(rel.as_path()))
            .map(|(id, _)| *id)
            .collect();
        for id in gone {
            if let Some(record) = self.records.remove(&id) {
                self.by_path.remove(&record.rel);
            }
        }
    }
}

fn occupied(path: &Path) -> bool {
    // symlink_metadata so a dangling symlink still counts as occupying the name
    fs::symlink_metadata(path).is_ok()
}

impl Host for DirectoryHost {
    fn root(&self) -> NodeId {
        NodeId::from_raw(0)
    }

    fn create_child_container(&mut self, parent: NodeId, name: &str) -> HostResult<NodeId> {
        let parent_rel = self.container_rel(parent)?;
        let rel = parent_rel.child(name);
        let abs = self.abs(&rel);

        if occupied(&abs) {
            return Err(HostError::AlreadyExists {
                name: name.to_string(),
            });
        }
        fs::create_dir(&abs).map_err(|e| HostError::Io {
            path: abs,
            source: e,
        })?;
        Ok(self.intern(rel, NodeKind::Container))
    }

    fn create_child_leaf_from_file(&mut self, parent: NodeId, source: &Path) -> HostResult<NodeId> {
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HostError::Other(format!("unusable file name: {}", source.display())))?
            .to_string();

        let parent_rel = self.container_rel(parent)?;
        let rel = parent_rel.child(&name);
        let abs = self.abs(&rel);

        if occupied(&abs) {
            return Err(HostError::AlreadyExists { name });
        }
        fs::copy(source, &abs).map_err(|e| HostError::Io {
            path: abs,
            source: e,
        })?;
        Ok(self.intern(rel, NodeKind::Leaf))
    }

    fn set_attribute(&mut self, node: NodeId, attribute: &str, value: bool) -> HostResult<()> {
        let record = self.record(node)?;
        if record.kind != NodeKind::Leaf {
            return Err(HostError::AttributeUnsupported {
                attribute: attribute.to_string(),
            });
        }
        let rel = record.rel.clone();
        self.manifest.set_attribute(&rel, attribute, value);
        Ok(())
    }

    fn rename(&mut self, node: NodeId, new_name: &str) -> HostResult<()> {
        let record = self.record(node)?;
        if record.rel.is_root() {
            return Err(HostError::WrongKind {
                reason: "cannot rename the project root".to_string(),
            });
        }
        let old_rel = record.rel.clone();
        let parent_rel = old_rel.parent().unwrap_or_else(RelPath::root);
        let new_rel = parent_rel.child(new_name);
        if new_rel == old_rel {
            return Ok(());
        }

        let new_abs = self.abs(&new_rel);
        if occupied(&new_abs) {
            return Err(HostError::AlreadyExists {
                name: new_name.to_string(),
            });
        }
        let old_abs = self.abs(&old_rel);
        fs::rename(&old_abs, &new_abs).map_err(|e| HostError::Io {
            path: old_abs,
            source: e,
        })?;

        self.repath(&old_rel, &new_rel);
        self.manifest.rename_attributes(&old_rel, &new_rel);
        Ok(())
    }

    fn delete(&mut self, node: NodeId) -> HostResult<()> {
        let record = self.record(node)?.clone();
        if record.rel.is_root() {
            return Err(HostError::WrongKind {
                reason: "cannot delete the project root".to_string(),
            });
        }
        let abs = self.abs(&record.rel);
        let removal = match record.kind {
            NodeKind::Leaf => fs::remove_file(&abs),
            NodeKind::Container => fs::remove_dir_all(&abs),
        };
        removal.map_err(|e| HostError::Io {
            path: abs,
            source: e,
        })?;

        self.forget(&record.rel);
        self.manifest.remove_attributes(&record.rel);
        Ok(())
    }

    fn list_children(&mut self, container: NodeId) -> HostResult<Vec<NodeId>> {
        let rel = {
            let record = self.record(container)?;
            if record.kind != NodeKind::Container {
                return Err(HostError::WrongKind {
                    reason: "leaves have no children".to_string(),
                });
            }
            record.rel.clone()
        };
        let abs = self.abs(&rel);

        let mut entries: Vec<(String, NodeKind)> = Vec::new();
        let read = fs::read_dir(&abs).map_err(|e| HostError::Io {
            path: abs.clone(),
            source: e,
        })?;
        for entry in read {
            let entry = entry.map_err(|e| HostError::Io {
                path: abs.clone(),
                source: e,
            })?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            // The manifest is host bookkeeping, not a project item.
            if rel.is_root() && name == MANIFEST_FILE {
                continue;
            }
            let file_type = entry.file_type().map_err(|e| HostError::Io {
                path: entry.path(),
                source: e,
            })?;
            let kind = if file_type.is_dir() {
                NodeKind::Container
            } else {
                NodeKind::Leaf
            };
            entries.push((name, kind));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(entries
            .into_iter()
            .map(|(name, kind)| self.intern(rel.child(&name), kind))
            .collect())
    }

    fn node_name(&self, node: NodeId) -> HostResult<String> {
        let record = self.record(node)?;
        if record.rel.is_root() {
            return Ok(self.manifest.project.name.clone());
        }
        record
            .rel
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| HostError::Other(format!("node path has no name: {}", record.rel)))
    }

    fn node_kind(&self, node: NodeId) -> HostResult<NodeKind> {
        Ok(self.record(node)?.kind)
    }

    fn read_content(&self, node: NodeId) -> HostResult<Vec<u8>> {
        let record = self.record(node)?;
        if record.kind != NodeKind::Leaf {
            return Err(HostError::WrongKind {
                reason: "containers have no content".to_string(),
            });
        }
        let abs = self.abs(&record.rel);
        fs::read(&abs).map_err(|e| HostError::Io {
            path: abs,
            source: e,
        })
    }

    fn write_content(&mut self, node: NodeId, content: &[u8]) -> HostResult<()> {
        let record = self.record(node)?;
        if record.kind != NodeKind::Leaf {
            return Err(HostError::WrongKind {
                reason: "containers have no content".to_string(),
            });
        }
        let abs = self.abs(&record.rel);
        fs::write(&abs, content).map_err(|e| HostError::Io {
            path: abs,
            source: e,
        })
    }

    fn persist(&mut self) -> HostResult<()> {
        self.manifest
            .save(&self.root_dir)
            .map_err(|e| HostError::Other(e.to_string()))
    }
}

impl BuildConfigurations for DirectoryHost {
    fn set_configuration_property(
        &mut self,
        configuration: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        manifest::set_configuration_property(
            &mut self.manifest.configurations,
            configuration,
            property,
            value,
        )
    }

    fn configuration_property(&self, configuration: &str, property: &str) -> Option<String> {
        manifest::configuration_property(&self.manifest.configurations, configuration, property)
    }
}
