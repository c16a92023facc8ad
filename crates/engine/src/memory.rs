//! In-memory project host
//!
//! [`MemoryHost`] is a complete project model held in memory: a node tree,
//! leaf attributes, and build configurations. It is the reference host for
//! engine semantics and the primary test double. Nothing it does touches
//! the filesystem except reading source files handed to
//! [`Host::create_child_leaf_from_file`].

use crate::error::{HostError, HostResult, Result};
use crate::host::{BuildConfigurations, Host, NodeId, NodeKind};
use crate::manifest::{self, ConfigurationProperties, Configurations};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
struct Node {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    content: Vec<u8>,
    attributes: BTreeMap<String, bool>,
}

/// A project model held entirely in memory
#[derive(Debug)]
pub struct MemoryHost {
    nodes: BTreeMap<NodeId, Node>,
    next: u64,
    root: NodeId,
    configurations: Configurations,
    persist_count: usize,
}

impl MemoryHost {
    /// Create a host whose root container carries the project's name
    pub fn new(project_name: impl Into<String>) -> Self {
        let root = NodeId::from_raw(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                name: project_name.into(),
                kind: NodeKind::Container,
                parent: None,
                children: Vec::new(),
                content: Vec::new(),
                attributes: BTreeMap::new(),
            },
        );
        Self {
            nodes,
            next: 1,
            root,
            configurations: Configurations::new(),
            persist_count: 0,
        }
    }

    /// Register a build configuration with its initial properties
    pub fn insert_configuration(&mut self, name: &str, properties: &[(&str, &str)]) {
        let table: ConfigurationProperties = properties
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        self.configurations.insert(name.to_string(), table);
    }

    /// Create a leaf directly from in-memory content
    ///
    /// Same collision semantics as the file-copy path.
    pub fn create_child_leaf(
        &mut self,
        parent: NodeId,
        name: &str,
        content: &[u8],
    ) -> HostResult<NodeId> {
        self.insert_child(parent, name, NodeKind::Leaf, content.to_vec())
    }

    /// Look up a child of `parent` by name
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let parent = self.nodes.get(&parent)?;
        parent
            .children
            .iter()
            .copied()
            .find(|id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    /// Read an attribute of a node, if set
    pub fn attribute(&self, node: NodeId, attribute: &str) -> Option<bool> {
        self.nodes
            .get(&node)?
            .attributes
            .get(attribute)
            .copied()
    }

    /// How many times [`Host::persist`] has been called
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }

    fn node(&self, id: NodeId) -> HostResult<&Node> {
        self.nodes.get(&id).ok_or(HostError::InvalidHandle)
    }

    fn node_mut(&mut self, id: NodeId) -> HostResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(HostError::InvalidHandle)
    }

    fn has_child_named(&self, parent: NodeId, name: &str) -> HostResult<bool> {
        let parent = self.node(parent)?;
        Ok(parent
            .children
            .iter()
            .any(|id| self.nodes.get(id).is_some_and(|n| n.name == name)))
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
        content: Vec<u8>,
    ) -> HostResult<NodeId> {
        if self.node(parent)?.kind != NodeKind::Container {
            return Err(HostError::WrongKind {
                reason: "cannot create children under a leaf".to_string(),
            });
        }
        if self.has_child_named(parent, name)? {
            return Err(HostError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let id = NodeId::from_raw(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            Node {
                name: name.to_string(),
                kind,
                parent: Some(parent),
                children: Vec::new(),
                content,
                attributes: BTreeMap::new(),
            },
        );
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }
}

impl Host for MemoryHost {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_child_container(&mut self, parent: NodeId, name: &str) -> HostResult<NodeId> {
        self.insert_child(parent, name, NodeKind::Container, Vec::new())
    }

    fn create_child_leaf_from_file(&mut self, parent: NodeId, source: &Path) -> HostResult<NodeId> {
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HostError::Other(format!("unusable file name: {}", source.display())))?
            .to_string();
        let content = fs::read(source).map_err(|e| HostError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        self.insert_child(parent, &name, NodeKind::Leaf, content)
    }

    fn set_attribute(&mut self, node: NodeId, attribute: &str, value: bool) -> HostResult<()> {
        let node = self.node_mut(node)?;
        if node.kind != NodeKind::Leaf {
            return Err(HostError::AttributeUnsupported {
                attribute: attribute.to_string(),
            });
        }
        node.attributes.insert(attribute.to_string(), value);
        Ok(())
    }

    fn rename(&mut self, node: NodeId, new_name: &str) -> HostResult<()> {
        let Some(parent) = self.node(node)?.parent else {
            return Err(HostError::WrongKind {
                reason: "cannot rename the project root".to_string(),
            });
        };
        let collides = {
            let parent_node = self.node(parent)?;
            parent_node.children.iter().any(|id| {
                *id != node && self.nodes.get(id).is_some_and(|n| n.name == new_name)
            })
        };
        if collides {
            return Err(HostError::AlreadyExists {
                name: new_name.to_string(),
            });
        }
        self.node_mut(node)?.name = new_name.to_string();
        Ok(())
    }

    fn delete(&mut self, node: NodeId) -> HostResult<()> {
        if let Some(parent) = self.node(node)?.parent {
            self.node_mut(parent)?.children.retain(|id| *id != node);
        }

        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                pending.extend(removed.children);
            }
        }
        Ok(())
    }

    fn list_children(&mut self, container: NodeId) -> HostResult<Vec<NodeId>> {
        let node = self.node(container)?;
        if node.kind != NodeKind::Container {
            return Err(HostError::WrongKind {
                reason: "leaves have no children".to_string(),
            });
        }
        let mut children = node.children.clone();
        children.sort_by_key(|id| self.nodes.get(id).map(|n| n.name.clone()));
        Ok(children)
    }

    fn node_name(&self, node: NodeId) -> HostResult<String> {
        Ok(self.node(node)?.name.clone())
    }

    fn node_kind(&self, node: NodeId) -> HostResult<NodeKind> {
        Ok(self.node(node)?.kind)
    }

    fn read_content(&self, node: NodeId) -> HostResult<Vec<u8>> {
        let node = self.node(node)?;
        if node.kind != NodeKind::Leaf {
            return Err(HostError::WrongKind {
                reason: "containers have no content".to_string(),
            });
        }
        Ok(node.content.clone())
    }

    fn write_content(&mut self, node: NodeId, content: &[u8]) -> HostResult<()> {
        let node = self.node_mut(node)?;
        if node.kind != NodeKind::Leaf {
            return Err(HostError::WrongKind {
                reason: "containers have no content".to_string(),
            });
        }
        node.content = content.to_vec();
        Ok(())
    }

    fn persist(&mut self) -> HostResult<()> {
        self.persist_count += 1;
        Ok(())
    }
}

impl BuildConfigurations for MemoryHost {
    fn set_configuration_property(
        &mut self,
        configuration: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        manifest::set_configuration_property(
            &mut self.configurations,
            configuration,
            property,
            value,
        )
    }

    fn configuration_property(&self, configuration: &str, property: &str) -> Option<String> {
        manifest::configuration_property(&self.configurations, configuration, property)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_create_container_and_collision() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();

        let tools = host.create_child_container(root, "tools").unwrap();
        assert_eq!(host.node_kind(tools).unwrap(), NodeKind::Container);

        let err = host.create_child_container(root, "tools").unwrap_err();
        assert!(matches!(err, HostError::AlreadyExists { name } if name == "tools"));
    }

    #[test]
    fn test_leaf_collides_with_container_of_same_name() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        host.create_child_container(root, "shared").unwrap();

        let err = host.create_child_leaf(root, "shared", b"x").unwrap_err();
        assert!(matches!(err, HostError::AlreadyExists { .. }));
    }

    #[test]
    fn test_attribute_rejected_on_container() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        let tools = host.create_child_container(root, "tools").unwrap();

        let err = host.set_attribute(tools, "copyToOutput", true).unwrap_err();
        assert!(matches!(
            err,
            HostError::AttributeUnsupported { attribute } if attribute == "copyToOutput"
        ));
    }

    #[test]
    fn test_attribute_set_on_leaf() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        let leaf = host.create_child_leaf(root, "a.txt", b"hi").unwrap();

        host.set_attribute(leaf, "copyToOutput", true).unwrap();
        assert_eq!(host.attribute(leaf, "copyToOutput"), Some(true));
    }

    #[test]
    fn test_rename_collision() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        host.create_child_leaf(root, "taken.nuspec", b"").unwrap();
        let leaf = host.create_child_leaf(root, "pkg.nuspec", b"").unwrap();

        let err = host.rename(leaf, "taken.nuspec").unwrap_err();
        assert!(matches!(err, HostError::AlreadyExists { .. }));
        // The failed rename must leave the node untouched.
        assert_eq!(host.node_name(leaf).unwrap(), "pkg.nuspec");
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        let tools = host.create_child_container(root, "tools").unwrap();
        host.create_child_leaf(tools, "a.txt", b"a").unwrap();

        host.delete(tools).unwrap();
        assert!(host.find_child(root, "tools").is_none());
        assert!(matches!(
            host.node_name(tools),
            Err(HostError::InvalidHandle)
        ));
    }

    #[test]
    fn test_list_children_sorted_by_name() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        host.create_child_leaf(root, "b.txt", b"").unwrap();
        host.create_child_leaf(root, "a.txt", b"").unwrap();

        let names: Vec<String> = host
            .list_children(root)
            .unwrap()
            .into_iter()
            .map(|id| host.node_name(id).unwrap())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_content_roundtrip() {
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        let leaf = host.create_child_leaf(root, "pkg.nuspec", b"old").unwrap();

        host.write_content(leaf, b"new").unwrap();
        assert_eq!(host.read_content(leaf).unwrap(), b"new");
    }

    #[test]
    fn test_configuration_lookup_case_insensitive() {
        let mut host = MemoryHost::new("Widgets");
        host.insert_configuration("Release", &[("DocumentationFile", "")]);

        host.set_configuration_property("RELEASE", "DocumentationFile", "bin\\Release\\W.xml")
            .unwrap();
        assert_eq!(
            host.configuration_property("release", "DocumentationFile")
                .as_deref(),
            Some("bin\\Release\\W.xml")
        );
    }

    #[test]
    fn test_missing_configuration_is_fatal() {
        let mut host = MemoryHost::new("Widgets");
        let err = host
            .set_configuration_property("Release", "DocumentationFile", "x")
            .unwrap_err();
        assert!(matches!(err, Error::ConfigurationNotFound { .. }));
    }
}
