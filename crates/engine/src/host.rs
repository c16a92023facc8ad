//! Host capability traits
//!
//! The destination tree is owned and mutated by a host. The engine reaches
//! it exclusively through the narrow interfaces defined here and never
//! assumes direct structural access. Handles are opaque and must not be
//! retained across operations the engine did not itself perform.

use crate::error::{HostResult, Result};
use std::path::Path;

/// The attribute instructing the build step to copy a leaf to its output
/// location.
pub const COPY_TO_OUTPUT: &str = "copyToOutput";

/// Opaque handle to a node in a host's project model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a handle from a raw id
    ///
    /// Host implementations mint these; engine code only passes them back.
    pub fn from_raw(raw: u64) -> Self {
        NodeId(raw)
    }

    /// The raw id backing this handle
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The kind of a destination-tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Groups child nodes (mirrors a source directory)
    Container,
    /// Represents a single file (mirrors a source file)
    Leaf,
}

/// Hierarchical-container interface of a project host
///
/// Display names are unique among siblings, enforced by the host: creation
/// and rename report collisions as [`crate::error::HostError::AlreadyExists`].
/// Attribute writes are leaf-specific; containers reject them with
/// [`crate::error::HostError::AttributeUnsupported`].
pub trait Host {
    /// The container representing the project root
    fn root(&self) -> NodeId;

    /// Create a child container under `parent`
    fn create_child_container(&mut self, parent: NodeId, name: &str) -> HostResult<NodeId>;

    /// Create a leaf under `parent` holding a copy of the file at `source`
    ///
    /// The leaf takes the source file's name.
    fn create_child_leaf_from_file(&mut self, parent: NodeId, source: &Path) -> HostResult<NodeId>;

    /// Set a boolean attribute on a leaf
    fn set_attribute(&mut self, node: NodeId, attribute: &str, value: bool) -> HostResult<()>;

    /// Rename a node within its container
    fn rename(&mut self, node: NodeId, new_name: &str) -> HostResult<()>;

    /// Delete a node (and, for containers, its subtree)
    fn delete(&mut self, node: NodeId) -> HostResult<()>;

    /// List the children of a container in a deterministic order
    fn list_children(&mut self, container: NodeId) -> HostResult<Vec<NodeId>>;

    /// The display name of a node
    fn node_name(&self, node: NodeId) -> HostResult<String>;

    /// The kind of a node
    fn node_kind(&self, node: NodeId) -> HostResult<NodeKind>;

    /// Read the content of a leaf
    fn read_content(&self, node: NodeId) -> HostResult<Vec<u8>>;

    /// Replace the content of a leaf
    fn write_content(&mut self, node: NodeId, content: &[u8]) -> HostResult<()>;

    /// Persist the project model
    fn persist(&mut self) -> HostResult<()>;
}

/// Project build-configuration interface of a host
///
/// Configuration lookup is case-insensitive; property lookup within a
/// configuration is exact. Both lookups are fatal when they fail; there is
/// no fallback configuration.
pub trait BuildConfigurations {
    /// Set a string-valued property on a named build configuration
    fn set_configuration_property(
        &mut self,
        configuration: &str,
        property: &str,
        value: &str,
    ) -> Result<()>;

    /// Read a property from a named build configuration, if present
    fn configuration_property(&self, configuration: &str, property: &str) -> Option<String>;
}
