//! Scripted host for failure-injection tests
//!
//! Wraps a [`MemoryHost`] and lets tests force specific host operations to
//! fail with a chosen [`HostError`] class, keyed by node or file name. Used
//! to verify that recovery paths trigger on exactly the failure classes they
//! are specified for.

use crate::error::{HostError, HostResult, Result};
use crate::host::{BuildConfigurations, Host, NodeId, NodeKind};
use crate::memory::MemoryHost;
use std::path::Path;

/// What a scripted failure should look like
pub(crate) enum Failure {
    AlreadyExists,
    Unclassified,
}

impl Failure {
    fn materialize(&self, name: &str) -> HostError {
        match self {
            Failure::AlreadyExists => HostError::AlreadyExists {
                name: name.to_string(),
            },
            Failure::Unclassified => HostError::Other(format!("simulated failure on '{name}'")),
        }
    }
}

/// A [`MemoryHost`] with scripted failures
pub(crate) struct ScriptedHost {
    pub inner: MemoryHost,
    /// Fail `set_attribute` on the node with this name
    pub attribute_failures: Vec<(String, Failure)>,
    /// Fail `create_child_leaf_from_file` for sources with this file name
    pub leaf_failures: Vec<(String, Failure)>,
    /// Fail `create_child_container` for this name
    pub container_failures: Vec<(String, Failure)>,
}

impl ScriptedHost {
    pub fn new(inner: MemoryHost) -> Self {
        Self {
            inner,
            attribute_failures: Vec::new(),
            leaf_failures: Vec::new(),
            container_failures: Vec::new(),
        }
    }

    fn scripted(failures: &[(String, Failure)], name: &str) -> Option<HostError> {
        failures
            .iter()
            .find(|(target, _)| target == name)
            .map(|(target, failure)| failure.materialize(target))
    }
}

impl Host for ScriptedHost {
    fn root(&self) -> NodeId {
        self.inner.root()
    }

    fn create_child_container(&mut self, parent: NodeId, name: &str) -> HostResult<NodeId> {
        if let Some(err) = Self::scripted(&self.container_failures, name) {
            return Err(err);
        }
        self.inner.create_child_container(parent, name)
    }

    fn create_child_leaf_from_file(&mut self, parent: NodeId, source: &Path) -> HostResult<NodeId> {
        if let Some(name) = source.file_name().and_then(|s| s.to_str())
            && let Some(err) = Self::scripted(&self.leaf_failures, name)
        {
            return Err(err);
        }
        self.inner.create_child_leaf_from_file(parent, source)
    }

    fn set_attribute(&mut self, node: NodeId, attribute: &str, value: bool) -> HostResult<()> {
        let name = self.inner.node_name(node)?;
        if let Some(err) = Self::scripted(&self.attribute_failures, &name) {
            return Err(err);
        }
        self.inner.set_attribute(node, attribute, value)
    }

    fn rename(&mut self, node: NodeId, new_name: &str) -> HostResult<()> {
        self.inner.rename(node, new_name)
    }

    fn delete(&mut self, node: NodeId) -> HostResult<()> {
        self.inner.delete(node)
    }

    fn list_children(&mut self, container: NodeId) -> HostResult<Vec<NodeId>> {
        self.inner.list_children(container)
    }

    fn node_name(&self, node: NodeId) -> HostResult<String> {
        self.inner.node_name(node)
    }

    fn node_kind(&self, node: NodeId) -> HostResult<NodeKind> {
        self.inner.node_kind(node)
    }

    fn read_content(&self, node: NodeId) -> HostResult<Vec<u8>> {
        self.inner.read_content(node)
    }

    fn write_content(&mut self, node: NodeId, content: &[u8]) -> HostResult<()> {
        self.inner.write_content(node, content)
    }

    fn persist(&mut self) -> HostResult<()> {
        self.inner.persist()
    }
}

impl BuildConfigurations for ScriptedHost {
    fn set_configuration_property(
        &mut self,
        configuration: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        self.inner
            .set_configuration_property(configuration, property, value)
    }

    fn configuration_property(&self, configuration: &str, property: &str) -> Option<String> {
        self.inner.configuration_property(configuration, property)
    }
}
