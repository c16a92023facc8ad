//! Tree Mirror
//!
//! Recursively recreates a source directory tree under a destination
//! container. The mirror is a one-shot, best-effort overlay: a destination
//! container that already exists means the whole subtree below it is
//! skipped, never merged, and a leaf that already exists is tolerated
//! silently. Every other host failure aborts the walk.

use crate::error::{Error, HostError, Result};
use crate::host::{Host, NodeId};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Mirror `source_dir` as a child container of `destination`
///
/// Returns the newly created container, or `None` when there was nothing to
/// do: the source directory does not exist, or the destination already has a
/// child with its name (the pre-existing subtree is left exactly as it was).
pub fn mirror<H: Host>(
    host: &mut H,
    source_dir: &Path,
    destination: NodeId,
) -> Result<Option<NodeId>> {
    if !source_dir.is_dir() {
        return Ok(None);
    }

    let name = source_dir
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidSourceName {
            path: source_dir.to_path_buf(),
        })?;

    let node = match host.create_child_container(destination, name) {
        Ok(node) => node,
        Err(HostError::AlreadyExists { .. }) => {
            debug!(name, "destination container already exists, skipping subtree");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let (dirs, files) = read_dir_sorted(source_dir)?;

    for dir in &dirs {
        mirror(host, dir, node)?;
    }

    for file in &files {
        match host.create_child_leaf_from_file(node, file) {
            Ok(_) => {}
            Err(HostError::AlreadyExists { .. }) => {
                debug!(file = %file.display(), "leaf already mirrored");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Some(node))
}

/// Immediate children of `dir`, split into subdirectories and files, each
/// sorted lexicographically by name
///
/// Symlinks and other special entries are classified as files; whether the
/// host's copy primitive accepts them is up to the host.
pub(crate) fn read_dir_sorted(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let read = fs::read_dir(dir).map_err(|e| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in read {
        let entry = entry.map_err(|e| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let file_type = entry.file_type().map_err(|e| Error::DirectoryRead {
            path: entry.path(),
            source: e,
        })?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        } else {
            files.push(entry.path());
        }
    }

    dirs.sort();
    files.sort();
    Ok((dirs, files))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::host::NodeKind;
    use crate::memory::MemoryHost;
    use std::fs;

    /// Build `tools/{install.ps1, nested/{readme.txt}}` under a tempdir
    fn sample_tree() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join("tools");
        fs::create_dir(&tools).unwrap();
        fs::write(tools.join("install.ps1"), b"Write-Host hi").unwrap();
        fs::create_dir(tools.join("nested")).unwrap();
        fs::write(tools.join("nested").join("readme.txt"), b"docs").unwrap();
        (dir, tools)
    }

    fn names<H: Host>(host: &mut H, node: NodeId) -> Vec<(String, NodeKind)> {
        host.list_children(node)
            .unwrap()
            .into_iter()
            .map(|id| {
                (
                    host.node_name(id).unwrap(),
                    host.node_kind(id).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_mirror_reproduces_structure() {
        let (_guard, tools) = sample_tree();
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();

        let node = mirror(&mut host, &tools, root).unwrap().unwrap();
        assert_eq!(host.node_name(node).unwrap(), "tools");
        assert_eq!(
            names(&mut host, node),
            [
                ("install.ps1".to_string(), NodeKind::Leaf),
                ("nested".to_string(), NodeKind::Container),
            ]
        );

        let nested = host.find_child(node, "nested").unwrap();
        assert_eq!(
            names(&mut host, nested),
            [("readme.txt".to_string(), NodeKind::Leaf)]
        );
    }

    #[test]
    fn test_mirror_copies_leaf_content() {
        let (_guard, tools) = sample_tree();
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();

        let node = mirror(&mut host, &tools, root).unwrap().unwrap();
        let leaf = host.find_child(node, "install.ps1").unwrap();
        assert_eq!(host.read_content(leaf).unwrap(), b"Write-Host hi");
    }

    #[test]
    fn test_mirror_missing_source_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();

        let result = mirror(&mut host, &dir.path().join("absent"), root).unwrap();
        assert!(result.is_none());
        assert!(host.list_children(root).unwrap().is_empty());
    }

    #[test]
    fn test_mirror_empty_directory_creates_empty_container() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        fs::create_dir(&content).unwrap();

        let mut host = MemoryHost::new("Widgets");
        let root = host.root();
        let node = mirror(&mut host, &content, root).unwrap().unwrap();

        assert_eq!(host.node_kind(node).unwrap(), NodeKind::Container);
        assert!(host.list_children(node).unwrap().is_empty());
    }

    #[test]
    fn test_mirror_skips_existing_subtree_without_merging() {
        let (_guard, tools) = sample_tree();
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();

        // Pre-existing destination subtree with different content.
        let existing = host.create_child_container(root, "tools").unwrap();
        host.create_child_leaf(existing, "keep.me", b"precious")
            .unwrap();

        let result = mirror(&mut host, &tools, root).unwrap();
        assert!(result.is_none());

        // Untouched: the only child is still keep.me, nothing was merged in.
        assert_eq!(
            names(&mut host, existing),
            [("keep.me".to_string(), NodeKind::Leaf)]
        );
    }

    #[test]
    fn test_mirror_twice_is_idempotent() {
        let (_guard, tools) = sample_tree();
        let mut host = MemoryHost::new("Widgets");
        let root = host.root();

        let first = mirror(&mut host, &tools, root).unwrap();
        assert!(first.is_some());
        let node = first.unwrap();
        let before = names(&mut host, node);

        let second = mirror(&mut host, &tools, root).unwrap();
        assert!(second.is_none());
        assert_eq!(names(&mut host, node), before);
    }

    #[test]
    fn test_mirror_tolerates_leaf_collision_and_continues() {
        use crate::testhost::{Failure, ScriptedHost};

        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join("tools");
        fs::create_dir(&tools).unwrap();
        fs::write(tools.join("a.txt"), b"a").unwrap();
        fs::write(tools.join("b.txt"), b"b").unwrap();

        let mut host = ScriptedHost::new(MemoryHost::new("Widgets"));
        host.leaf_failures
            .push(("a.txt".to_string(), Failure::AlreadyExists));

        let root = host.root();
        let node = mirror(&mut host, &tools, root).unwrap().unwrap();

        // The collision on a.txt is tolerated and b.txt is still mirrored.
        assert!(host.inner.find_child(node, "a.txt").is_none());
        assert!(host.inner.find_child(node, "b.txt").is_some());
    }

    #[test]
    fn test_mirror_surfaces_unclassified_leaf_failure() {
        use crate::testhost::{Failure, ScriptedHost};

        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join("tools");
        fs::create_dir(&tools).unwrap();
        fs::write(tools.join("a.txt"), b"a").unwrap();

        let mut host = ScriptedHost::new(MemoryHost::new("Widgets"));
        host.leaf_failures
            .push(("a.txt".to_string(), Failure::Unclassified));

        let root = host.root();
        let err = mirror(&mut host, &tools, root).unwrap_err();
        assert!(matches!(err, Error::Host(HostError::Other(_))));
    }
}
