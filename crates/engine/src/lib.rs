//! # nuprep engine
//!
//! Core library for preparing a project for package authoring.
//!
//! This crate provides the tree-synchronization engine that overlays a
//! packaging-resources template tree onto a live project model:
//!
//! - **Host abstraction**: The project model is reached only through the
//!   narrow [`host::Host`] and [`host::BuildConfigurations`] capability
//!   traits, with a structured failure taxonomy ([`error::HostError`])
//! - **Tree Mirror**: Recursively recreates a source directory tree as
//!   destination containers and leaves, skipping subtrees that already exist
//! - **Attribute Propagator**: Stamps a boolean attribute onto every leaf of
//!   a subtree, recursing exactly when a node reports the attribute as
//!   unsupported
//! - **Template Installer**: Copies the package manifest template, renames
//!   it after the project, and rewrites its placeholders
//! - **Orchestrator**: [`prepare::prepare`] sequences the full run and
//!   patches the Release documentation output
//!
//! Two host implementations ship with the crate: [`memory::MemoryHost`], a
//! pure in-memory model, and [`directory::DirectoryHost`], a project rooted
//! in a real directory with a TOML manifest.

pub mod directory;
pub mod error;
pub mod host;
pub mod install;
pub mod manifest;
pub mod memory;
pub mod mirror;
pub mod prepare;
pub mod propagate;
pub mod resources;

#[cfg(test)]
pub(crate) mod testhost;

// Re-export path types from core
pub use nuprep_core::path::{AbsPath, RelPath};

// Re-export the types most callers need
pub use error::{Error, HostError, Result};
pub use host::{BuildConfigurations, COPY_TO_OUTPUT, Host, NodeId, NodeKind};
pub use manifest::{ProjectInfo, ProjectManifest};
pub use prepare::{PrepareStats, prepare};
