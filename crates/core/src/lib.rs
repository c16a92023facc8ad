//! Core types and utilities for nuprep
//!
//! This is the foundation crate that the other nuprep crates depend on.
//! It provides:
//! - Path types (AbsPath, RelPath)
//! - Base error types
//!
//! This crate has no dependencies on other nuprep crates.

pub mod error;
pub mod path;

pub use error::{Error, Result};
pub use path::{AbsPath, RelPath};
