//! Command implementations

pub mod prepare;
