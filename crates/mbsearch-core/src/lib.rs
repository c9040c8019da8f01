//! mbsearch core: shared types, errors, configuration, and constants.
//!
//! This crate provides the foundational types used across all mbsearch crates.
//! It has no internal mbsearch dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`config`]: Indexing configuration loaded from TOML
//! - [`constants`]: Fixed indexing constants shared by indexing and query time
//! - [`types`]: Entity kinds

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::IndexConfig;
pub use error::{Error, Result};
pub use types::EntityKind;
