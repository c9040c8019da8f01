//! Indexing configuration.
//!
//! Deployments describe where the relational source lives, where indexes are
//! written, and how the id space is windowed. Every field has a serde default,
//! so an empty TOML document is a valid configuration.
//!
//! ```toml
//! database_path = "/var/lib/mbsearch/musicbrainz.db"
//! index_dir = "/var/lib/mbsearch/indexes"
//! window_size = 50000
//! workers = 4
//! entities = ["artist", "recording"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::EntityKind;

/// Indexing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Path to the relational source database.
    pub database_path: Option<PathBuf>,

    /// Root directory under which one index per entity is written.
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Number of primary-key ids covered by one batch window.
    #[serde(default = "default_window_size")]
    pub window_size: i64,

    /// Number of worker threads, each with its own source connection.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Memory budget of the index writer, in bytes.
    #[serde(default = "default_writer_memory_bytes")]
    pub writer_memory_bytes: usize,

    /// Entities to index.
    #[serde(default = "default_entities")]
    pub entities: Vec<EntityKind>,
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("indexes")
}

fn default_window_size() -> i64 {
    10_000
}

fn default_workers() -> usize {
    1
}

fn default_writer_memory_bytes() -> usize {
    50_000_000
}

fn default_entities() -> Vec<EntityKind> {
    EntityKind::ALL.to_vec()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            index_dir: default_index_dir(),
            window_size: default_window_size(),
            workers: default_workers(),
            writer_memory_bytes: default_writer_memory_bytes(),
            entities: default_entities(),
        }
    }
}

impl IndexConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded index configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.window_size <= 0 {
            return Err(Error::config(format!(
                "window_size must be positive, got {}",
                self.window_size
            )));
        }
        if self.workers == 0 {
            return Err(Error::config("workers must be at least 1"));
        }
        if self.entities.is_empty() {
            return Err(Error::config("at least one entity must be configured"));
        }
        Ok(())
    }

    /// Index directory of one entity.
    pub fn entity_index_dir(&self, entity: EntityKind) -> PathBuf {
        self.index_dir.join(entity.index_dir_name())
    }
}

// ============================================================================
// Tests
// ============================================================================
