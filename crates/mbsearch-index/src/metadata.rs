//! Index build metadata.
//!
//! A small JSON file written next to each entity index after a successful
//! build. It records what was built and with which document layout, so a
//! reader can tell a stale index from a current one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mbsearch_index::IndexMetadata;
//!
//! let metadata = IndexMetadata::from_stats(&stats);
//! metadata.save(&index_path)?;
//!
//! if let Some(metadata) = IndexMetadata::load(&index_path)? {
//!     assert!(metadata.is_current());
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use mbsearch_core::constants::SCHEMA_VERSION;
use mbsearch_core::{EntityKind, Error, Result};
use serde::{Deserialize, Serialize};

use crate::runner::IndexStats;

/// Metadata filename stored in the index directory.
const METADATA_FILE: &str = "mbsearch-metadata.json";

/// What an index was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Document layout version.
    pub schema_version: u32,
    /// Indexed entity.
    pub entity: EntityKind,
    /// Number of documents written.
    pub document_count: usize,
    /// Highest parent id seen by the build.
    pub max_id: i64,
    /// When the build finished.
    pub built_at: DateTime<Utc>,
}

impl IndexMetadata {
    /// Metadata of a finished build, stamped now.
    pub fn from_stats(stats: &IndexStats) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entity: stats.entity,
            document_count: stats.documents,
            max_id: stats.max_id,
            built_at: Utc::now(),
        }
    }

    /// Whether the index was built with the current document layout.
    pub fn is_current(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }

    /// Load metadata from the index directory.
    ///
    /// Returns `Ok(None)` if the metadata file doesn't exist.
    /// Returns `Err` if the file exists but cannot be parsed.
    pub fn load(index_path: &Path) -> Result<Option<Self>> {
        let metadata_path = index_path.join(METADATA_FILE);

        if !metadata_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&metadata_path)?;
        let metadata: Self = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "invalid index metadata {}: {e}",
                metadata_path.display()
            ))
        })?;

        Ok(Some(metadata))
    }

    /// Save metadata to the index directory.
    pub fn save(&self, index_path: &Path) -> Result<()> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::config(format!("failed to serialize index metadata: {e}")))?;
        std::fs::write(index_path.join(METADATA_FILE), content)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
