//! Batched extraction of relational rows into search documents.
//!
//! The id space of an entity is cut into fixed-size windows. For every
//! window the driver runs one query per one-to-many relationship, groups the
//! child rows by parent id, runs the parent query, and builds one document
//! per parent row. Windows are independent, so a run can spread them over a
//! pool of workers that share one document sink.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     mbsearch-index                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RelationalSource trait                                     │
//! │  └── SqliteSource (read-only, cached statements)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BatchWindow, WindowGroups (children grouped by parent)     │
//! │  ArtistCredit (credit chains, display credit)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  EntityDescriptor per entity (queries + document builder)   │
//! │  EntityIndex (extract → group → build → emit per window)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexRunner (probe, split, sequential or rayon workers)    │
//! │  IndexMetadata (build stamp next to each index)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mbsearch_core::{EntityKind, IndexConfig};
//! use mbsearch_index::{IndexRunner, SqliteSource};
//!
//! let config = IndexConfig::load("mbsearch.toml".as_ref())?;
//! let path = config.database_path.clone().unwrap_or_default();
//! let runner = IndexRunner::new(config)?;
//! for stats in runner.build_all(|| SqliteSource::open(&path))? {
//!     println!("{}: {} documents", stats.entity, stats.documents);
//! }
//! ```

pub mod credit;
pub mod driver;
pub mod entities;
pub mod entity;
pub mod metadata;
pub mod runner;
pub mod source;
pub mod window;

// Re-exports
pub use credit::{ArtistCredit, ArtistCreditName, add_credit_fields, assemble_credits};
pub use driver::{EntityIndex, WindowContext, WindowStats};
pub use entities::{format_partial_date, quantize_duration};
pub use entity::{BuildFn, EntityDescriptor, RelationKind, RelationQuery, SourceQueries, descriptor};
pub use metadata::IndexMetadata;
pub use runner::{IndexRunner, IndexStats};
pub use source::{NamedQuery, RelationalSource, SourceRow, SqlValue, SqliteSource};
pub use window::{BatchWindow, ChildRowGroup, WindowGroups, group_by_parent};
