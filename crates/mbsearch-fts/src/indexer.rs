//! Document sinks.
//!
//! A [`DocumentSink`] receives finished documents. `add` takes `&self` so that
//! one sink can be shared by every indexing worker; documents become visible
//! to searchers after `commit`.
//!
//! - [`TantivySink`] writes into a Tantivy index, on disk or in RAM.
//! - [`MemorySink`] collects documents in memory, for tests and dry runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mbsearch_core::EntityKind;
//! use mbsearch_fts::{Document, DocumentSink, TantivySink};
//!
//! let sink = TantivySink::create_in_dir(&index_path, EntityKind::Tag, 50_000_000)?;
//!
//! let mut doc = Document::new(EntityKind::Tag);
//! doc.add_field("tag", "rock");
//!
//! sink.add(&doc)?;
//! sink.close()?;
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use mbsearch_core::{EntityKind, Error, Result};
use parking_lot::{Mutex, RwLock};
use tantivy::{Index, IndexWriter};

use crate::document::Document;
use crate::registry::AnalyzerRegistry;
use crate::schema::EntitySchema;

/// Receiver of finished documents.
pub trait DocumentSink: Send + Sync {
    /// Stage a document.
    fn add(&self, doc: &Document) -> Result<()>;

    /// Make staged documents durable and visible.
    fn commit(&self) -> Result<()>;

    /// Finish writing. Commits by default.
    fn close(&self) -> Result<()> {
        self.commit()
    }
}

// ============================================================================
// Tantivy sink
// ============================================================================

/// Sink writing into a Tantivy index.
///
/// Adds share a read lock on the writer; commits take the write lock, so a
/// commit waits for in-flight adds.
pub struct TantivySink {
    index: Index,
    schema: EntitySchema,
    writer: RwLock<IndexWriter>,
    added: AtomicUsize,
}

impl TantivySink {
    /// Create or open the index of an entity in a directory.
    ///
    /// If the directory holds no index yet, a new one is created. An existing
    /// index must have been built with the entity's current schema; otherwise
    /// this fails with a configuration error and the index is left untouched.
    pub fn create_in_dir(path: &Path, entity: EntityKind, memory_bytes: usize) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }

        let schema = EntitySchema::for_entity(entity);
        let index = if path.join("meta.json").exists() {
            let index = Index::open_in_dir(path)
                .map_err(|e| Error::sink_write_with(format!("failed to open {entity} index"), e))?;
            if index.schema() != *schema.schema() {
                return Err(Error::config(format!(
                    "{} holds an index with a different schema than the {entity} schema; \
                     remove it to rebuild",
                    path.display()
                )));
            }
            index
        } else {
            Index::create_in_dir(path, schema.schema().clone()).map_err(|e| {
                Error::sink_write_with(format!("failed to create {entity} index"), e)
            })?
        };
        log::debug!("Opened {entity} index at {}", path.display());

        Self::with_index(index, schema, memory_bytes)
    }

    /// Create an in-memory index for an entity.
    pub fn create_in_ram(entity: EntityKind, memory_bytes: usize) -> Result<Self> {
        let schema = EntitySchema::for_entity(entity);
        let index = Index::create_in_ram(schema.schema().clone());
        Self::with_index(index, schema, memory_bytes)
    }

    fn with_index(index: Index, schema: EntitySchema, memory_bytes: usize) -> Result<Self> {
        AnalyzerRegistry::register_tokenizers(&index);

        let writer = index
            .writer(memory_bytes)
            .map_err(|e| Error::sink_write_with("failed to create index writer", e))?;

        Ok(Self {
            index,
            schema,
            writer: RwLock::new(writer),
            added: AtomicUsize::new(0),
        })
    }

    /// Stage the deletion of every document.
    ///
    /// The deletion is applied by the next commit, together with the
    /// documents added after it. Until then searchers keep seeing the last
    /// committed documents, and dropping the sink uncommitted discards it.
    pub fn clear(&self) -> Result<()> {
        self.writer
            .write()
            .delete_all_documents()
            .map_err(|e| Error::sink_write_with("failed to clear index", e))?;
        Ok(())
    }

    /// Get reference to the underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the entity schema.
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Number of documents added through this sink.
    pub fn documents_added(&self) -> usize {
        self.added.load(Ordering::Relaxed)
    }
}

impl DocumentSink for TantivySink {
    fn add(&self, doc: &Document) -> Result<()> {
        let engine_doc = self.schema.to_engine_document(doc)?;
        self.writer
            .read()
            .add_document(engine_doc)
            .map_err(|e| Error::sink_write_with("failed to add document", e))?;
        self.added.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        self.writer
            .write()
            .commit()
            .map_err(|e| Error::sink_write_with("failed to commit index", e))?;
        log::debug!(
            "Committed {} index ({} documents added)",
            self.schema.entity(),
            self.documents_added()
        );
        Ok(())
    }
}

impl std::fmt::Debug for TantivySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivySink")
            .field("index", &"<tantivy::Index>")
            .field("entity", &self.schema.entity())
            .field("added", &self.documents_added())
            .finish()
    }
}

// ============================================================================
// Memory sink
// ============================================================================

/// Sink collecting documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    docs: Mutex<Vec<Document>>,
    commits: AtomicUsize,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the documents added so far, in arrival order.
    pub fn documents(&self) -> Vec<Document> {
        self.docs.lock().clone()
    }

    /// Number of documents added so far.
    pub fn len(&self) -> usize {
        self.docs.lock().len()
    }

    /// Whether no document was added.
    pub fn is_empty(&self) -> bool {
        self.docs.lock().is_empty()
    }

    /// Number of commits.
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::Relaxed)
    }

    /// Take the collected documents.
    pub fn into_documents(self) -> Vec<Document> {
        self.docs.into_inner()
    }
}

impl DocumentSink for MemorySink {
    fn add(&self, doc: &Document) -> Result<()> {
        self.docs.lock().push(doc.clone());
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        self.commits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
