//! The generic entity index driver.
//!
//! One [`EntityIndex`] indexes any entity type given its descriptor. Per
//! window it runs exactly one query per relationship plus one parent query,
//! merges the results in memory, and only then hands documents to the sink:
//!
//! ```text
//! extract groups ──┐
//!                  ├──▶ build every document ──▶ sink.add(...)
//! extract parents ─┘
//! ```
//!
//! A failure anywhere before the last step leaves the sink untouched for
//! that window.

use std::time::Instant;

use mbsearch_core::{EntityKind, Result};
use mbsearch_fts::{Document, DocumentSink};
use serde::Serialize;

use crate::credit::assemble_credits;
use crate::entity::{EntityDescriptor, RelationKind, SourceQueries, descriptor};
use crate::source::{NamedQuery, RelationalSource, SourceRow};
use crate::window::{BatchWindow, WindowGroups, group_by_parent};

/// The queries of one entity bound to one window.
#[derive(Debug, Clone, Copy)]
pub struct WindowContext<'a> {
    /// The window being processed.
    pub window: BatchWindow,
    /// The entity's queries.
    pub queries: &'a SourceQueries,
}

impl WindowContext<'_> {
    /// Run a window query.
    pub fn run<S>(&self, source: &S, query: &NamedQuery) -> Result<Vec<SourceRow>>
    where
        S: RelationalSource + ?Sized,
    {
        let rows = source.query_window(query, self.window)?;
        log::trace!("{} {}: {} rows", query.name, self.window, rows.len());
        Ok(rows)
    }
}

/// Outcome of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowStats {
    /// The window.
    pub window: BatchWindow,
    /// Parent rows read.
    pub parent_rows: usize,
    /// Documents handed to the sink.
    pub documents: usize,
}

/// Indexes one entity type, window by window.
#[derive(Debug, Clone, Copy)]
pub struct EntityIndex {
    descriptor: &'static EntityDescriptor,
}

impl EntityIndex {
    /// Create a driver, checking the descriptor first.
    pub fn new(descriptor: &'static EntityDescriptor) -> Result<Self> {
        descriptor.check_consistency()?;
        Ok(Self { descriptor })
    }

    /// Create the driver of an entity kind.
    pub fn for_kind(kind: EntityKind) -> Result<Self> {
        Self::new(descriptor(kind))
    }

    /// Entity type.
    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    /// Highest parent id in the source, 0 when empty.
    pub fn max_id<S>(&self, source: &S) -> Result<i64>
    where
        S: RelationalSource + ?Sized,
    {
        source.max_id(&self.descriptor.queries.max_id)
    }

    /// Number of parent rows with an id up to `max_id`.
    pub fn row_count<S>(&self, source: &S, max_id: i64) -> Result<i64>
    where
        S: RelationalSource + ?Sized,
    {
        source.row_count(&self.descriptor.queries.row_count, max_id)
    }

    /// Run every relationship query of a window and group the rows.
    pub fn extract_groups<S>(&self, source: &S, window: BatchWindow) -> Result<WindowGroups>
    where
        S: RelationalSource + ?Sized,
    {
        let ctx = self.context(window);
        let mut groups = WindowGroups::new();
        for relation in ctx.queries.relations {
            let rows = ctx.run(source, &relation.query)?;
            match relation.kind {
                RelationKind::Children => {
                    let group = group_by_parent(rows, relation.parent_column)?;
                    groups.insert_children(relation.query.name, group);
                }
                RelationKind::ArtistCredits => {
                    groups.insert_credits(assemble_credits(rows, relation.parent_column)?);
                }
            }
        }
        Ok(groups)
    }

    /// Run the parent query of a window.
    pub fn extract_parents<S>(&self, source: &S, window: BatchWindow) -> Result<Vec<SourceRow>>
    where
        S: RelationalSource + ?Sized,
    {
        let ctx = self.context(window);
        ctx.run(source, &ctx.queries.parents)
    }

    /// Build one document per parent row.
    ///
    /// The parent id comes from the descriptor's parent id column, and every
    /// document is checked against the descriptor's written fields.
    pub fn build_documents(
        &self,
        parents: &[SourceRow],
        groups: &WindowGroups,
    ) -> Result<Vec<Document>> {
        let descriptor = self.descriptor;
        parents
            .iter()
            .map(|row| {
                let id = row.get_i64(descriptor.queries.parent_id_column)?;
                let doc = (descriptor.build)(id, row, groups)?;
                descriptor.check_document(&doc)?;
                Ok(doc)
            })
            .collect()
    }

    /// Extract, build and emit one window.
    ///
    /// Documents reach the sink only after every document of the window was
    /// built.
    pub fn index_window<S>(
        &self,
        source: &S,
        window: BatchWindow,
        sink: &dyn DocumentSink,
    ) -> Result<WindowStats>
    where
        S: RelationalSource + ?Sized,
    {
        let started = Instant::now();
        log::debug!("Indexing {} window {window}", self.kind());

        let groups = self.extract_groups(source, window)?;
        let parents = self.extract_parents(source, window)?;
        let documents = self.build_documents(&parents, &groups)?;

        for doc in &documents {
            sink.add(doc)?;
        }

        log::debug!(
            "Indexed {} window {window}: {} documents in {:?}",
            self.kind(),
            documents.len(),
            started.elapsed()
        );
        Ok(WindowStats {
            window,
            parent_rows: parents.len(),
            documents: documents.len(),
        })
    }

    fn context(&self, window: BatchWindow) -> WindowContext<'static> {
        WindowContext {
            window,
            queries: &self.descriptor.queries,
        }
    }
}
