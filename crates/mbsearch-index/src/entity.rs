//! Entity descriptors.
//!
//! An [`EntityDescriptor`] is everything the generic driver needs to index
//! one entity type: its field set, its query shapes, and its document
//! builder. Entity-specific behavior lives only in the descriptor.

use mbsearch_core::{EntityKind, Error, Result};
use mbsearch_fts::{Document, FieldSet, field_set};

use crate::entities;
use crate::source::{NamedQuery, SourceRow};
use crate::window::WindowGroups;

/// How the rows of a relationship are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Child rows grouped by parent id.
    Children,
    /// Artist credit member rows, assembled into credits.
    ArtistCredits,
}

/// One one-to-many relationship of an entity.
#[derive(Debug, Clone, Copy)]
pub struct RelationQuery {
    /// Window query returning the child rows.
    pub query: NamedQuery,
    /// Column holding the parent id.
    pub parent_column: &'static str,
    /// How the rows are used.
    pub kind: RelationKind,
}

impl RelationQuery {
    /// A plain child relationship.
    pub const fn children(query: NamedQuery, parent_column: &'static str) -> Self {
        Self {
            query,
            parent_column,
            kind: RelationKind::Children,
        }
    }

    /// An artist credit relationship.
    pub const fn artist_credits(query: NamedQuery, parent_column: &'static str) -> Self {
        Self {
            query,
            parent_column,
            kind: RelationKind::ArtistCredits,
        }
    }
}

/// The queries of one entity.
#[derive(Debug, Clone, Copy)]
pub struct SourceQueries {
    /// Highest parent id.
    pub max_id: NamedQuery,
    /// Number of parent rows up to an id.
    pub row_count: NamedQuery,
    /// Parent rows of a window.
    pub parents: NamedQuery,
    /// Column of the parent rows holding the parent id. The driver reads it
    /// and hands the id to the builder.
    pub parent_id_column: &'static str,
    /// One-to-many relationships, each extracted with one query per window.
    pub relations: &'static [RelationQuery],
}

/// Maps one parent id, its row and the window groups to a document.
pub type BuildFn = fn(i64, &SourceRow, &WindowGroups) -> Result<Document>;

/// Everything needed to index one entity type.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Entity type.
    pub kind: EntityKind,
    /// Query shapes.
    pub queries: SourceQueries,
    /// Every field the builder may write. The driver rejects documents with
    /// any other field.
    pub written_fields: &'static [&'static str],
    /// Document builder.
    pub build: BuildFn,
}

impl EntityDescriptor {
    /// Field set of the entity.
    pub fn fields(&self) -> &'static FieldSet {
        field_set(self.kind)
    }

    /// Check the descriptor against its field set.
    ///
    /// Fails when the field set is inconsistent, when the builder writes a
    /// field the entity does not define, or when relationship names clash.
    pub fn check_consistency(&self) -> Result<()> {
        let fields = self.fields();
        fields.validate()?;

        for name in self.written_fields {
            if !fields.contains(name) {
                return Err(Error::config(format!(
                    "{} builder writes undefined field '{name}'",
                    self.kind
                )));
            }
        }

        let relations = self.queries.relations;
        for (idx, relation) in relations.iter().enumerate() {
            if relations[..idx]
                .iter()
                .any(|other| other.query.name == relation.query.name)
            {
                return Err(Error::config(format!(
                    "{}: relationship '{}' is declared twice",
                    self.kind, relation.query.name
                )));
            }
        }
        let credit_relations = relations
            .iter()
            .filter(|r| r.kind == RelationKind::ArtistCredits)
            .count();
        if credit_relations > 1 {
            return Err(Error::config(format!(
                "{}: at most one artist credit relationship is allowed",
                self.kind
            )));
        }

        Ok(())
    }

    /// Check that a built document only uses [`EntityDescriptor::written_fields`].
    pub fn check_document(&self, doc: &Document) -> Result<()> {
        match doc
            .entries()
            .iter()
            .find(|(name, _)| !self.written_fields.contains(name))
        {
            Some((name, _)) => Err(Error::config(format!(
                "{} builder wrote undeclared field '{name}'",
                self.kind
            ))),
            None => Ok(()),
        }
    }
}

/// The descriptor of an entity kind.
pub fn descriptor(kind: EntityKind) -> &'static EntityDescriptor {
    match kind {
        EntityKind::Recording => &entities::recording::DESCRIPTOR,
        EntityKind::Artist => &entities::artist::DESCRIPTOR,
        EntityKind::Release => &entities::release::DESCRIPTOR,
        EntityKind::ReleaseGroup => &entities::release_group::DESCRIPTOR,
        EntityKind::Tag => &entities::tag::DESCRIPTOR,
    }
}

// ============================================================================
// Tests
// ============================================================================
