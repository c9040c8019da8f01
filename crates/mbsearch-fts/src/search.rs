//! Read side of an entity index.
//!
//! [`SearchIndex`] wraps an index reader and an [`EntityQueryParser`]. Hits
//! carry the stored fields of the matching documents; ranking is left to the
//! engine.

use std::path::Path;

use mbsearch_core::{EntityKind, Error, Result};
use serde::Serialize;
use tantivy::collector::{Count, TopDocs};
use tantivy::schema::Value;
use tantivy::{Index, IndexReader, ReloadPolicy, TantivyDocument};

use crate::document::FieldValue;
use crate::fields::{FieldKind, field_set};
use crate::query::EntityQueryParser;
use crate::schema::EntitySchema;

/// A search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Engine relevance score.
    pub score: f32,
    /// Stored fields, in field-set order; multi-valued fields repeat.
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl SearchHit {
    /// First text value of a stored field.
    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|(field, _)| *field == name)
            .find_map(|(_, value)| value.as_text())
    }

    /// Text values of a stored field.
    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(field, _)| *field == name)
            .filter_map(|(_, value)| value.as_text())
            .collect()
    }
}

/// Searchable view of one entity index.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    schema: EntitySchema,
    parser: EntityQueryParser,
}

impl SearchIndex {
    /// Open an entity index stored in a directory.
    pub fn open_in_dir(path: &Path, entity: EntityKind) -> Result<Self> {
        let index = Index::open_in_dir(path)
            .map_err(|e| Error::search_with(format!("failed to open {entity} index"), e))?;
        Self::from_index(index, entity)
    }

    /// Search an already opened index (e.g. the index of a sink).
    pub fn from_index(index: Index, entity: EntityKind) -> Result<Self> {
        let schema = EntitySchema::for_entity(entity);
        let parser = EntityQueryParser::new(&index, &schema);
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::search_with("failed to create index reader", e))?;

        Ok(Self {
            index,
            reader,
            schema,
            parser,
        })
    }

    /// Get reference to the underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// The query parser of this index.
    pub fn parser(&self) -> &EntityQueryParser {
        &self.parser
    }

    /// Pick up the latest commit.
    pub fn reload(&self) -> Result<()> {
        self.reader
            .reload()
            .map_err(|e| Error::search_with("failed to reload index reader", e))
    }

    /// Number of documents in the index.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Number of documents matching `query`.
    pub fn count(&self, query: &str) -> Result<usize> {
        let parsed = self.parser.parse(query)?;
        self.reader
            .searcher()
            .search(parsed.as_ref(), &Count)
            .map_err(|e| Error::search_with("search failed", e))
    }

    /// The `limit` best documents matching `query`.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let parsed = self.parser.parse(query)?;
        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(parsed.as_ref(), &TopDocs::with_limit(limit.max(1)).order_by_score())
            .map_err(|e| Error::search_with("search failed", e))?;

        top_docs
            .into_iter()
            .map(|(score, address)| {
                let doc: TantivyDocument = searcher
                    .doc(address)
                    .map_err(|e| Error::search_with("failed to load document", e))?;
                Ok(SearchHit {
                    score,
                    fields: self.stored_fields(&doc),
                })
            })
            .collect()
    }

    fn stored_fields(&self, doc: &TantivyDocument) -> Vec<(&'static str, FieldValue)> {
        let mut fields = Vec::new();
        for def in field_set(self.schema.entity()).iter().filter(|d| d.stored) {
            let Some(field) = self.schema.field(def.name) else {
                continue;
            };
            for value in doc.get_all(field) {
                let value = match def.kind {
                    FieldKind::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
                    FieldKind::Integer => value.as_i64().map(FieldValue::Int),
                };
                if let Some(value) = value {
                    fields.push((def.name, value));
                }
            }
        }
        fields
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("index", &"<tantivy::Index>")
            .field("entity", &self.schema.entity())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
