//! Tantivy schema derived from an entity's field set.
//!
//! The schema is not written by hand: every [`FieldDefinition`] maps to one
//! Tantivy field.
//!
//! | definition | Tantivy field |
//! |------------|---------------|
//! | `IndexedTokenized` text | text, registered tokenizer, freqs + positions |
//! | `IndexedUntokenized` text | text, `mb_keyword` tokenizer, basic record |
//! | `NotIndexed` text | text, stored only |
//! | `Integer` | i64, indexed + fast (range queries) |
//!
//! Storage follows the definition's `stored` flag.

use std::collections::HashMap;

use mbsearch_core::{EntityKind, Error, Result};
use tantivy::TantivyDocument;
use tantivy::schema::{
    Field, IndexRecordOption, NumericOptions, Schema, SchemaBuilder, TextFieldIndexing,
    TextOptions,
};

use crate::document::{Document, FieldValue};
use crate::fields::{FieldDefinition, FieldKind, FieldSet, IndexingMode, field_set};
use crate::registry::registry;

/// A Tantivy schema with typed access to an entity's fields.
#[derive(Clone)]
pub struct EntitySchema {
    entity: EntityKind,
    schema: Schema,
    fields: HashMap<&'static str, Field>,
}

impl EntitySchema {
    /// Build the schema of an entity kind.
    pub fn for_entity(kind: EntityKind) -> Self {
        Self::build(field_set(kind))
    }

    /// Build a schema from a field set.
    pub fn build(fields: &FieldSet) -> Self {
        let registry = registry(fields.entity());
        let mut builder = SchemaBuilder::new();
        let mut by_name = HashMap::with_capacity(fields.len());

        for def in fields.iter() {
            let field = match def.kind {
                FieldKind::Integer => builder.add_i64_field(def.name, numeric_options(def)),
                FieldKind::Text => {
                    let tokenizer = registry.analyzer_for(def.name).tokenizer_name();
                    builder.add_text_field(def.name, text_options(def, tokenizer))
                }
            };
            by_name.insert(def.name, field);
        }

        Self {
            entity: fields.entity(),
            schema: builder.build(),
            fields: by_name,
        }
    }

    /// Entity the schema belongs to.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a Tantivy field by name.
    pub fn field(&self, name: &str) -> Option<Field> {
        self.fields.get(name).copied()
    }

    /// Tantivy fields searched when a query names no field.
    pub fn default_query_fields(&self) -> Vec<Field> {
        field_set(self.entity)
            .default_query_fields()
            .iter()
            .filter_map(|name| self.field(name))
            .collect()
    }

    /// Convert a document into a Tantivy document.
    pub fn to_engine_document(&self, doc: &Document) -> Result<TantivyDocument> {
        if doc.entity() != self.entity {
            return Err(Error::config(format!(
                "cannot write a {} document into the {} index",
                doc.entity(),
                self.entity
            )));
        }

        let defs = field_set(self.entity);
        let mut engine_doc = TantivyDocument::new();
        for (name, value) in doc.entries() {
            let (Some(field), Some(def)) = (self.field(name), defs.get(name)) else {
                return Err(Error::config(format!(
                    "field '{name}' is not defined for {}",
                    self.entity
                )));
            };
            match (def.kind, value) {
                (FieldKind::Text, FieldValue::Text(text)) => engine_doc.add_text(field, text),
                (FieldKind::Integer, FieldValue::Int(number)) => engine_doc.add_i64(field, *number),
                _ => {
                    return Err(Error::config(format!(
                        "{}.{name}: value does not match the field kind",
                        self.entity
                    )));
                }
            }
        }
        Ok(engine_doc)
    }
}

impl std::fmt::Debug for EntitySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitySchema")
            .field("entity", &self.entity)
            .field("fields", &self.fields.len())
            .finish()
    }
}

fn numeric_options(def: &FieldDefinition) -> NumericOptions {
    let options = NumericOptions::default().set_indexed().set_fast();
    if def.stored {
        options.set_stored()
    } else {
        options
    }
}

fn text_options(def: &FieldDefinition, tokenizer: &str) -> TextOptions {
    let record = match def.indexing {
        IndexingMode::NotIndexed => None,
        IndexingMode::IndexedUntokenized => Some(IndexRecordOption::Basic),
        IndexingMode::IndexedTokenized => Some(IndexRecordOption::WithFreqsAndPositions),
    };

    let mut options = TextOptions::default();
    if let Some(record) = record {
        options = options.set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(record),
        );
    }
    if def.stored {
        options = options.set_stored();
    }
    options
}

// ============================================================================
// Tests
// ============================================================================
