//! Search documents.
//!
//! A [`Document`] is an ordered multiset of `(field, value)` pairs for one
//! entity. A field may repeat: every related record of a one-to-many
//! relationship contributes one entry. Documents are built fresh per source
//! row and handed write-once to a sink.

use mbsearch_core::EntityKind;
use mbsearch_core::constants::PLACEHOLDER;
use serde::Serialize;

use crate::fields::field_set;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Int(i64),
}

impl FieldValue {
    /// The text value, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Int(_) => None,
        }
    }

    /// The integer value, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(number) => Some(*number),
            FieldValue::Text(_) => None,
        }
    }
}

/// A document ready to be handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    entity: EntityKind,
    entries: Vec<(&'static str, FieldValue)>,
}

impl Document {
    /// Create an empty document for an entity.
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            entries: Vec::new(),
        }
    }

    /// Create a document from raw entries without checking field names.
    ///
    /// Sinks reject entries whose field is not defined for the entity.
    pub fn from_entries(entity: EntityKind, entries: Vec<(&'static str, FieldValue)>) -> Self {
        Self { entity, entries }
    }

    /// Entity the document belongs to.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Add a text value.
    pub fn add_field(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.push(name, FieldValue::Text(value.into()))
    }

    /// Add a text value unless it is absent, empty or blank.
    pub fn add_non_empty_field<S: AsRef<str>>(
        &mut self,
        name: &'static str,
        value: Option<S>,
    ) -> &mut Self {
        match value {
            Some(value) if !value.as_ref().trim().is_empty() => {
                self.add_field(name, value.as_ref())
            }
            _ => self,
        }
    }

    /// Add a text value, or [`PLACEHOLDER`] when it is absent, empty or blank.
    pub fn add_field_or_placeholder<S: AsRef<str>>(
        &mut self,
        name: &'static str,
        value: Option<S>,
    ) -> &mut Self {
        match value {
            Some(value) if !value.as_ref().trim().is_empty() => {
                self.add_field(name, value.as_ref())
            }
            _ => self.add_field(name, PLACEHOLDER),
        }
    }

    /// Add an integer value.
    pub fn add_numeric_field(&mut self, name: &'static str, value: i64) -> &mut Self {
        self.push(name, FieldValue::Int(value))
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(&'static str, FieldValue)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text values of a field, in insertion order.
    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.values(name).filter_map(FieldValue::as_text).collect()
    }

    /// Integer values of a field, in insertion order.
    pub fn ints(&self, name: &str) -> Vec<i64> {
        self.values(name).filter_map(FieldValue::as_int).collect()
    }

    /// First text value of a field.
    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.values(name).find_map(FieldValue::as_text)
    }

    /// Whether the document has any value for a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.values(name).next().is_some()
    }

    fn values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a FieldValue> {
        self.entries
            .iter()
            .filter(move |(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    fn push(&mut self, name: &'static str, value: FieldValue) -> &mut Self {
        debug_assert!(
            field_set(self.entity).contains(name),
            "field '{name}' is not defined for {}",
            self.entity
        );
        self.entries.push((name, value));
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
