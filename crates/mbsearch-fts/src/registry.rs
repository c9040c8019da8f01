//! Per-field analyzer dispatch.
//!
//! The [`AnalyzerRegistry`] answers "which analyzer applies to this field?"
//! for one entity, falling back to a default analyzer for fields that declare
//! none. It also registers every analyzer chain with Tantivy under its
//! tokenizer name, so documents are indexed and query literals are parsed by
//! the very same chain that [`Analyzer::analyze`] runs.

use std::collections::HashMap;
use std::sync::LazyLock;

use mbsearch_core::EntityKind;
use tantivy::Index;

use crate::analyzer::{Analyzer, Token};
use crate::fields::{FieldKind, FieldSet, field_set};

/// Analyzer lookup for one entity's fields.
#[derive(Debug, Clone)]
pub struct AnalyzerRegistry {
    entity: EntityKind,
    default: Analyzer,
    per_field: HashMap<&'static str, Analyzer>,
}

impl AnalyzerRegistry {
    /// Build the registry for a field set.
    ///
    /// Text fields without an explicit analyzer use [`Analyzer::Standard`].
    pub fn for_fields(fields: &FieldSet) -> Self {
        let per_field = fields
            .iter()
            .filter(|f| f.kind == FieldKind::Text)
            .filter_map(|f| f.analyzer.map(|analyzer| (f.name, analyzer)))
            .collect();
        Self {
            entity: fields.entity(),
            default: Analyzer::Standard,
            per_field,
        }
    }

    /// Entity the registry belongs to.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// The analyzer used for fields that declare none.
    pub fn default_analyzer(&self) -> Analyzer {
        self.default
    }

    /// The analyzer that applies to `field`.
    pub fn analyzer_for(&self, field: &str) -> Analyzer {
        self.per_field.get(field).copied().unwrap_or(self.default)
    }

    /// Analyze `text` as a value of `field`.
    pub fn analyze(&self, field: &str, text: &str) -> Vec<Token> {
        self.analyzer_for(field).analyze(text)
    }

    /// Register every analyzer as a named tokenizer on `index`.
    ///
    /// Must be called after creating or opening an index, before indexing or
    /// parsing queries against it.
    pub fn register_tokenizers(index: &Index) {
        for analyzer in Analyzer::ALL {
            index
                .tokenizers()
                .register(analyzer.tokenizer_name(), analyzer.text_analyzer());
        }
    }
}

static REGISTRIES: LazyLock<HashMap<EntityKind, AnalyzerRegistry>> = LazyLock::new(|| {
    EntityKind::ALL
        .into_iter()
        .map(|kind| (kind, AnalyzerRegistry::for_fields(field_set(kind))))
        .collect()
});

/// The analyzer registry of an entity kind.
pub fn registry(kind: EntityKind) -> &'static AnalyzerRegistry {
    &REGISTRIES[&kind]
}

// ============================================================================
// Tests
// ============================================================================
