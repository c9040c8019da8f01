//! Field-aware query parsing.
//!
//! Queries use Tantivy's query grammar: `field:value`, `AND`/`OR`/`NOT`,
//! quoted phrases, and ranges on integer fields. Terms without a field go to
//! the entity's default query fields, and every literal is analyzed by the
//! tokenizer registered for its field, the same one that indexed it.

use mbsearch_core::{EntityKind, Error, Result};
use tantivy::Index;
use tantivy::query::{EmptyQuery, Query, QueryParser};

use crate::fields::{FieldKind, field_set};
use crate::registry::{AnalyzerRegistry, registry};
use crate::schema::EntitySchema;

/// Query parser for one entity index.
pub struct EntityQueryParser {
    entity: EntityKind,
    parser: QueryParser,
    registry: &'static AnalyzerRegistry,
}

impl EntityQueryParser {
    /// Create a parser for the index of `entity`.
    ///
    /// Registers the analyzers on `index` so that query literals are tokenized
    /// the way the index was written.
    pub fn new(index: &Index, schema: &EntitySchema) -> Self {
        AnalyzerRegistry::register_tokenizers(index);
        let parser = QueryParser::for_index(index, schema.default_query_fields());
        Self {
            entity: schema.entity(),
            parser,
            registry: registry(schema.entity()),
        }
    }

    /// Entity the parser targets.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Parse a query string.
    ///
    /// Empty or blank input parses to a query that matches nothing.
    pub fn parse(&self, query: &str) -> Result<Box<dyn Query>> {
        if query.trim().is_empty() {
            return Ok(Box::new(EmptyQuery));
        }

        self.parser.parse_query(query).map_err(|e| {
            log::debug!("Rejected {} query {query:?}: {e}", self.entity);
            Error::query_syntax(query, e.to_string())
        })
    }

    /// Terms a literal becomes when searched in `field`.
    pub fn normalize_term(&self, field: &str, literal: &str) -> Vec<String> {
        let is_integer = field_set(self.entity)
            .get(field)
            .is_some_and(|def| def.kind == FieldKind::Integer);
        if is_integer {
            return vec![literal.trim().to_string()];
        }

        self.registry
            .analyze(field, literal)
            .into_iter()
            .map(|token| token.text)
            .collect()
    }
}

impl std::fmt::Debug for EntityQueryParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityQueryParser")
            .field("entity", &self.entity)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parser(entity: EntityKind) -> EntityQueryParser {
        let schema = EntitySchema::for_entity(entity);
        let index = Index::create_in_ram(schema.schema().clone());
        EntityQueryParser::new(&index, &schema)
    }

    #[test]
    fn test_parse_simple_query() {
        let parser = parser(EntityKind::Artist);
        assert!(parser.parse("beatles").is_ok());
    }

    #[test]
    fn test_parse_field_query() {
        let parser = parser(EntityKind::Recording);
        assert!(parser.parse("artist:\"Beatles\" AND type:Album").is_ok());
        assert!(parser.parse("qdur:[90 TO 95]").is_ok());
    }

    #[test]
    fn test_parse_empty_query() {
        let parser = parser(EntityKind::Tag);
        let query = parser.parse("   ").unwrap();
        assert!(format!("{query:?}").contains("EmptyQuery"));
    }

    #[test]
    fn test_parse_unknown_field_is_syntax_error() {
        let parser = parser(EntityKind::Tag);
        let err = parser.parse("isrc:GBAYE0601498").unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn test_parse_bad_integer_is_syntax_error() {
        let parser = parser(EntityKind::Recording);
        let err = parser.parse("dur:long").unwrap_err();
        assert!(matches!(err, Error::QuerySyntax { .. }));
    }

    #[test]
    fn test_normalize_term_uses_field_analyzer() {
        let parser = parser(EntityKind::Recording);
        assert_eq!(parser.normalize_term("artist", "Beatles"), vec!["beatles"]);
        assert_eq!(parser.normalize_term("type", "Album"), vec!["Album"]);
        assert_eq!(parser.normalize_term("recording", "Let It Be"), vec![
            "let", "it", "be"
        ]);
        assert_eq!(parser.normalize_term("qdur", " 92 "), vec!["92"]);
    }
}
