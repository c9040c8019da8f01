//! Per-entity field definitions.
//!
//! Every entity type has one fixed, ordered [`FieldSet`]. Field sets are plain
//! data tables built once per process and shared read-only; the schema bridge,
//! the analyzer registry, the document builders and the query parser all read
//! from the same table, which keeps index time and query time consistent.
//!
//! Use [`field_set`] to get the table for an entity kind.

mod artist;
mod recording;
mod release;
mod release_group;
mod tag;

use std::collections::HashMap;
use std::sync::LazyLock;

use mbsearch_core::{EntityKind, Error, Result};

use crate::analyzer::Analyzer;

/// How a field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexingMode {
    /// Stored for display only; not searchable.
    NotIndexed,
    /// Searchable through its analyzer's tokens.
    IndexedTokenized,
    /// Searchable as one exact value.
    IndexedUntokenized,
}

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text value.
    Text,
    /// Signed integer value, range-queryable.
    Integer,
}

/// Definition of one searchable or stored attribute of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name, unique within its entity.
    pub name: &'static str,
    /// Whether the original value is retrievable from search hits.
    pub stored: bool,
    /// How the field is indexed.
    pub indexing: IndexingMode,
    /// Analyzer for text fields; `None` means the registry default.
    pub analyzer: Option<Analyzer>,
    /// Value type.
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// An exact-match identifier or code.
    pub const fn keyword(name: &'static str) -> Self {
        Self {
            name,
            stored: false,
            indexing: IndexingMode::IndexedUntokenized,
            analyzer: Some(Analyzer::Keyword),
            kind: FieldKind::Text,
        }
    }

    /// A tokenized text field with an explicit analyzer.
    pub const fn text(name: &'static str, analyzer: Analyzer) -> Self {
        Self {
            name,
            stored: false,
            indexing: IndexingMode::IndexedTokenized,
            analyzer: Some(analyzer),
            kind: FieldKind::Text,
        }
    }

    /// A tokenized text field analyzed by the registry default.
    pub const fn default_text(name: &'static str) -> Self {
        Self {
            name,
            stored: false,
            indexing: IndexingMode::IndexedTokenized,
            analyzer: None,
            kind: FieldKind::Text,
        }
    }

    /// A display-only field.
    pub const fn stored_only(name: &'static str) -> Self {
        Self {
            name,
            stored: true,
            indexing: IndexingMode::NotIndexed,
            analyzer: None,
            kind: FieldKind::Text,
        }
    }

    /// An indexed integer field.
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            stored: false,
            indexing: IndexingMode::IndexedUntokenized,
            analyzer: None,
            kind: FieldKind::Integer,
        }
    }

    /// Mark the field as stored.
    pub const fn stored(mut self) -> Self {
        self.stored = true;
        self
    }

    /// Whether the field can be searched.
    pub fn is_indexed(&self) -> bool {
        self.indexing != IndexingMode::NotIndexed
    }
}

/// Names of the fields an artist credit expands into.
///
/// Shared by every entity that carries an artist credit so the credit
/// expansion is written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditFields {
    /// Searchable aggregate of member names and credited names.
    pub artist: &'static str,
    /// One id per member.
    pub artist_id: &'static str,
    /// One name per member.
    pub artist_name: &'static str,
    /// One credited name per member.
    pub credit_name: &'static str,
    /// The combined display credit.
    pub display: &'static str,
}

/// Credit field names used by recording, release and release group.
pub const ARTIST_CREDIT_FIELDS: CreditFields = CreditFields {
    artist: "artist",
    artist_id: "arid",
    artist_name: "artistname",
    credit_name: "creditname",
    display: "artistcredit",
};

/// Field definitions for an artist credit.
pub(crate) const fn credit_field_definitions() -> [FieldDefinition; 5] {
    [
        FieldDefinition::keyword(ARTIST_CREDIT_FIELDS.artist_id).stored(),
        FieldDefinition::text(ARTIST_CREDIT_FIELDS.artist, Analyzer::StandardWithPositionGap),
        FieldDefinition::text(
            ARTIST_CREDIT_FIELDS.artist_name,
            Analyzer::StandardWithPositionGap,
        )
        .stored(),
        FieldDefinition::text(
            ARTIST_CREDIT_FIELDS.credit_name,
            Analyzer::StandardWithPositionGap,
        ),
        FieldDefinition::stored_only(ARTIST_CREDIT_FIELDS.display),
    ]
}

/// The ordered field table of one entity.
#[derive(Debug)]
pub struct FieldSet {
    entity: EntityKind,
    fields: Vec<FieldDefinition>,
    by_name: HashMap<&'static str, usize>,
    default_query_fields: Vec<&'static str>,
}

impl FieldSet {
    /// Build a field set from its definitions, in declaration order.
    pub fn new(
        entity: EntityKind,
        fields: Vec<FieldDefinition>,
        default_query_fields: Vec<&'static str>,
    ) -> Self {
        let by_name = fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (field.name, idx))
            .collect();
        Self {
            entity,
            fields,
            by_name,
            default_query_fields,
        }
    }

    /// Entity the fields belong to.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Whether the entity has a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields searched when a query names no field.
    pub fn default_query_fields(&self) -> &[&'static str] {
        &self.default_query_fields
    }

    /// Check that the definitions are internally consistent.
    pub fn validate(&self) -> Result<()> {
        let entity = self.entity;
        if self.by_name.len() != self.fields.len() {
            return Err(Error::config(format!(
                "{entity}: field names are not unique"
            )));
        }

        for field in &self.fields {
            let name = field.name;
            match (field.kind, field.indexing) {
                (FieldKind::Integer, IndexingMode::IndexedTokenized) => {
                    return Err(Error::config(format!(
                        "{entity}.{name}: integer fields cannot be tokenized"
                    )));
                }
                (FieldKind::Integer, _) if field.analyzer.is_some() => {
                    return Err(Error::config(format!(
                        "{entity}.{name}: integer fields take no analyzer"
                    )));
                }
                (_, IndexingMode::NotIndexed) if field.analyzer.is_some() => {
                    return Err(Error::config(format!(
                        "{entity}.{name}: unindexed fields take no analyzer"
                    )));
                }
                (FieldKind::Text, IndexingMode::IndexedUntokenized)
                    if field.analyzer != Some(Analyzer::Keyword) =>
                {
                    return Err(Error::config(format!(
                        "{entity}.{name}: untokenized text fields must use the keyword analyzer"
                    )));
                }
                (FieldKind::Text, IndexingMode::IndexedTokenized)
                    if field.analyzer == Some(Analyzer::Keyword) =>
                {
                    return Err(Error::config(format!(
                        "{entity}.{name}: the keyword analyzer requires an untokenized field"
                    )));
                }
                _ => {}
            }
        }

        if self.default_query_fields.is_empty() {
            return Err(Error::config(format!(
                "{entity}: no default query fields"
            )));
        }
        for name in &self.default_query_fields {
            match self.get(name) {
                Some(field) if field.is_indexed() && field.kind == FieldKind::Text => {}
                Some(_) => {
                    return Err(Error::config(format!(
                        "{entity}.{name}: default query field must be indexed text"
                    )));
                }
                None => {
                    return Err(Error::config(format!(
                        "{entity}: default query field '{name}' is not defined"
                    )));
                }
            }
        }

        Ok(())
    }
}

static RECORDING: LazyLock<FieldSet> = LazyLock::new(recording::field_set);
static ARTIST: LazyLock<FieldSet> = LazyLock::new(artist::field_set);
static RELEASE: LazyLock<FieldSet> = LazyLock::new(release::field_set);
static RELEASE_GROUP: LazyLock<FieldSet> = LazyLock::new(release_group::field_set);
static TAG: LazyLock<FieldSet> = LazyLock::new(tag::field_set);

/// The field set of an entity kind.
pub fn field_set(kind: EntityKind) -> &'static FieldSet {
    match kind {
        EntityKind::Recording => &RECORDING,
        EntityKind::Artist => &ARTIST,
        EntityKind::Release => &RELEASE,
        EntityKind::ReleaseGroup => &RELEASE_GROUP,
        EntityKind::Tag => &TAG,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_set_is_consistent() {
        for kind in EntityKind::ALL {
            let fields = field_set(kind);
            assert_eq!(fields.entity(), kind);
            fields.validate().unwrap();
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let fields = field_set(EntityKind::Recording);
        let qdur = fields.get("qdur").unwrap();
        assert_eq!(qdur.kind, FieldKind::Integer);
        assert!(!qdur.stored);
        assert!(fields.get("nonexistent").is_none());
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let names: Vec<&str> = field_set(EntityKind::Tag).iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["tag", "tagid"]);
    }

    #[test]
    fn test_credit_fields_are_shared() {
        for kind in [
            EntityKind::Recording,
            EntityKind::Release,
            EntityKind::ReleaseGroup,
        ] {
            let fields = field_set(kind);
            for def in credit_field_definitions() {
                assert_eq!(fields.get(def.name), Some(&def), "{kind}.{}", def.name);
            }
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let set = FieldSet::new(
            EntityKind::Tag,
            vec![
                FieldDefinition::default_text("tag"),
                FieldDefinition::stored_only("tag"),
            ],
            vec!["tag"],
        );
        let err = set.validate().unwrap_err();
        assert!(err.to_string().contains("not unique"));
    }

    #[test]
    fn test_untokenized_without_keyword_rejected() {
        let mut field = FieldDefinition::keyword("isrc");
        field.analyzer = Some(Analyzer::Standard);
        let set = FieldSet::new(EntityKind::Recording, vec![field], vec!["isrc"]);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_stored_only_with_analyzer_rejected() {
        let mut field = FieldDefinition::stored_only("comment");
        field.analyzer = Some(Analyzer::Standard);
        let set = FieldSet::new(
            EntityKind::Artist,
            vec![FieldDefinition::default_text("artist"), field],
            vec!["artist"],
        );
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_unknown_default_field_rejected() {
        let set = FieldSet::new(
            EntityKind::Tag,
            vec![FieldDefinition::default_text("tag")],
            vec!["label"],
        );
        let err = set.validate().unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_stored_only_default_field_rejected() {
        let set = FieldSet::new(
            EntityKind::Tag,
            vec![FieldDefinition::stored_only("tagid")],
            vec!["tagid"],
        );
        assert!(set.validate().is_err());
    }
}
