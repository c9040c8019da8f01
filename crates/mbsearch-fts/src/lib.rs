//! Per-field analysis, documents, and Tantivy-backed indexing and querying.
//!
//! Every entity has a fixed field table. Each field declares how it is
//! indexed and which analyzer tokenizes it, and that one declaration drives
//! the Tantivy schema, document conversion and query parsing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      mbsearch-fts                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Analyzer (Standard, Title, Keyword, + position-gap)        │
//! │  WordTokenizer (UAX #29 words), TokenMapper, stopwords      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FieldSet per entity (recording, artist, release, ...)      │
//! │  AnalyzerRegistry (field → analyzer, Tantivy tokenizers)    │
//! │  EntitySchema (FieldSet → Tantivy schema)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Document (ordered multi-valued fields)                     │
//! │  DocumentSink trait                                         │
//! │  ├── TantivySink (on disk / in RAM)                         │
//! │  └── MemorySink (tests, dry runs)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  EntityQueryParser (field-aware query parsing)              │
//! │  SearchIndex (count, top hits with stored fields)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mbsearch_core::EntityKind;
//! use mbsearch_fts::{Document, DocumentSink, SearchIndex, TantivySink};
//!
//! let sink = TantivySink::create_in_ram(EntityKind::Tag, 50_000_000)?;
//! let mut doc = Document::new(EntityKind::Tag);
//! doc.add_field("tag", "alternative rock");
//! sink.add(&doc)?;
//! sink.close()?;
//!
//! let index = SearchIndex::from_index(sink.index().clone(), EntityKind::Tag)?;
//! index.reload()?;
//! assert_eq!(index.count("rock")?, 1);
//! ```

pub mod analyzer;
pub mod document;
pub mod fields;
pub mod indexer;
pub mod query;
pub mod registry;
pub mod schema;
pub mod search;
pub mod stopwords;
pub mod tokenizer;

mod proptests;

// Re-exports
pub use analyzer::{Analyzer, Token};
pub use document::{Document, FieldValue};
pub use fields::{
    ARTIST_CREDIT_FIELDS, CreditFields, FieldDefinition, FieldKind, FieldSet, IndexingMode,
    field_set,
};
pub use indexer::{DocumentSink, MemorySink, TantivySink};
pub use query::EntityQueryParser;
pub use registry::{AnalyzerRegistry, registry};
pub use schema::EntitySchema;
pub use search::{SearchHit, SearchIndex};
pub use stopwords::{ENGLISH_STOP_WORDS, english_stop_word_filter};
pub use tokenizer::{TokenMapper, WordTokenizer};
