//! Stopword filtering for the standard analyzer.
//!
//! The stopword set is the classic fixed English list of 33 words. The filter
//! runs after case and diacritic folding, so it only has to match folded
//! tokens. Title analyzers leave it out of their chain: an artist called
//! "The The" must stay findable.
//!
//! # Example
//!
//! ```rust
//! use mbsearch_fts::stopwords::english_stop_word_filter;
//! use tantivy::tokenizer::{SimpleTokenizer, TextAnalyzer, TokenStream};
//!
//! let mut analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
//!     .filter(english_stop_word_filter())
//!     .build();
//! let mut stream = analyzer.token_stream("the beatles");
//! let mut words = Vec::new();
//! while stream.advance() {
//!     words.push(stream.token().text.clone());
//! }
//! assert_eq!(words, vec!["beatles"]);
//! ```

use tantivy::tokenizer::StopWordFilter;

/// The fixed English stopword list.
pub const ENGLISH_STOP_WORDS: [&str; 33] = [
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Token filter dropping [`ENGLISH_STOP_WORDS`].
///
/// Surviving tokens keep their positions, so a removed stopword leaves a
/// hole rather than pulling the following words forward.
pub fn english_stop_word_filter() -> StopWordFilter {
    StopWordFilter::remove(ENGLISH_STOP_WORDS.iter().map(|word| word.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
