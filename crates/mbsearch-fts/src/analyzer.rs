//! Text analyzers.
//!
//! An analyzer is a deterministic `text -> tokens` transform. Each variant is
//! a Tantivy [`TextAnalyzer`] chain:
//!
//! ```text
//! Standard : words → strip markers → lowercase → fold diacritics → drop stopwords
//! Title    : title words → strip markers → lowercase → fold diacritics
//! Keyword  : raw value → trim
//! ```
//!
//! Words follow Unicode word boundaries (see [`crate::tokenizer`]). Title
//! words additionally push every subtitle segment [`SUBTITLE_POSITION_GAP`]
//! positions further.
//!
//! The `*WithPositionGap` variants end with one more step that moves every
//! value [`POSITION_GAP`] positions in. The engine continues positions from
//! one value of a field to the next, so that shift is what keeps phrases from
//! matching across values.
//!
//! Positions count words, including dropped stopwords, so a phrase keeps its
//! shape whether or not a stopword was removed from it.
//!
//! [`SUBTITLE_POSITION_GAP`]: mbsearch_core::constants::SUBTITLE_POSITION_GAP

use mbsearch_core::constants::POSITION_GAP;
use tantivy::tokenizer::{
    LowerCaser, RawTokenizer, TextAnalyzer, TextAnalyzerBuilder, Token as EngineToken,
    TokenStream, Tokenizer,
};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::stopwords::english_stop_word_filter;
use crate::tokenizer::{TokenMapper, WordTokenizer};

/// A normalized token with its position and byte offsets in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalized token text.
    pub text: String,
    /// Token position, used by phrase queries.
    pub position: usize,
    /// Start byte offset in the analyzed text.
    pub offset_from: usize,
    /// End byte offset in the analyzed text.
    pub offset_to: usize,
}

impl From<&EngineToken> for Token {
    fn from(token: &EngineToken) -> Self {
        Self {
            text: token.text.clone(),
            position: token.position,
            offset_from: token.offset_from,
            offset_to: token.offset_to,
        }
    }
}

/// Text analysis strategy for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analyzer {
    /// Word tokenization, case and diacritic folding, English stopword removal.
    Standard,
    /// [`Analyzer::Standard`] with a position gap between field values.
    StandardWithPositionGap,
    /// Like `Standard` but keeps stopwords and separates subtitles positionally.
    Title,
    /// [`Analyzer::Title`] with a position gap between field values.
    TitleWithPositionGap,
    /// The whole value is one exact token.
    Keyword,
}

impl Analyzer {
    /// Every analyzer variant.
    pub const ALL: [Analyzer; 5] = [
        Analyzer::Standard,
        Analyzer::StandardWithPositionGap,
        Analyzer::Title,
        Analyzer::TitleWithPositionGap,
        Analyzer::Keyword,
    ];

    /// Name under which the analyzer is registered with the search engine.
    pub fn tokenizer_name(self) -> &'static str {
        match self {
            Analyzer::Standard => "mb_standard",
            Analyzer::StandardWithPositionGap => "mb_standard_posgap",
            Analyzer::Title => "mb_title",
            Analyzer::TitleWithPositionGap => "mb_title_posgap",
            Analyzer::Keyword => "mb_keyword",
        }
    }

    /// Whether successive values of a field are separated by [`POSITION_GAP`].
    pub fn has_position_gap(self) -> bool {
        matches!(
            self,
            Analyzer::StandardWithPositionGap | Analyzer::TitleWithPositionGap
        )
    }

    /// The Tantivy analyzer chain of this variant.
    pub fn text_analyzer(self) -> TextAnalyzer {
        match self {
            Analyzer::Standard => standard_chain().build(),
            Analyzer::StandardWithPositionGap => standard_chain()
                .filter(TokenMapper::new(shift_by_position_gap))
                .build(),
            Analyzer::Title => title_chain().build(),
            Analyzer::TitleWithPositionGap => title_chain()
                .filter(TokenMapper::new(shift_by_position_gap))
                .build(),
            Analyzer::Keyword => TextAnalyzer::builder(RawTokenizer::default())
                .filter(TokenMapper::new(trim))
                .build(),
        }
    }

    /// Analyze a single value.
    ///
    /// Positions start at zero, or at [`POSITION_GAP`] for position-gap
    /// variants.
    pub fn analyze(self, text: &str) -> Vec<Token> {
        let mut analyzer = self.text_analyzer();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(Token::from(stream.token()));
        }
        tokens
    }

    /// Analyze the successive values of one multi-valued field, numbering
    /// positions the way the engine does.
    ///
    /// Each value continues one position past the end of the previous one,
    /// empty values included. Offsets stay relative to the value they came
    /// from.
    pub fn analyze_values<S: AsRef<str>>(self, values: &[S]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut base = 0;
        for value in values {
            let mut end = base;
            for mut token in self.analyze(value.as_ref()) {
                token.position += base;
                end = end.max(token.position + 1);
                tokens.push(token);
            }
            base = end + 1;
        }
        tokens
    }

    /// Token texts of a single value.
    pub fn terms(self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|t| t.text).collect()
    }
}

// ============================================================================
// Chains
// ============================================================================

fn standard_chain() -> TextAnalyzerBuilder<impl Tokenizer> {
    TextAnalyzer::builder(WordTokenizer::words())
        .filter(TokenMapper::new(strip_markers))
        .filter(LowerCaser)
        .filter(TokenMapper::new(fold_diacritics))
        .filter(english_stop_word_filter())
}

fn title_chain() -> TextAnalyzerBuilder<impl Tokenizer> {
    TextAnalyzer::builder(WordTokenizer::titles())
        .filter(TokenMapper::new(strip_markers))
        .filter(LowerCaser)
        .filter(TokenMapper::new(fold_diacritics))
}

// ============================================================================
// Steps
// ============================================================================

/// Remove possessive suffixes, acronym dots, and apostrophes.
fn strip_markers(token: &mut EngineToken) -> bool {
    let word = token.text.as_str();
    let base = ["'s", "'S", "\u{2019}s", "\u{2019}S"]
        .iter()
        .find_map(|suffix| word.strip_suffix(*suffix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(word);

    let stripped: String = if is_acronym(base) {
        base.chars().filter(|c| *c != '.').collect()
    } else {
        base.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')).collect()
    };
    token.text = stripped;
    !token.text.is_empty()
}

fn is_acronym(word: &str) -> bool {
    word.contains('.')
        && word.split('.').all(|part| {
            let mut chars = part.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
        })
}

/// NFKD-decompose and drop combining marks.
fn fold_diacritics(token: &mut EngineToken) -> bool {
    if !token.text.is_ascii() {
        token.text = token.text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    }
    !token.text.is_empty()
}

fn trim(token: &mut EngineToken) -> bool {
    let leading = token.text.len() - token.text.trim_start().len();
    let trimmed = token.text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let trimmed_len = trimmed.len();
    token.text = trimmed.to_string();
    token.offset_from += leading;
    token.offset_to = token.offset_from + trimmed_len;
    true
}

fn shift_by_position_gap(token: &mut EngineToken) -> bool {
    token.position += POSITION_GAP;
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use mbsearch_core::constants::SUBTITLE_POSITION_GAP;

    use super::*;

    fn positions(tokens: &[Token]) -> Vec<usize> {
        tokens.iter().map(|t| t.position).collect()
    }

    // ------------------------------------------------------------------------
    // Standard analyzer
    // ------------------------------------------------------------------------

    #[test]
    fn test_standard_folds_case_and_diacritics() {
        assert_eq!(Analyzer::Standard.terms("Björk Guðmundsdóttir"), vec![
            "bjork",
            "guðmundsdottir"
        ]);
        assert_eq!(Analyzer::Standard.terms("SIGUR RÓS"), vec!["sigur", "ros"]);
    }

    #[test]
    fn test_standard_drops_stopwords_but_keeps_positions() {
        let tokens = Analyzer::Standard.analyze("The Beatles and the Stones");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["beatles", "stones"]);
        assert_eq!(positions(&tokens), vec![1, 4]);
    }

    #[test]
    fn test_standard_strips_markers() {
        assert_eq!(Analyzer::Standard.terms("R.E.M."), vec!["rem"]);
        assert_eq!(Analyzer::Standard.terms("Sgt. Pepper's"), vec!["sgt", "pepper"]);
        assert_eq!(Analyzer::Standard.terms("Don't Stop"), vec!["dont", "stop"]);
        assert_eq!(Analyzer::Standard.terms("Guns N’ Roses"), vec!["guns", "n", "roses"]);
    }

    #[test]
    fn test_standard_splits_ideographs() {
        let terms = Analyzer::Standard.terms("東京事変");
        assert!(terms.len() > 1);
        assert_eq!(terms, vec!["東", "京", "事", "変"]);
        assert_eq!(Analyzer::Title.terms("東京事変 (Live)"), vec![
            "東", "京", "事", "変", "live"
        ]);
    }

    #[test]
    fn test_standard_keeps_version_numbers() {
        assert_eq!(Analyzer::Standard.terms("Vol. 2.0"), vec!["vol", "2.0"]);
    }

    #[test]
    fn test_standard_offsets() {
        let tokens = Analyzer::Standard.analyze("  Beatles!");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].offset_from, 2);
        assert_eq!(tokens[0].offset_to, 9);
    }

    #[test]
    fn test_standard_empty_input() {
        assert!(Analyzer::Standard.analyze("").is_empty());
        assert!(Analyzer::Standard.analyze(" -- !! ").is_empty());
    }

    #[test]
    fn test_standard_decomposed_input_matches_composed() {
        let composed = Analyzer::Standard.terms("Beyonc\u{e9}");
        let decomposed = Analyzer::Standard.terms("Beyonce\u{301}");
        assert_eq!(composed, decomposed);
        assert_eq!(composed, vec!["beyonce"]);
    }

    // ------------------------------------------------------------------------
    // Title analyzer
    // ------------------------------------------------------------------------

    #[test]
    fn test_title_keeps_stopwords() {
        assert_eq!(Analyzer::Title.terms("The The"), vec!["the", "the"]);
        assert_eq!(Analyzer::Title.terms("Let It Be"), vec!["let", "it", "be"]);
    }

    #[test]
    fn test_title_separates_subtitle() {
        let tokens = Analyzer::Title.analyze("Help (Remastered)");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 1 + SUBTITLE_POSITION_GAP);
        assert_eq!(&"Help (Remastered)"[tokens[1].offset_from..tokens[1].offset_to], "Remastered");
    }

    #[test]
    fn test_title_dash_subtitle() {
        let tokens = Analyzer::Title.analyze("Yesterday - Live");
        assert_eq!(positions(&tokens), vec![0, 1 + SUBTITLE_POSITION_GAP]);
    }

    #[test]
    fn test_title_hyphenated_word_is_not_subtitle() {
        let tokens = Analyzer::Title.analyze("Ob-La-Di");
        assert_eq!(positions(&tokens), vec![0, 1, 2]);
    }

    #[test]
    fn test_title_leading_bracket() {
        let tokens = Analyzer::Title.analyze("(I Can't Get No) Satisfaction");
        assert_eq!(tokens[0].text, "i");
        assert_eq!(tokens[0].position, 0);
    }

    // ------------------------------------------------------------------------
    // Keyword analyzer
    // ------------------------------------------------------------------------

    #[test]
    fn test_keyword_is_exact() {
        let tokens = Analyzer::Keyword.analyze("  Album ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Album");
        assert_eq!((tokens[0].offset_from, tokens[0].offset_to), (2, 7));
    }

    #[test]
    fn test_keyword_empty() {
        assert!(Analyzer::Keyword.analyze("   ").is_empty());
    }

    // ------------------------------------------------------------------------
    // Multi-valued fields
    // ------------------------------------------------------------------------

    #[test]
    fn test_values_continue_past_previous_value() {
        let tokens = Analyzer::Standard.analyze_values(&["Come Together", "Something"]);
        assert_eq!(positions(&tokens), vec![0, 1, 3]);
    }

    #[test]
    fn test_values_with_gap_are_separated() {
        let tokens =
            Analyzer::StandardWithPositionGap.analyze_values(&["Come Together", "Something"]);
        assert_eq!(positions(&tokens), vec![
            POSITION_GAP,
            POSITION_GAP + 1,
            2 * POSITION_GAP + 3
        ]);
    }

    #[test]
    fn test_values_count_empty_values() {
        let tokens = Analyzer::TitleWithPositionGap.analyze_values(&["Abbey Road", "", "Help"]);
        assert_eq!(positions(&tokens), vec![
            POSITION_GAP,
            POSITION_GAP + 1,
            2 * POSITION_GAP + 4
        ]);
    }

    #[test]
    fn test_gapped_value_starts_after_gap() {
        let tokens = Analyzer::StandardWithPositionGap.analyze("Fab Four");
        assert_eq!(positions(&tokens), vec![POSITION_GAP, POSITION_GAP + 1]);
        assert_eq!(
            Analyzer::TitleWithPositionGap.terms("The Fab Four"),
            Analyzer::Title.terms("The Fab Four")
        );
    }

    #[test]
    fn test_tokenizer_names_are_unique() {
        let mut names: Vec<&str> = Analyzer::ALL.iter().map(|a| a.tokenizer_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Analyzer::ALL.len());
    }
}
