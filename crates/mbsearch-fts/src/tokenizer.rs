//! Tantivy building blocks of the analyzers.
//!
//! [`WordTokenizer`] splits text on Unicode word boundaries (UAX #29) and
//! keeps the segments holding a letter or digit, so ideographic scripts yield
//! one token per character and "R.E.M" or "don't" stay single words.
//! [`TokenMapper`] runs a plain function over every token of a stream and
//! drops the tokens it rejects.

use mbsearch_core::constants::SUBTITLE_POSITION_GAP;
use tantivy::tokenizer::{Token, TokenFilter, TokenStream, Tokenizer};
use unicode_segmentation::UnicodeSegmentation;

/// Word tokenizer, optionally aware of title subtitles.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer {
    subtitles: bool,
}

impl WordTokenizer {
    /// Plain word tokenizer; positions count words.
    pub fn words() -> Self {
        Self { subtitles: false }
    }

    /// Title tokenizer: every subtitle segment starts
    /// [`SUBTITLE_POSITION_GAP`] positions after the previous segment.
    pub fn titles() -> Self {
        Self { subtitles: true }
    }
}

impl Tokenizer for WordTokenizer {
    type TokenStream<'a> = VecTokenStream;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let tokens = if self.subtitles {
            title_words(text)
        } else {
            words(text, 0, 0)
        };
        VecTokenStream::new(tokens)
    }
}

fn words(text: &str, offset: usize, base: usize) -> Vec<Token> {
    text.split_word_bound_indices()
        .filter(|(_, word)| word.chars().any(char::is_alphanumeric))
        .enumerate()
        .map(|(index, (from, word))| Token {
            offset_from: offset + from,
            offset_to: offset + from + word.len(),
            position: base + index,
            text: word.to_string(),
            position_length: 1,
        })
        .collect()
}

fn title_words(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut base = 0;
    for (start, segment) in subtitle_segments(text) {
        let segment_tokens = words(segment, start, base);
        if let Some(last) = segment_tokens.last() {
            base = last.position + 1 + SUBTITLE_POSITION_GAP;
        }
        tokens.extend(segment_tokens);
    }
    tokens
}

/// Cut a title into its main segment and subtitle segments.
///
/// A subtitle starts at `(`, `[`, `:` or ` - `. Returns each segment with its
/// byte offset in `text`.
fn subtitle_segments(text: &str) -> Vec<(usize, &str)> {
    let mut cuts: Vec<usize> = text
        .char_indices()
        .filter(|&(idx, c)| idx > 0 && matches!(c, '(' | '[' | ':'))
        .map(|(idx, _)| idx)
        .collect();

    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(" - ") {
        let at = search_from + found;
        if at > 0 {
            cuts.push(at);
        }
        search_from = at + " - ".len();
    }

    cuts.push(0);
    cuts.push(text.len());
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|bounds| (bounds[0], &text[bounds[0]..bounds[1]]))
        .collect()
}

/// Token stream over tokens produced up front.
#[derive(Debug)]
pub struct VecTokenStream {
    tokens: std::vec::IntoIter<Token>,
    current: Token,
}

impl VecTokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            current: Token::default(),
        }
    }
}

impl TokenStream for VecTokenStream {
    fn advance(&mut self) -> bool {
        match self.tokens.next() {
            Some(token) => {
                self.current = token;
                true
            }
            None => false,
        }
    }

    fn token(&self) -> &Token {
        &self.current
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.current
    }
}

// ============================================================================
// Token mapper
// ============================================================================

/// Token filter applying `map` to every token.
///
/// `map` rewrites the token in place and returns `false` to drop it.
#[derive(Clone, Copy)]
pub struct TokenMapper {
    map: fn(&mut Token) -> bool,
}

impl TokenMapper {
    /// Wrap a mapping function.
    pub fn new(map: fn(&mut Token) -> bool) -> Self {
        Self { map }
    }
}

impl std::fmt::Debug for TokenMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenMapper").finish_non_exhaustive()
    }
}

impl TokenFilter for TokenMapper {
    type Tokenizer<T: Tokenizer> = MappedTokenizer<T>;

    fn transform<T: Tokenizer>(self, tokenizer: T) -> MappedTokenizer<T> {
        MappedTokenizer {
            inner: tokenizer,
            map: self.map,
        }
    }
}

/// A tokenizer followed by a [`TokenMapper`].
#[derive(Clone)]
pub struct MappedTokenizer<T> {
    inner: T,
    map: fn(&mut Token) -> bool,
}

impl<T: Tokenizer> Tokenizer for MappedTokenizer<T> {
    type TokenStream<'a> = MappedTokenStream<T::TokenStream<'a>>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        MappedTokenStream {
            tail: self.inner.token_stream(text),
            map: self.map,
        }
    }
}

/// Token stream of a [`MappedTokenizer`].
pub struct MappedTokenStream<S> {
    tail: S,
    map: fn(&mut Token) -> bool,
}

impl<S: TokenStream> TokenStream for MappedTokenStream<S> {
    fn advance(&mut self) -> bool {
        while self.tail.advance() {
            if (self.map)(self.tail.token_mut()) {
                return true;
            }
        }
        false
    }

    fn token(&self) -> &Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.tail.token_mut()
    }
}

// ============================================================================
// Tests
// ============================================================================
