//! Lexer for form text files.
//!
//! This module provides a lexer that tokenizes form text into a stream
//! of tokens with their positions in the source text. Every byte of the
//! input belongs to exactly one token, so the stream is lossless.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Returns the token's text within `source`.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.range]
    }
}

/// Lexer for form text.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the text of the current token.
    #[must_use]
    pub fn slice(&self) -> &'src str {
        self.inner.slice()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let span = self.inner.span();

        let kind = kind.unwrap_or(TokenKind::Error);
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );

        Some(Token::new(kind, range))
    }
}

/// Lex the entire source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| (token, token.text(source)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let source = "Height =315";
        let tokens = lex(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia.len(), 3);
        assert_eq!(non_trivia[0].kind, TokenKind::Ident);
        assert_eq!(non_trivia[1].kind, TokenKind::Eq);
        assert_eq!(non_trivia[2].kind, TokenKind::Number);
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let source = "Name =\"x\"";
        let tokens = lex(source);

        assert_eq!(tokens[0].range, TextRange::new(0.into(), 4.into()));
        assert_eq!(tokens[1].range, TextRange::new(4.into(), 5.into()));
        assert_eq!(tokens[2].range, TextRange::new(5.into(), 6.into()));
        assert_eq!(tokens[3].range, TextRange::new(6.into(), 9.into()));
    }

    #[test]
    fn test_lex_with_text() {
        let source = "GUID = Begin 0xAB End";
        let tokens = lex_with_text(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|(t, _)| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia[0].1, "GUID");
        assert_eq!(non_trivia[2].1, "Begin");
        assert_eq!(non_trivia[3].1, "0xAB");
        assert_eq!(non_trivia[4].1, "End");
    }

    #[test]
    fn test_lexing_is_lossless() {
        let source = "Version =21\r\nBegin Form\n  Caption =\"Caf\u{e9}\" \u{2603}\n\"open\nEnd";
        let rebuilt: String = lex_with_text(source).into_iter().map(|(_, text)| text).collect();
        assert_eq!(rebuilt, source);
    }
}
