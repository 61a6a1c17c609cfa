//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides lookahead and consumption operations.

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub struct Source<'t> {
    tokens: &'t [Token],
    cursor: usize,
}

impl<'t> Source<'t> {
    /// Creates a new source from tokens.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub fn current_token(&self) -> Option<&Token> {
        self.peek_token_n(0)
    }

    /// Peeks at the nth non-trivia token ahead (0 = current).
    pub fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub fn peek_token_n(&self, n: usize) -> Option<&Token> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
    }

    /// Advances past the current non-trivia token.
    pub fn bump(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_trivia() {
                break;
            }
        }
    }

    /// Returns `true` if at end of input.
    pub fn at_end(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    /// Returns `true` if a line break separates the last consumed token
    /// from the next non-trivia token. End of input counts as a line end.
    pub fn newline_before_next(&self) -> bool {
        for token in self.tokens.iter().skip(self.cursor) {
            match token.kind {
                TokenKind::Newline => return true,
                TokenKind::Whitespace => {}
                _ => return false,
            }
        }
        true
    }

    /// Byte offset just past the last token, for diagnostics at end of input.
    pub fn end_offset(&self) -> text_size::TextSize {
        self.tokens
            .last()
            .map_or_else(|| text_size::TextSize::from(0), |token| token.range.end())
    }
}
