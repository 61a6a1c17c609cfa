//! Form text parser.
//!
//! Recursive descent over the token stream, recording start/token/finish
//! events that the `sink` folds into a `rowan` green tree. Documents are
//! often hand-edited, so parsing never fails: a missing `End` or a stray
//! one becomes a [`ParseError`] and the tree still covers every byte,
//! `parse(text).syntax().to_string() == text`.

#![allow(clippy::module_inception)]

pub mod event;
mod grammar;
mod parser;
mod sink;
mod source;

pub use parser::parse;
pub(crate) use parser::Parser;

use crate::syntax::SyntaxNode;

/// A parsed document: the lossless tree plus its diagnostics.
#[derive(Debug)]
pub struct Parse {
    green_node: rowan::GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    /// The `Document` root.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green_node.clone())
    }

    /// Diagnostics in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// `true` when every block is balanced.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A structural problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong, e.g. `expected End`.
    pub message: String,
    /// Byte range of the offending token, empty at end of input.
    pub range: text_size::TextRange,
}

impl ParseError {
    /// One-based line of the error start in `source`. Any of `\r\n`,
    /// `\n` or a lone `\r` ends a line.
    #[must_use]
    pub fn line_number(&self, source: &str) -> usize {
        let end = usize::from(self.range.start()).min(source.len());
        let prefix = &source.as_bytes()[..end];
        let breaks = prefix
            .iter()
            .enumerate()
            .filter(|&(index, &byte)| {
                byte == b'\n' || (byte == b'\r' && prefix.get(index + 1) != Some(&b'\n'))
            })
            .count();
        breaks + 1
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

impl std::error::Error for ParseError {}
