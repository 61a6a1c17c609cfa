//! Line-oriented scans that hold for arbitrary input.
//!
//! The tree is the right tool for locating blocks, but a control's `Name`
//! line must be found even when the surrounding structure is broken, so
//! [`name_lines`] works on the raw token stream one line at a time.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::ast::unquote;
use crate::lexer::{lex, TokenKind};

/// A `Name ="<value>"` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameLine {
    /// The decoded, non-empty name.
    pub value: SmolStr,
    /// Range of the string literal in the source.
    pub range: TextRange,
    /// Zero-based line number.
    pub line: usize,
}

/// Collects every line whose first tokens are `Name`, `=` and a non-empty
/// string literal, in source order. Whatever follows the literal on the
/// same line is ignored.
#[must_use]
pub fn name_lines(source: &str) -> Vec<NameLine> {
    let tokens = lex(source);
    tokens
        .split(|token| token.kind == TokenKind::Newline)
        .enumerate()
        .filter_map(|(line, tokens)| {
            let mut significant = tokens
                .iter()
                .filter(|token| token.kind != TokenKind::Whitespace);
            let key = significant.next()?;
            let eq = significant.next()?;
            let value = significant.next()?;
            if key.kind != TokenKind::Ident
                || key.text(source) != "Name"
                || eq.kind != TokenKind::Eq
                || value.kind != TokenKind::String
            {
                return None;
            }
            let decoded = unquote(value.text(source))?;
            if decoded.is_empty() {
                return None;
            }
            Some(NameLine {
                value: SmolStr::new(decoded),
                range: value.range,
                line,
            })
        })
        .collect()
}

/// Returns the leading spaces and tabs of the line containing `offset`.
#[must_use]
pub fn line_indent(source: &str, offset: TextSize) -> &str {
    let offset = usize::from(offset).min(source.len());
    let line_start = source[..offset]
        .rfind(['\n', '\r'])
        .map_or(0, |index| index + 1);
    let line = &source[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Returns the line terminator of the first line break in `source`, or
/// `"\n"` when there is none. Rewritten blocks use it so a CRLF export
/// stays CRLF throughout.
#[must_use]
pub fn line_ending(source: &str) -> &'static str {
    match source.find(['\n', '\r']) {
        Some(index) if source[index..].starts_with("\r\n") => "\r\n",
        Some(index) if source.as_bytes()[index] == b'\r' => "\r",
        _ => "\n",
    }
}
