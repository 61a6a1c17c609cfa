//! Token definitions for form text files.
//!
//! The host format is line-oriented, so line breaks are their own token
//! kind rather than part of whitespace. Both are trivia for the parser.

use logos::Logos;

/// All token kinds in a form text file.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, line breaks) - preserved but not structurally significant
/// - Keywords (`Begin`, `End`)
/// - Punctuation (`=`, `,`)
/// - Literals (strings, hex blobs, numbers)
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Spaces and tabs. A byte order mark is treated the same way.
    #[regex(r"[ \t\u{FEFF}]+")]
    Whitespace,

    /// A single line break: `\r\n`, `\n`, or `\r`.
    #[regex(r"\r\n|\n|\r")]
    Newline,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `Begin`
    #[token("Begin")]
    KwBegin,

    /// `End`
    #[token("End")]
    KwEnd,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `=`
    #[token("=")]
    Eq,

    /// `,`
    #[token(",")]
    Comma,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Double-quoted string, `""` escapes a quote. Never spans a line.
    #[regex(r#""([^"\r\n]|"")*""#)]
    String,

    /// Hex blob: `0x` followed by alphanumerics.
    ///
    /// Letters outside `a-f` are accepted here so that a malformed blob
    /// stays a single token; validating the digits is left to callers.
    #[regex(r"0[xX][0-9A-Za-z]*")]
    HexLiteral,

    /// Integer or decimal number, optionally negative: `315`, `-1`, `0.5`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Property keys and block kinds: `Name`, `ControlSource`, `TextBox`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Lexer error - unrecognized character or unterminated string.
    #[regex(r#""[^"\r\n]*"#, priority = 1)]
    #[default]
    Error,

    /// End of file marker (not produced by lexer, added by parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or a line break).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }

    /// Returns `true` if this token is a keyword.
    pub fn is_keyword(self) -> bool {
        matches!(self, Self::KwBegin | Self::KwEnd)
    }

    /// Returns `true` if this token is a literal value.
    pub fn is_literal(self) -> bool {
        matches!(self, Self::String | Self::HexLiteral | Self::Number)
    }
}
