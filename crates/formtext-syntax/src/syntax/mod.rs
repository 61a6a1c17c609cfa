//! Syntax tree types for form text files.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use crate::lexer::TokenKind;

/// All syntax node and token kinds in form text.
///
/// This enum includes both token kinds (from the lexer) and composite
/// node kinds (produced by the parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // =========================================================================
    // TOKEN KINDS (mirrors TokenKind)
    // =========================================================================
    /// Spaces and tabs
    Whitespace,
    /// Line break
    Newline,
    /// `Begin`
    KwBegin,
    /// `End`
    KwEnd,
    /// `=`
    Eq,
    /// `,`
    Comma,
    /// Quoted string
    String,
    /// `0x...` blob
    HexLiteral,
    /// Numeric literal
    Number,
    /// Identifier
    Ident,
    /// Unrecognized input
    Error,
    /// End of input
    Eof,

    // =========================================================================
    // COMPOSITE NODE KINDS (produced by parser)
    // =========================================================================
    /// Root node of a form text file
    Document,

    /// A nested block: `Begin Form ... End`, or an anonymous `Begin ... End` group
    Block,

    /// A property line: `Height =315`, `Name ="Detail"`
    Property,

    /// The value tokens of a property line
    PropertyValue,

    /// A binary property: `GUID = Begin 0x... End`, `NameMap = Begin ... End`
    BinaryProperty,

    /// The content between `Begin` and `End` of a binary property
    BinaryContent,

    /// Tokens the parser could not place
    ErrorNode,
}

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Whitespace => Self::Whitespace,
            TokenKind::Newline => Self::Newline,
            TokenKind::KwBegin => Self::KwBegin,
            TokenKind::KwEnd => Self::KwEnd,
            TokenKind::Eq => Self::Eq,
            TokenKind::Comma => Self::Comma,
            TokenKind::String => Self::String,
            TokenKind::HexLiteral => Self::HexLiteral,
            TokenKind::Number => Self::Number,
            TokenKind::Ident => Self::Ident,
            TokenKind::Error => Self::Error,
            TokenKind::Eof => Self::Eof,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for form text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormLanguage {}

const SYNTAX_KINDS: &[SyntaxKind] = &[
    SyntaxKind::Whitespace,
    SyntaxKind::Newline,
    SyntaxKind::KwBegin,
    SyntaxKind::KwEnd,
    SyntaxKind::Eq,
    SyntaxKind::Comma,
    SyntaxKind::String,
    SyntaxKind::HexLiteral,
    SyntaxKind::Number,
    SyntaxKind::Ident,
    SyntaxKind::Error,
    SyntaxKind::Eof,
    SyntaxKind::Document,
    SyntaxKind::Block,
    SyntaxKind::Property,
    SyntaxKind::PropertyValue,
    SyntaxKind::BinaryProperty,
    SyntaxKind::BinaryContent,
    SyntaxKind::ErrorNode,
];

impl rowan::Language for FormLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the form text CST.
pub type SyntaxNode = rowan::SyntaxNode<FormLanguage>;

/// A syntax token in the form text CST.
pub type SyntaxToken = rowan::SyntaxToken<FormLanguage>;

/// A syntax element (node or token) in the form text CST.
pub type SyntaxElement = rowan::SyntaxElement<FormLanguage>;
