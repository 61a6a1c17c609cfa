//! Typed views over the syntax tree.
//!
//! Each wrapper is a thin newtype around a [`SyntaxNode`] of the matching
//! kind; accessors return `None` when the tree is malformed rather than
//! panicking.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

fn last_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
        .last()
}

/// Decodes a string literal: strips the surrounding quotes and collapses
/// doubled quotes. Returns `None` if `text` is not a quoted string.
#[must_use]
pub fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\"\"", "\""))
}

/// Encodes `value` as a string literal, doubling embedded quotes.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// A `Begin <Kind> ... End` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block(SyntaxNode);

impl Block {
    /// Wraps `node` if it is a block.
    #[must_use]
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::Block).then_some(Self(node))
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// The block kind (`Form`, `Section`, `TextBox`, ...), or `None` for an
    /// anonymous `Begin ... End` group.
    #[must_use]
    pub fn kind_name(&self) -> Option<SmolStr> {
        child_token(&self.0, SyntaxKind::Ident).map(|token| SmolStr::new(token.text()))
    }

    /// Returns `true` if the block is closed by `End`.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        child_token(&self.0, SyntaxKind::KwEnd).is_some()
    }

    /// Direct child property lines.
    pub fn properties(&self) -> impl Iterator<Item = Property> {
        self.0.children().filter_map(Property::cast)
    }

    /// Direct child binary properties.
    pub fn binary_properties(&self) -> impl Iterator<Item = BinaryProperty> {
        self.0.children().filter_map(BinaryProperty::cast)
    }

    /// Direct child blocks.
    pub fn blocks(&self) -> impl Iterator<Item = Block> {
        self.0.children().filter_map(Block::cast)
    }

    /// The first direct child property with the given key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<Property> {
        self.properties()
            .find(|property| property.key_text().as_deref() == Some(key))
    }
}

/// A `Key =value` property line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property(SyntaxNode);

impl Property {
    /// Wraps `node` if it is a property line.
    #[must_use]
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::Property).then_some(Self(node))
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// The key token.
    #[must_use]
    pub fn key(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    /// The key text.
    #[must_use]
    pub fn key_text(&self) -> Option<SmolStr> {
        self.key().map(|token| SmolStr::new(token.text()))
    }

    fn value_node(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|node| node.kind() == SyntaxKind::PropertyValue)
    }

    /// The raw value text with surrounding whitespace removed.
    #[must_use]
    pub fn value_text(&self) -> String {
        self.value_node()
            .map(|node| node.text().to_string().trim().to_string())
            .unwrap_or_default()
    }

    /// The value decoded as a string literal, if it is one.
    #[must_use]
    pub fn string_value(&self) -> Option<String> {
        unquote(&self.value_text())
    }

    /// The value parsed as an integer, if it is one.
    #[must_use]
    pub fn int_value(&self) -> Option<i64> {
        self.value_text().parse().ok()
    }
}

/// A `Key = Begin ... End` binary property such as `GUID` or `NameMap`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryProperty(SyntaxNode);

impl BinaryProperty {
    /// Wraps `node` if it is a binary property.
    #[must_use]
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::BinaryProperty).then_some(Self(node))
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// The key token.
    #[must_use]
    pub fn key(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    /// The key text.
    #[must_use]
    pub fn key_text(&self) -> Option<SmolStr> {
        self.key().map(|token| SmolStr::new(token.text()))
    }

    /// The `Begin` token opening the content.
    #[must_use]
    pub fn begin_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::KwBegin)
    }

    /// The `End` token closing the content, if present.
    #[must_use]
    pub fn end_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::KwEnd)
    }

    /// Returns `true` if the content is closed by `End`.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.end_token().is_some()
    }

    fn content_node(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|node| node.kind() == SyntaxKind::BinaryContent)
    }

    /// Range between `Begin` and `End`.
    ///
    /// Without an `End` the range stops after the last content token, so
    /// the line break and indentation that follow are left in place.
    #[must_use]
    pub fn content_range(&self) -> TextRange {
        let start = self
            .begin_token()
            .map_or_else(|| self.0.text_range().end(), |token| token.text_range().end());
        let end = match self.end_token() {
            Some(end) => end.text_range().start(),
            None => self
                .content_node()
                .and_then(|node| last_significant_token(&node))
                .map_or(start, |token| token.text_range().end()),
        };
        TextRange::new(start, end.max(start))
    }

    /// The content text between `Begin` and `End`.
    #[must_use]
    pub fn content_text(&self) -> String {
        let range = self.content_range() - self.0.text_range().start();
        self.0.text().to_string()[range].to_string()
    }

    /// Range from the start of the key to the end of `End` (or of the
    /// content when `End` is missing).
    #[must_use]
    pub fn full_range(&self) -> TextRange {
        let start = self
            .key()
            .map_or_else(|| self.0.text_range().start(), |token| token.text_range().start());
        let end: TextSize = match self.end_token() {
            Some(end) => end.text_range().end(),
            None => self.content_range().end(),
        };
        TextRange::new(start, end.max(start))
    }
}
