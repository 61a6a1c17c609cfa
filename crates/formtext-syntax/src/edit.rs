//! Splicing replacement text into a source string.

use text_size::TextRange;

/// Replace `range` of the source with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Range to delete. Empty for a pure insertion.
    pub range: TextRange,
    /// Text to put in its place.
    pub insert: String,
}

impl TextEdit {
    /// Replaces `range` with `insert`.
    #[must_use]
    pub fn replace(range: TextRange, insert: impl Into<String>) -> Self {
        Self {
            range,
            insert: insert.into(),
        }
    }

    /// Inserts `insert` at `offset`.
    #[must_use]
    pub fn insert(offset: text_size::TextSize, insert: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(offset), insert)
    }
}

/// Applies non-overlapping edits to `source`. Text outside the edited
/// ranges is copied through byte for byte.
///
/// # Panics
///
/// Panics if two edits overlap or a range lies outside `source`.
#[must_use]
pub fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|edit| (edit.range.start(), edit.range.end()));
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in edits {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        assert!(start >= cursor, "overlapping edits at {start}");
        out.push_str(&source[cursor..start]);
        out.push_str(&edit.insert);
        cursor = end;
    }
    out.push_str(&source[cursor..]);
    out
}
