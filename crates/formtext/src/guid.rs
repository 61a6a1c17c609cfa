//! `GUID = Begin 0x... End` identifier blocks.

use formtext_syntax::ast::BinaryProperty;
use formtext_syntax::edit::{apply_edits, TextEdit};
use formtext_syntax::lines::{line_ending, line_indent};
use formtext_syntax::parser::parse;
use formtext_syntax::SyntaxNode;
use tracing::debug;

use crate::ids::{IdSource, Identifier};

/// Key of identifier blocks.
pub const GUID_KEY: &str = "GUID";

/// Returns `true` if `content` holds one well-formed 128-bit identifier:
/// an optional `0x` prefix followed by exactly 32 hex digits of either
/// case. Surrounding whitespace and line breaks are ignored.
#[must_use]
pub fn is_valid_identifier(content: &str) -> bool {
    let trimmed = content.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    digits.len() == Identifier::HEX_LEN && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}

/// Renders a complete identifier block whose key sits at `indent`, with
/// lines broken by `eol`. The first line is not indented.
#[must_use]
pub fn render_block(id: Identifier, indent: &str, eol: &str) -> String {
    format!("{GUID_KEY} = Begin{eol}{indent}    0x{id}{eol}{indent}End")
}

/// Computes the edits that replace every malformed identifier block under
/// `root`. Well-formed blocks produce no edit.
pub fn identifier_edits(source: &str, root: &SyntaxNode, ids: &mut dyn IdSource) -> Vec<TextEdit> {
    let eol = line_ending(source);
    let mut edits = Vec::new();
    for block in root.descendants().filter_map(BinaryProperty::cast) {
        if block.key_text().as_deref() != Some(GUID_KEY) {
            continue;
        }
        let full = block.full_range();
        let indent = line_indent(source, full.start());
        if block.is_terminated() {
            let content = &source[block.content_range()];
            if is_valid_identifier(content) {
                continue;
            }
            debug!(
                offset = u32::from(full.start()),
                content = content.trim(),
                "replacing malformed identifier"
            );
            let fresh = ids.next_id();
            edits.push(TextEdit::replace(
                block.content_range(),
                format!("{eol}{indent}    0x{fresh}{eol}{indent}"),
            ));
        } else {
            debug!(offset = u32::from(full.start()), "closing unterminated identifier block");
            edits.push(TextEdit::replace(full, render_block(ids.next_id(), indent, eol)));
        }
    }
    edits
}

/// Replaces every malformed identifier block in `source` with a fresh
/// value. Returns the new text and the number of blocks replaced.
///
/// Running this on its own output changes nothing.
#[must_use]
pub fn repair_identifiers(source: &str, ids: &mut dyn IdSource) -> (String, usize) {
    let parsed = parse(source);
    let edits = identifier_edits(source, &parsed.syntax(), ids);
    let count = edits.len();
    (apply_edits(source, edits), count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    const VALID: &str = "0x0123456789ABCDEFabcdef0123456789";

    #[test]
    fn validation_predicate() {
        assert!(is_valid_identifier(VALID));
        assert!(is_valid_identifier(&VALID[2..]));
        assert!(is_valid_identifier("\n        0X0123456789abcdef0123456789ABCDEF\n    "));
        assert!(!is_valid_identifier("0x0123"));
        assert!(!is_valid_identifier("0x0123456789abcdef0123456789abcdeg"));
        assert!(!is_valid_identifier("0x0123456789abcdef0123456789abcdef00"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn valid_blocks_are_untouched() {
        let source = format!("Begin Label\n    GUID = Begin\n        {VALID}\n    End\nEnd\n");
        let mut ids = SequentialIds::default();
        let (out, count) = repair_identifiers(&source, &mut ids);
        assert_eq!(out, source);
        assert_eq!(count, 0);
    }

    #[test]
    fn malformed_block_is_replaced_in_place() {
        let source = "Begin Label\n    GUID = Begin\n        0xnothex\n    End\n    Name =\"x\"\nEnd\n";
        let mut ids = SequentialIds::starting_at(0xabc);
        let (out, count) = repair_identifiers(source, &mut ids);
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "Begin Label\n    GUID = Begin\n        0x00000000000000000000000000000abc\n    End\n    Name =\"x\"\nEnd\n"
        );
    }

    #[test]
    fn unterminated_block_gets_an_end() {
        let source = "Begin Label\n    GUID = Begin\n        0x12\n    Name =\"x\"\nEnd\n";
        let mut ids = SequentialIds::starting_at(1);
        let (out, count) = repair_identifiers(source, &mut ids);
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "Begin Label\n    GUID = Begin\n        0x00000000000000000000000000000001\n    End\n    Name =\"x\"\nEnd\n"
        );
        assert!(parse(&out).ok());
    }

    #[test]
    fn scan_is_idempotent() {
        let source = "GUID = Begin\nEnd\nBegin Form\n  GUID = Begin\n    0x1\n  End\n  GUID = Begin\n";
        let mut ids = SequentialIds::default();
        let (once, first) = repair_identifiers(source, &mut ids);
        let (twice, second) = repair_identifiers(&once, &mut ids);
        assert_eq!(first, 3);
        assert_eq!(second, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn other_binary_properties_are_ignored() {
        let source = "NameMap = Begin\n    0x12\nEnd\n";
        let mut ids = SequentialIds::default();
        assert_eq!(repair_identifiers(source, &mut ids), (source.to_string(), 0));
    }
}
