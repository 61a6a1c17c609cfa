//! The repair pass.
//!
//! Turns a candidate document (a generated template, a hand-edited copy,
//! or anything produced elsewhere) into one the host will import:
//!
//! 1. the form name placeholder is replaced with the final name,
//! 2. every `Name ="..."` line is collected, duplicates collapsed,
//! 3. an empty name set is an error,
//! 4. every `NameMap` block is replaced with one regenerated from the names,
//! 5. every malformed `GUID` block gets a fresh value.
//!
//! Everything else in the document is copied through untouched.

use formtext_syntax::ast::{BinaryProperty, Block};
use formtext_syntax::edit::{apply_edits, TextEdit};
use formtext_syntax::lines::{line_ending, line_indent, name_lines};
use formtext_syntax::parser::parse;
use formtext_syntax::{SyntaxKind, SyntaxNode};
use indexmap::IndexSet;
use smol_str::SmolStr;
use tracing::{debug, info, warn};

use crate::error::FormError;
use crate::guid::identifier_edits;
use crate::ids::IdSource;
use crate::namemap::NameMap;
use crate::template::PLACEHOLDER;

/// Key of the NameMap block.
pub const NAMEMAP_KEY: &str = "NameMap";

/// What a repair pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Unique control names in first-seen order; the NameMap entries.
    pub control_names: Vec<SmolStr>,
    /// Existing NameMap blocks replaced with the regenerated map.
    pub namemap_blocks_replaced: usize,
    /// Set when no NameMap block existed and one was inserted.
    pub namemap_inserted: bool,
    /// Malformed or unterminated `GUID` blocks given a fresh value.
    pub identifiers_replaced: usize,
    /// Set when the form name placeholder was present.
    pub placeholder_substituted: bool,
    /// Structural problems found in the input. Never fatal.
    pub diagnostics: Vec<String>,
}

impl RepairReport {
    /// Returns `true` if the output carries the regenerated NameMap. This
    /// is `false` only for documents with neither a NameMap nor a
    /// `Begin Form` block.
    #[must_use]
    pub fn namemap_written(&self) -> bool {
        self.namemap_inserted || self.namemap_blocks_replaced > 0
    }
}

/// A repaired document and what was done to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    /// The document, ready to commit.
    pub text: String,
    /// What changed.
    pub report: RepairReport,
}

/// Runs the repair pass over `candidate`, naming the form `final_name`.
///
/// Fails with [`FormError::EmptyControlSet`] when the document has no
/// named controls and with [`FormError::InvalidControlName`] when a name
/// does not fit a NameMap record; no text is produced in either case.
pub fn repair(
    candidate: &str,
    final_name: &str,
    ids: &mut dyn IdSource,
) -> Result<Repaired, FormError> {
    let mut report = RepairReport::default();

    let text = if candidate.contains(PLACEHOLDER) {
        report.placeholder_substituted = true;
        candidate.replace(PLACEHOLDER, final_name)
    } else {
        candidate.to_string()
    };

    let names: IndexSet<SmolStr> = name_lines(&text).into_iter().map(|line| line.value).collect();
    if names.is_empty() {
        return Err(FormError::EmptyControlSet);
    }
    let name_map = NameMap::build(names.iter().map(SmolStr::as_str), ids)?;
    report.control_names = names.into_iter().collect();

    let parsed = parse(&text);
    for error in parsed.errors() {
        warn!(%error, "form text diagnostic");
        report.diagnostics.push(error.to_string());
    }
    let root = parsed.syntax();

    let mut edits = namemap_edits(&text, &root, &name_map);
    report.namemap_blocks_replaced = edits.len();
    if edits.is_empty() {
        match namemap_insertion(&text, &root, &name_map) {
            Some(edit) => {
                report.namemap_inserted = true;
                edits.push(edit);
            }
            None => warn!("no NameMap block and no Begin Form line; NameMap not written"),
        }
    }

    let guid_edits = identifier_edits(&text, &root, ids);
    report.identifiers_replaced = guid_edits.len();
    edits.extend(guid_edits);

    let text = apply_edits(&text, edits);
    info!(
        form = final_name,
        controls = report.control_names.len(),
        namemaps = report.namemap_blocks_replaced,
        inserted = report.namemap_inserted,
        identifiers = report.identifiers_replaced,
        diagnostics = report.diagnostics.len(),
        "repaired form text"
    );
    Ok(Repaired { text, report })
}

fn namemap_edits(source: &str, root: &SyntaxNode, name_map: &NameMap) -> Vec<TextEdit> {
    let eol = line_ending(source);
    root.descendants()
        .filter_map(BinaryProperty::cast)
        .filter(|block| block.key_text().as_deref() == Some(NAMEMAP_KEY))
        .map(|block| {
            let range = block.full_range();
            debug!(
                offset = u32::from(range.start()),
                terminated = block.is_terminated(),
                "replacing NameMap block"
            );
            TextEdit::replace(
                range,
                name_map.render(line_indent(source, range.start()), eol),
            )
        })
        .collect()
}

/// Inserts the map as the first line inside the first `Begin Form` block,
/// directly after the `Form` keyword so no other edit can overlap it.
fn namemap_insertion(source: &str, root: &SyntaxNode, name_map: &NameMap) -> Option<TextEdit> {
    let form = root
        .descendants()
        .filter_map(Block::cast)
        .find(|block| block.kind_name().as_deref() == Some("Form"))?;
    let tokens: Vec<_> = form
        .syntax()
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .collect();
    let begin = tokens.iter().find(|token| token.kind() == SyntaxKind::KwBegin)?;
    let kind = tokens.iter().find(|token| token.kind() == SyntaxKind::Ident)?;
    let indent = format!("{}    ", line_indent(source, begin.text_range().start()));
    let eol = line_ending(source);
    let edit = TextEdit::insert(
        kind.text_range().end(),
        format!("{eol}{indent}{}", name_map.render(&indent, eol)),
    );
    debug!(offset = u32::from(edit.range.start()), "inserting NameMap block");
    Some(edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::namemap::TERMINATOR;

    fn namemap_records(text: &str) -> Vec<String> {
        let start = text.find("NameMap = Begin").expect("namemap present") + "NameMap = Begin".len();
        let end = start + text[start..].find("End").expect("namemap end");
        text[start..end]
            .split(',')
            .map(|record| record.trim().to_string())
            .collect()
    }

    #[test]
    fn duplicate_names_collapse() {
        let source = "Begin Form\n    NameMap = Begin\n        0xdead\n    End\n    Begin\n        Name = \"Foo\"\n        Name = \"Bar\"\n        Name = \"Foo\"\n    End\nEnd\n";
        let repaired = repair(source, "Orders", &mut SequentialIds::starting_at(1)).unwrap();
        assert_eq!(repaired.report.control_names, vec!["Foo", "Bar"]);
        assert_eq!(repaired.report.namemap_blocks_replaced, 1);
        let records = namemap_records(&repaired.text);
        assert_eq!(records.len(), 3);
        assert!(records[0].ends_with("0300000046006f006f00"));
        assert!(records[1].ends_with("03000000420061007200"));
        assert_eq!(records[2], TERMINATOR);
        assert!(!repaired.text.contains("0xdead"));
    }

    #[test]
    fn no_names_is_an_error() {
        let source = "Begin Form\n    Caption =\"x\"\nEnd\n";
        assert!(matches!(
            repair(source, "Orders", &mut SequentialIds::default()),
            Err(FormError::EmptyControlSet)
        ));
    }

    #[test]
    fn placeholder_becomes_final_name() {
        let source = format!("Begin Form\n    Caption =\"{PLACEHOLDER}\"\n    Name =\"A\"\nEnd\n");
        let repaired = repair(&source, "Orders", &mut SequentialIds::default()).unwrap();
        assert!(repaired.report.placeholder_substituted);
        assert!(repaired.text.contains("Caption =\"Orders\""));
        assert!(!repaired.text.contains(PLACEHOLDER));
    }

    #[test]
    fn missing_namemap_is_inserted_after_form_header() {
        let source = "Version =21\nBegin Form\n    Width =100\n    Name =\"A\"\nEnd\n";
        let repaired = repair(source, "F", &mut SequentialIds::starting_at(0xa)).unwrap();
        assert!(repaired.report.namemap_inserted);
        assert_eq!(
            repaired.text,
            format!(
                "Version =21\nBegin Form\n    NameMap = Begin\n        0x0000000000000000000000000000000a010000004100,\n        {TERMINATOR}\n    End\n    Width =100\n    Name =\"A\"\nEnd\n"
            )
        );
    }

    #[test]
    fn no_form_block_passes_text_through() {
        let source = "Begin Label\n    Name =\"A\"\nEnd\n";
        let repaired = repair(source, "F", &mut SequentialIds::default()).unwrap();
        assert!(!repaired.report.namemap_written());
        assert_eq!(repaired.text, source);
    }

    #[test]
    fn unterminated_namemap_is_closed() {
        let source = "Begin Form\n    NameMap = Begin\n        0x01,\n        0x02\n    Name =\"A\"\nEnd\n";
        let repaired = repair(source, "F", &mut SequentialIds::default()).unwrap();
        assert_eq!(repaired.report.namemap_blocks_replaced, 1);
        assert!(!repaired.report.diagnostics.is_empty());
        assert!(parse(&repaired.text).ok());
        assert!(repaired.text.ends_with(&format!("        {TERMINATOR}\n    End\n    Name =\"A\"\nEnd\n")));
    }

    #[test]
    fn overlong_names_fail_before_rewriting() {
        let source = format!("Begin Form\n    Name =\"{}\"\nEnd\n", "n".repeat(256));
        assert!(matches!(
            repair(&source, "F", &mut SequentialIds::default()),
            Err(FormError::InvalidControlName { .. })
        ));
    }

    #[test]
    fn out_of_grammar_text_passes_through() {
        let source = "Begin Form\n    NameMap = Begin\n    End\n    ??? stray text\n    Name =\"A\"\n    Weird = stuff here\nEnd\n";
        let repaired = repair(source, "F", &mut SequentialIds::default()).unwrap();
        assert!(repaired.text.contains("\n    ??? stray text\n    Name =\"A\"\n    Weird = stuff here\nEnd\n"));
    }

    fn bare_line_feeds(text: &str) -> usize {
        text.match_indices('\n')
            .filter(|(index, _)| *index == 0 || text.as_bytes()[index - 1] != b'\r')
            .count()
    }

    #[test]
    fn crlf_documents_stay_crlf() {
        let source = "Version =21\r\nBegin Form\r\n    NameMap = Begin\r\n        0xdead\r\n    End\r\n    GUID = Begin\r\n        0xzz\r\n    End\r\n    Name =\"A\"\r\nEnd\r\n";
        let repaired = repair(source, "F", &mut SequentialIds::starting_at(1)).unwrap();
        assert_eq!(repaired.report.namemap_blocks_replaced, 1);
        assert_eq!(repaired.report.identifiers_replaced, 1);
        assert_eq!(bare_line_feeds(&repaired.text), 0);
        assert!(repaired.text.contains("        0x00000000000000000000000000000002\r\n    End\r\n"));
    }

    #[test]
    fn crlf_insertion_stays_crlf() {
        let source = "Begin Form\r\n    GUID = Begin\r\n        0x12\r\n    Name =\"A\"\r\nEnd\r\n";
        let repaired = repair(source, "F", &mut SequentialIds::default()).unwrap();
        assert!(repaired.report.namemap_inserted);
        assert_eq!(repaired.report.identifiers_replaced, 1);
        assert_eq!(bare_line_feeds(&repaired.text), 0);
        assert!(parse(&repaired.text).ok());
    }
}
