#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use formtext::commit::FormCommitter;
use formtext::FormError;
use formtext_syntax::ast::{BinaryProperty, Block};
use formtext_syntax::parser::parse;

/// A hand-edited document: stale NameMap, one broken and one unterminated
/// GUID, a duplicated control, an extra property, and stray text.
pub const EDITED_FORM: &str = r#"Version =21
VersionRequired =20
Begin Form
    DefaultView =0
    Width =11500
    GUID = Begin
        0x0123456789abcdef0123456789ABCDEF
    End
    NameMap = Begin
        0xstale,
        0x000000000000000000000000000000000c000000050000000000000000000000000000000000
    End
    RecordSource ="Products"
    Caption ="__FORM_NAME_PLACEHOLDER__"
    Begin
        Begin Section
            Height =1300
            Name ="Detail"
            Begin
                Begin TextBox
                    Top =200
                    Name ="ProductID"
                    ControlSource ="ProductID"
                    BackColor =16777215
                    GUID = Begin
                        0xnot-a-guid
                    End
                End
                Begin TextBox
                    Name = "ProductName"
                    GUID = Begin
                        0x12
                Begin Label
                    Name ="ProductID"
                End
                this line is not form text
            End
        End
    End
End
"#;

/// Records commits in memory.
#[derive(Debug, Default)]
pub struct RecordingCommitter {
    pub commits: Vec<(String, String)>,
}

impl FormCommitter for RecordingCommitter {
    fn commit(&mut self, form_name: &str, text: &str) -> Result<(), FormError> {
        self.commits.push((form_name.to_string(), text.to_string()));
        Ok(())
    }
}

/// Splits every `NameMap` block of `text` into its records.
pub fn namemap_records(text: &str) -> Vec<Vec<String>> {
    parse(text)
        .syntax()
        .descendants()
        .filter_map(BinaryProperty::cast)
        .filter(|block| block.key_text().as_deref() == Some("NameMap"))
        .map(|block| {
            block
                .content_text()
                .split(',')
                .map(|record| record.trim().to_string())
                .collect()
        })
        .collect()
}

/// Contents of every `GUID` block, trimmed.
pub fn guid_values(text: &str) -> Vec<String> {
    parse(text)
        .syntax()
        .descendants()
        .filter_map(BinaryProperty::cast)
        .filter(|block| block.key_text().as_deref() == Some("GUID"))
        .map(|block| block.content_text().trim().to_string())
        .collect()
}

/// Everything except NameMap and GUID contents, one line per entry:
/// `(depth, kind)` for blocks and `key =value` for properties.
pub fn layout_outline(text: &str) -> Vec<String> {
    let root = parse(text).syntax();
    let mut out = Vec::new();
    for block in root.descendants().filter_map(Block::cast) {
        let depth = block.syntax().ancestors().filter_map(Block::cast).count() - 1;
        out.push(format!(
            "{depth}:{}",
            block.kind_name().as_deref().unwrap_or("<group>")
        ));
        for property in block.properties() {
            out.push(format!(
                "{depth}:  {} ={}",
                property.key_text().as_deref().unwrap_or("?"),
                property.value_text()
            ));
        }
    }
    out
}

pub fn temp_dir(prefix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{}-{stamp}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
