//! Shared helpers for parser tree tests.
#![allow(dead_code)]

pub use formtext_syntax::parser::parse;
pub use formtext_syntax::syntax::{SyntaxKind, SyntaxNode};

/// Renders a parse result as an indented tree, skipping trivia tokens.
pub fn dump_parse(source: &str) -> String {
    let parsed = parse(source);
    let mut output = String::new();
    format_node(&parsed.syntax(), &mut output, 0);

    if !parsed.ok() {
        output.push_str("---\nErrors:\n");
        for err in parsed.errors() {
            output.push_str(&format!("  - {}\n", err));
        }
    }

    output
}

fn format_node(node: &SyntaxNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}{:?}@{:?}\n", indent, node.kind(), node.text_range()));

    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => format_node(&n, out, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                if !t.kind().is_trivia() {
                    out.push_str(&format!(
                        "{}{:?}@{:?} {:?}\n",
                        "  ".repeat(depth + 1),
                        t.kind(),
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }
    }
}

/// A small but complete form document.
pub const SAMPLE_FORM: &str = r#"Version =21
VersionRequired =20
Checksum =-1183462720
Begin Form
    DefaultView =0
    GUID = Begin
        0x0f1e2d3c4b5a69788796a5b4c3d2e1f0
    End
    NameMap = Begin
        0x0123456789abcdef0123456789abcdef02000000490044,
        0x000000000000000000000000000000000c000000050000000000000000000000000000000000
    End
    RecordSource ="Products"
    Caption ="__FORM_NAME_PLACEHOLDER__"
    Begin
        Begin Section
            Height =1100
            Name ="Detail"
            AutoHeight =-1
            Begin
                Begin TextBox
                    Top =200
                    Name ="ID"
                    ControlSource ="ID"
                    GUID = Begin
                        0xffeeddccbbaa99887766554433221100
                    End
                    Begin
                        Begin Label
                            Name ="ID_Label"
                            Caption ="ID"
                        End
                    End
                End
            End
        End
    End
End
"#;
