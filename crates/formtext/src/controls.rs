//! Control blocks and the vertical stacking layout.
//!
//! Every field gets a `TextBox` editor with an attached `Label` on the same
//! row. Rows are stacked top to bottom in field order. A main form adds one
//! `Subform` control below the last row.

use std::fmt::Write as _;

use formtext_syntax::ast::quote;
use smol_str::SmolStr;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::FormError;
use crate::form::{ChildLink, FormRequest};
use crate::guid;
use crate::ids::{IdSource, Identifier};
use crate::schema::FieldDescriptor;

/// `OverlapFlags` value written on every control.
pub const OVERLAP_FLAGS: i32 = 85;

/// Suffix appended to a field name to name its label.
pub const LABEL_SUFFIX: &str = "_Label";

/// What a control is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Editor bound to one field.
    FieldEditor,
    /// Caption attached to an editor.
    Label,
    /// Host for a linked child form.
    ChildFormLink,
}

impl ControlKind {
    /// The block kind written after `Begin`.
    #[must_use]
    pub const fn block_kind(self) -> &'static str {
        match self {
            Self::FieldEditor => "TextBox",
            Self::Label => "Label",
            Self::ChildFormLink => "Subform",
        }
    }
}

/// Placement in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Distance from the left edge.
    pub left: u32,
    /// Distance from the top of the section.
    pub top: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// What a control shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// `ControlSource`: the bound field.
    Field(SmolStr),
    /// `Caption`: static text.
    Caption(SmolStr),
    /// `SourceObject` plus the linking field pair.
    Child(ChildLink),
}

/// One control, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBlock {
    /// What the control is.
    pub kind: ControlKind,
    /// The `Name` property.
    pub name: SmolStr,
    /// What the control shows.
    pub binding: Binding,
    /// Placement.
    pub position: Position,
    /// Labels take no part in tab order.
    pub tab_index: Option<usize>,
    /// Value of the control's `GUID` block.
    pub guid: Identifier,
    /// The label attached to an editor.
    pub label: Option<Box<ControlBlock>>,
}

impl ControlBlock {
    /// Appends the block to `out`, each line prefixed with `indent`.
    pub fn render(&self, indent: &str, out: &mut String) {
        let inner = format!("{indent}    ");
        let p = self.position;
        let _ = writeln!(out, "{indent}Begin {}", self.kind.block_kind());
        let _ = writeln!(out, "{inner}OverlapFlags ={OVERLAP_FLAGS}");
        let _ = writeln!(out, "{inner}Left ={}", p.left);
        let _ = writeln!(out, "{inner}Top ={}", p.top);
        let _ = writeln!(out, "{inner}Width ={}", p.width);
        let _ = writeln!(out, "{inner}Height ={}", p.height);
        if let Some(tab_index) = self.tab_index {
            let _ = writeln!(out, "{inner}TabIndex ={tab_index}");
        }
        let _ = writeln!(out, "{inner}Name ={}", quote(&self.name));
        match &self.binding {
            Binding::Field(field) => {
                let _ = writeln!(out, "{inner}ControlSource ={}", quote(field));
            }
            Binding::Caption(caption) => {
                let _ = writeln!(out, "{inner}Caption ={}", quote(caption));
            }
            Binding::Child(link) => {
                let _ = writeln!(out, "{inner}SourceObject ={}", quote(&link.source_object));
                let _ = writeln!(out, "{inner}LinkChildFields ={}", quote(&link.link_child_field));
                let _ = writeln!(out, "{inner}LinkMasterFields ={}", quote(&link.link_master_field));
            }
        }
        let _ = writeln!(out, "{inner}{}", guid::render_block(self.guid, &inner, "\n"));
        if let Some(label) = &self.label {
            let _ = writeln!(out, "{inner}Begin");
            label.render(&format!("{inner}    "), out);
            let _ = writeln!(out, "{inner}End");
        }
        let _ = writeln!(out, "{indent}End");
    }
}

/// Output of [`synthesize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Editors (labels attached) in field order, then the child link.
    pub controls: Vec<ControlBlock>,
    /// Vertical cursor after the last field row.
    pub next_top: u32,
    /// Height of the detail section holding the controls.
    pub section_height: u32,
}

impl Layout {
    /// Every control name in document order, attached labels included.
    pub fn control_names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().flat_map(|control| {
            std::iter::once(control.name.as_str())
                .chain(control.label.as_deref().map(|label| label.name.as_str()))
        })
    }

    /// Names of the bound field editors, in field order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.controls
            .iter()
            .filter(|control| control.kind == ControlKind::FieldEditor)
            .map(|control| control.name.as_str())
    }

    /// The child form link, if any.
    #[must_use]
    pub fn child(&self) -> Option<&ControlBlock> {
        self.controls
            .iter()
            .find(|control| control.kind == ControlKind::ChildFormLink)
    }

    /// Appends every control to `out`.
    pub fn render(&self, indent: &str, out: &mut String) {
        for control in &self.controls {
            control.render(indent, out);
        }
    }
}

/// Lays out one editor and label per field, plus the child link for main
/// forms. Fails with [`FormError::SchemaResolution`] when `fields` is empty.
pub fn synthesize(
    fields: &[FieldDescriptor],
    request: &FormRequest,
    layout: &LayoutConfig,
    ids: &mut dyn IdSource,
) -> Result<Layout, FormError> {
    if fields.is_empty() {
        return Err(FormError::schema(
            request.record_source(),
            "no resolvable fields",
        ));
    }

    let mut controls = Vec::with_capacity(fields.len() + 1);
    let mut top = layout.first_top;
    for field in fields {
        let editor_guid = ids.next_id();
        let label = ControlBlock {
            kind: ControlKind::Label,
            name: SmolStr::new(format!("{}{LABEL_SUFFIX}", field.name)),
            binding: Binding::Caption(field.name.clone()),
            position: Position {
                left: layout.label_left,
                top,
                width: layout.label_width,
                height: layout.control_height,
            },
            tab_index: None,
            guid: ids.next_id(),
            label: None,
        };
        controls.push(ControlBlock {
            kind: ControlKind::FieldEditor,
            name: field.name.clone(),
            binding: Binding::Field(field.name.clone()),
            position: Position {
                left: layout.editor_left,
                top,
                width: layout.editor_width,
                height: layout.control_height,
            },
            tab_index: Some(field.ordinal),
            guid: editor_guid,
            label: Some(Box::new(label)),
        });
        top = top.saturating_add(layout.row_step);
    }

    let margin = match request.child() {
        Some(link) => {
            controls.push(ControlBlock {
                kind: ControlKind::ChildFormLink,
                name: SmolStr::new(link.control_name()),
                binding: Binding::Child(link.clone()),
                position: Position {
                    left: layout.label_left,
                    top: top.saturating_add(layout.child_gap),
                    width: layout.child_width,
                    height: layout.child_height,
                },
                tab_index: Some(fields.len()),
                guid: ids.next_id(),
                label: None,
            });
            layout.child_section_margin
        }
        None => layout.section_margin,
    };

    debug!(
        record_source = request.record_source(),
        fields = fields.len(),
        child = request.child().is_some(),
        next_top = top,
        "synthesized controls"
    );
    Ok(Layout {
        controls,
        next_top: top,
        section_height: top.saturating_add(margin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormKind;
    use crate::ids::SequentialIds;
    use expect_test::expect;

    fn descriptors(names: &[&str]) -> Vec<FieldDescriptor> {
        names
            .iter()
            .enumerate()
            .map(|(ordinal, name)| FieldDescriptor {
                name: SmolStr::new(name),
                ordinal,
            })
            .collect()
    }

    #[test]
    fn single_form_rows_and_tab_order() {
        let request = FormRequest::simple("People", FormKind::Single).unwrap();
        let layout = synthesize(
            &descriptors(&["ID", "Name", "Age"]),
            &request,
            &LayoutConfig::default(),
            &mut SequentialIds::default(),
        )
        .unwrap();

        assert_eq!(layout.controls.len(), 3);
        assert!(layout.child().is_none());
        let rows: Vec<_> = layout
            .controls
            .iter()
            .map(|c| {
                let label = c.label.as_deref().unwrap();
                (c.tab_index, c.position.top, label.position.top, label.name.as_str())
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                (Some(0), 200, 200, "ID_Label"),
                (Some(1), 600, 600, "Name_Label"),
                (Some(2), 1000, 1000, "Age_Label"),
            ]
        );
        assert_eq!(layout.next_top, 1400);
        assert_eq!(layout.section_height, 1900);
    }

    #[test]
    fn main_form_appends_child_link() {
        let link = ChildLink::new(Some("Form.sub1"), Some("ProductID"), Some("ProductID")).unwrap();
        let request = FormRequest::main("Products", link).unwrap();
        let layout = synthesize(
            &descriptors(&["ProductID", "ProductName"]),
            &request,
            &LayoutConfig::default(),
            &mut SequentialIds::default(),
        )
        .unwrap();

        assert_eq!(layout.field_names().count(), 2);
        let child = layout.child().unwrap();
        assert_eq!(child.name, "sub1");
        assert_eq!(child.tab_index, Some(2));
        assert_eq!(child.position.top, 1200);
        match &child.binding {
            Binding::Child(link) => {
                assert_eq!(link.link_master_field, "ProductID");
                assert_eq!(link.link_child_field, "ProductID");
            }
            other => panic!("unexpected binding {other:?}"),
        }
        assert_eq!(layout.section_height, 1000 + 4500);
        assert_eq!(
            layout.control_names().collect::<Vec<_>>(),
            vec!["ProductID", "ProductID_Label", "ProductName", "ProductName_Label", "sub1"]
        );
    }

    #[test]
    fn no_fields_is_a_schema_error() {
        let request = FormRequest::simple("Empty", FormKind::Single).unwrap();
        let err = synthesize(&[], &request, &LayoutConfig::default(), &mut SequentialIds::default())
            .unwrap_err();
        assert!(matches!(err, FormError::SchemaResolution { .. }));
    }

    #[test]
    fn editor_rendering() {
        let request = FormRequest::simple("People", FormKind::Single).unwrap();
        let layout = synthesize(
            &descriptors(&["ID"]),
            &request,
            &LayoutConfig::default(),
            &mut SequentialIds::starting_at(1),
        )
        .unwrap();
        let mut out = String::new();
        layout.render("", &mut out);
        expect![[r#"
Begin TextBox
    OverlapFlags =85
    Left =2500
    Top =200
    Width =3000
    Height =315
    TabIndex =0
    Name ="ID"
    ControlSource ="ID"
    GUID = Begin
        0x00000000000000000000000000000001
    End
    Begin
        Begin Label
            OverlapFlags =85
            Left =500
            Top =200
            Width =1800
            Height =315
            Name ="ID_Label"
            Caption ="ID"
            GUID = Begin
                0x00000000000000000000000000000002
            End
        End
    End
End
"#]]
        .assert_eq(&out);
    }
}
