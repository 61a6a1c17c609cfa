//! Form template generation.
//!
//! A template is a complete form document whose `Caption` still holds
//! [`PLACEHOLDER`]. It can be previewed, edited, and renamed freely; the
//! final name is only filled in by the repair pass right before commit.

use std::fmt::Write as _;

use formtext_syntax::ast::quote;
use smol_str::SmolStr;
use tracing::info;

use crate::config::LayoutConfig;
use crate::controls::{synthesize, Layout};
use crate::error::FormError;
use crate::form::{FormKind, FormRequest};
use crate::guid;
use crate::ids::{IdSource, Identifier};
use crate::namemap::NameMap;
use crate::schema::{fields, SchemaSource};

/// Stands in for the form name until the document is committed.
pub const PLACEHOLDER: &str = "__FORM_NAME_PLACEHOLDER__";

/// Opens the template body inside [`Template::with_instructions`].
pub const BEGIN_MARKER: &str = "--- TEMPLATE BEGIN ---";

/// Closes the template body inside [`Template::with_instructions`].
pub const END_MARKER: &str = "--- TEMPLATE END ---";

const VERSION: i32 = 21;
const VERSION_REQUIRED: i32 = 20;
const PUBLISH_OPTION: i32 = 1;
const PICTURE_ALIGNMENT: i32 = 2;
const DATASHEET_GRIDLINES_BEHAVIOR: i32 = 3;
const GRID_Y: i32 = 10;

/// Document-level properties written before the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormHeader {
    /// Selects `DefaultView`.
    pub kind: FormKind,
    /// Table or query the form binds to.
    pub record_source: SmolStr,
    /// Form width in twips.
    pub width: u32,
    /// Placeholder `Checksum`; the host recomputes it on import.
    pub checksum: i64,
    /// Document-level identifier.
    pub guid: Identifier,
}

/// Joins header, NameMap and controls into one document.
///
/// The detail section's height comes from `layout`.
#[must_use]
pub fn assemble(header: &FormHeader, name_map: &NameMap, layout: &Layout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Version ={VERSION}");
    let _ = writeln!(out, "VersionRequired ={VERSION_REQUIRED}");
    let _ = writeln!(out, "PublishOption ={PUBLISH_OPTION}");
    let _ = writeln!(out, "Checksum ={}", header.checksum);
    out.push_str("Begin Form\n");
    let _ = writeln!(out, "    DefaultView ={}", header.kind.default_view());
    let _ = writeln!(out, "    Width ={}", header.width);
    let _ = writeln!(out, "    PictureAlignment ={PICTURE_ALIGNMENT}");
    let _ = writeln!(out, "    DatasheetGridlinesBehavior ={DATASHEET_GRIDLINES_BEHAVIOR}");
    let _ = writeln!(out, "    GridY ={GRID_Y}");
    let _ = writeln!(out, "    {}", guid::render_block(header.guid, "    ", "\n"));
    let _ = writeln!(out, "    {}", name_map.render("    ", "\n"));
    let _ = writeln!(out, "    RecordSource ={}", quote(&header.record_source));
    let _ = writeln!(out, "    Caption ={}", quote(PLACEHOLDER));
    out.push_str("    Begin\n");
    out.push_str("        Begin Section\n");
    let _ = writeln!(out, "            Height ={}", layout.section_height);
    out.push_str("            Name =\"Detail\"\n");
    out.push_str("            AutoHeight =-1\n");
    out.push_str("            Begin\n");
    layout.render("                ", &mut out);
    out.push_str("            End\n");
    out.push_str("        End\n");
    out.push_str("    End\n");
    out.push_str("End\n");
    out
}

/// A generated template and what it was generated for.
///
/// Callers hold on to this value and hand it to the commit step, instead
/// of the commit step guessing what was generated last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: FormKind,
    record_source: SmolStr,
    child_control: Option<SmolStr>,
    text: String,
}

impl Template {
    /// The form kind the template was generated for.
    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// The bound record source.
    #[must_use]
    pub fn record_source(&self) -> &str {
        &self.record_source
    }

    /// Name of the child link control, for main forms.
    #[must_use]
    pub fn child_control(&self) -> Option<&str> {
        self.child_control.as_deref()
    }

    /// The document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the template, returning the document text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// The document wrapped in operator instructions. [`strip_instructions`]
    /// recovers the document.
    #[must_use]
    pub fn with_instructions(&self) -> String {
        format!(
            "Template generated for record source {} ({} form).\n\
             IMPORTANT:\n\
             1. Replace '{PLACEHOLDER}' with the desired form name.\n\
             2. Review the template below. Layout properties (Left, Top, Width, Height) may be adjusted.\n\
             3. Pass the entire, final text to the repair step.\n\
             \n\
             {BEGIN_MARKER}\n\
             {}\
             {END_MARKER}\n",
            quote(&self.record_source),
            self.kind,
            self.text,
        )
    }
}

/// Returns the document between [`BEGIN_MARKER`] and [`END_MARKER`], or
/// `text` unchanged when either marker is missing.
#[must_use]
pub fn strip_instructions(text: &str) -> &str {
    let Some(begin) = text.find(BEGIN_MARKER) else {
        return text;
    };
    let body_start = begin + BEGIN_MARKER.len();
    let Some(end) = text[body_start..].find(END_MARKER) else {
        return text;
    };
    let body = &text[body_start..body_start + end];
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
}

/// Resolves the schema, lays out the controls, encodes the NameMap and
/// assembles the document. `request` was validated when it was built.
///
/// The NameMap covers the bound field names. The repair pass rebuilds it
/// from every named control before commit.
pub fn generate_template(
    request: &FormRequest,
    schema: &dyn SchemaSource,
    layout_config: &LayoutConfig,
    ids: &mut dyn IdSource,
) -> Result<Template, FormError> {
    let fields = fields(schema, request.record_source())?;
    let layout = synthesize(&fields, request, layout_config, ids)?;
    let name_map = NameMap::build(layout.field_names(), ids)?;
    let header = FormHeader {
        kind: request.kind(),
        record_source: SmolStr::new(request.record_source()),
        width: layout_config.form_width,
        checksum: ids.next_checksum(),
        guid: ids.next_id(),
    };
    let text = assemble(&header, &name_map, &layout);
    info!(
        record_source = request.record_source(),
        kind = %request.kind(),
        fields = fields.len(),
        "generated form template"
    );
    Ok(Template {
        kind: request.kind(),
        record_source: header.record_source,
        child_control: layout.child().map(|child| child.name.clone()),
        text,
    })
}
