//! What kind of form to build, and what it binds to.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use tracing::warn;

use crate::error::FormError;

/// How the form will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormKind {
    /// Stand-alone, one record at a time.
    #[default]
    Single,
    /// Hosted inside another form, shown as a datasheet.
    Embedded,
    /// Hosts one linked child form below its fields.
    Main,
}

impl FormKind {
    /// The `DefaultView` property for this kind.
    #[must_use]
    pub const fn default_view(self) -> i32 {
        match self {
            Self::Embedded => 2,
            Self::Single | Self::Main => 0,
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Embedded => "embedded",
            Self::Main => "main",
        }
    }
}

impl FromStr for FormKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "embedded" | "subform" => Ok(Self::Embedded),
            "main" => Ok(Self::Main),
            _ => Err(FormError::InvalidFormKind(s.to_string())),
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The child form a main form hosts, and how records are linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildLink {
    /// Object reference of the child form, e.g. `Form.OrderLines`.
    pub source_object: SmolStr,
    /// Field on the main form's record source.
    pub link_master_field: SmolStr,
    /// Field on the child form's record source.
    pub link_child_field: SmolStr,
}

impl ChildLink {
    /// Builds a link, rejecting missing or blank parts.
    pub fn new(
        source_object: Option<&str>,
        link_master_field: Option<&str>,
        link_child_field: Option<&str>,
    ) -> Result<Self, FormError> {
        Ok(Self {
            source_object: required("child_object", source_object)?,
            link_master_field: required("link_master_field", link_master_field)?,
            link_child_field: required("link_child_field", link_child_field)?,
        })
    }

    /// Name of the control hosting the child form: the source object
    /// without its `Form.` prefix.
    #[must_use]
    pub fn control_name(&self) -> &str {
        self.source_object
            .strip_prefix("Form.")
            .unwrap_or(&self.source_object)
    }
}

fn required(argument: &'static str, value: Option<&str>) -> Result<SmolStr, FormError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(SmolStr::new(value)),
        _ => Err(FormError::MissingArgument(argument)),
    }
}

/// A validated request to generate a form template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    kind: FormKind,
    record_source: SmolStr,
    child: Option<ChildLink>,
}

impl FormRequest {
    /// Validates a request before any generation work starts.
    ///
    /// A [`FormKind::Main`] request needs all three link arguments; other
    /// kinds ignore them.
    pub fn new(
        record_source: &str,
        kind: FormKind,
        child_object: Option<&str>,
        link_master_field: Option<&str>,
        link_child_field: Option<&str>,
    ) -> Result<Self, FormError> {
        let record_source = required("record_source", Some(record_source))?;
        let child = match kind {
            FormKind::Main => Some(ChildLink::new(
                child_object,
                link_master_field,
                link_child_field,
            )?),
            FormKind::Single | FormKind::Embedded => {
                if child_object.is_some() || link_master_field.is_some() || link_child_field.is_some()
                {
                    warn!(%kind, "ignoring child form arguments");
                }
                None
            }
        };
        Ok(Self {
            kind,
            record_source,
            child,
        })
    }

    /// A request for a form of `kind` with no child link.
    ///
    /// Fails with [`FormError::MissingArgument`] for [`FormKind::Main`].
    pub fn simple(record_source: &str, kind: FormKind) -> Result<Self, FormError> {
        Self::new(record_source, kind, None, None, None)
    }

    /// A main form hosting `child`.
    pub fn main(record_source: &str, child: ChildLink) -> Result<Self, FormError> {
        Ok(Self {
            kind: FormKind::Main,
            record_source: required("record_source", Some(record_source))?,
            child: Some(child),
        })
    }

    /// The form kind.
    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// The table or query the form binds to.
    #[must_use]
    pub fn record_source(&self) -> &str {
        &self.record_source
    }

    /// The child link, present exactly for main forms.
    #[must_use]
    pub fn child(&self) -> Option<&ChildLink> {
        self.child.as_ref()
    }
}
