//! Errors for form generation, repair, and commit.

#![allow(missing_docs)]

use std::path::PathBuf;

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised by the form pipeline.
///
/// Malformed identifier blocks are deliberately absent: they are corrected
/// in place and only counted in [`crate::repair::RepairReport`].
#[derive(Debug, Error)]
pub enum FormError {
    /// The record source is missing or exposes no columns.
    #[error("could not resolve schema for record source '{source_name}': {reason}")]
    SchemaResolution {
        source_name: SmolStr,
        reason: SmolStr,
    },

    /// The repair input contains no `Name ="..."` lines.
    #[error("no named controls found in the form text; nothing to build a NameMap from")]
    EmptyControlSet,

    /// The form kind is not one of `single`, `embedded`, `main`.
    #[error("invalid form kind '{0}' (expected 'single', 'embedded' or 'main')")]
    InvalidFormKind(String),

    /// A required argument for the requested form kind is missing.
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    /// A control name cannot be encoded in a NameMap entry.
    #[error("invalid control name '{name}': {reason}")]
    InvalidControlName { name: SmolStr, reason: &'static str },

    /// The target form name cannot be committed.
    #[error("invalid form name '{0}'")]
    InvalidFormName(String),

    /// Configuration file contents are invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(SmolStr),

    /// Filesystem failure while loading or committing.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FormError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(source_name: &str, reason: impl Into<SmolStr>) -> Self {
        Self::SchemaResolution {
            source_name: SmolStr::new(source_name),
            reason: reason.into(),
        }
    }
}
