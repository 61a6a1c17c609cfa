//! `formtext` - Self-healing generator and repair pass for saved-as-text forms.
//!
//! The desktop database host imports forms from a plain-text format with a
//! binary lookup table (the NameMap) and 128-bit `GUID` blocks embedded in
//! it. Its own parser is unforgiving and undocumented, so this crate never
//! trusts either structure: it generates templates from a record source
//! and, before every commit, rebuilds them from the control names actually
//! present in the document.
//!
//! - [`template`]: record source → editable template with a name placeholder
//! - [`repair`]: candidate text + final name → importable document
//! - [`commit`]: hands finished documents to the host, one at a time
//!
//! # Example
//!
//! ```
//! use formtext::config::LayoutConfig;
//! use formtext::form::{FormKind, FormRequest};
//! use formtext::ids::RandomIds;
//! use formtext::repair::repair;
//! use formtext::schema::SchemaCatalog;
//! use formtext::template::generate_template;
//!
//! let schema = SchemaCatalog::new().with_source("Products", ["ProductID", "ProductName"]);
//! let request = FormRequest::simple("Products", FormKind::Single)?;
//! let template = generate_template(&request, &schema, &LayoutConfig::default(), &mut RandomIds)?;
//!
//! let repaired = repair(template.text(), "ProductsForm", &mut RandomIds)?;
//! assert_eq!(repaired.report.control_names.len(), 5);
//! assert!(repaired.text.contains("Caption =\"ProductsForm\""));
//! # Ok::<(), formtext::FormError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Handing finished documents to the host.
pub mod commit;
/// `formtext.toml` configuration.
pub mod config;
/// Control blocks and layout.
pub mod controls;
/// Error types.
pub mod error;
/// Form kinds and validated generation requests.
pub mod form;
/// Identifier blocks.
pub mod guid;
/// Identifiers and their sources.
pub mod ids;
/// NameMap encoding.
pub mod namemap;
/// The repair pass.
pub mod repair;
/// Record source introspection.
pub mod schema;
/// Template generation.
pub mod template;

pub use error::FormError;
pub use ids::{IdSource, Identifier, RandomIds, SequentialIds};
pub use repair::{repair, RepairReport, Repaired};
pub use template::{generate_template, Template, PLACEHOLDER};
