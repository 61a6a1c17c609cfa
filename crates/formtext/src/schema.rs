//! Record source introspection.

#![allow(missing_docs)]

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::FormError;

/// One bound field: its column name and position in the record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: SmolStr,
    pub ordinal: usize,
}

/// Lists the columns of a table or saved query, in source order.
pub trait SchemaSource {
    fn columns(&self, record_source: &str) -> Result<Vec<SmolStr>, FormError>;
}

/// Resolves `record_source` into ordered field descriptors. An unknown
/// source or one without columns fails with
/// [`FormError::SchemaResolution`].
pub fn fields(
    schema: &dyn SchemaSource,
    record_source: &str,
) -> Result<Vec<FieldDescriptor>, FormError> {
    let columns = schema.columns(record_source)?;
    if columns.is_empty() {
        return Err(FormError::schema(record_source, "record source has no columns"));
    }
    Ok(columns
        .into_iter()
        .enumerate()
        .map(|(ordinal, name)| FieldDescriptor { name, ordinal })
        .collect())
}

/// Column lists held in memory, keyed by record source name.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    sources: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl SchemaCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record source.
    pub fn insert<I, S>(&mut self, record_source: &str, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sources.insert(
            SmolStr::new(record_source),
            columns.into_iter().map(|c| SmolStr::new(c.as_ref())).collect(),
        );
    }

    /// Builder form of [`SchemaCatalog::insert`].
    #[must_use]
    pub fn with_source<I, S>(mut self, record_source: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert(record_source, columns);
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| FormError::io(path, err))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, FormError> {
        let raw: SchemaToml = toml::from_str(text)
            .map_err(|err| FormError::InvalidConfig(format!("schema: {err}").into()))?;
        let mut catalog = Self::new();
        for (name, section) in raw.sources {
            catalog.insert(&name, section.columns);
        }
        Ok(catalog)
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(SmolStr::as_str)
    }
}

impl SchemaSource for SchemaCatalog {
    fn columns(&self, record_source: &str) -> Result<Vec<SmolStr>, FormError> {
        self.sources
            .get(record_source)
            .cloned()
            .ok_or_else(|| FormError::schema(record_source, "record source not found"))
    }
}

#[derive(Debug, Deserialize)]
struct SchemaToml {
    #[serde(default)]
    sources: IndexMap<String, SourceSection>,
}

#[derive(Debug, Deserialize)]
struct SourceSection {
    #[serde(default)]
    columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_carry_ordinals_in_column_order() {
        let catalog = SchemaCatalog::new().with_source("People", ["ID", "Name", "Age"]);
        let fields = fields(&catalog, "People").unwrap();
        let pairs: Vec<_> = fields.iter().map(|f| (f.name.as_str(), f.ordinal)).collect();
        assert_eq!(pairs, vec![("ID", 0), ("Name", 1), ("Age", 2)]);
    }

    #[test]
    fn unknown_and_empty_sources_fail() {
        let catalog = SchemaCatalog::new().with_source("Empty", Vec::<&str>::new());
        assert!(matches!(
            fields(&catalog, "Missing"),
            Err(FormError::SchemaResolution { source_name, .. }) if source_name == "Missing"
        ));
        assert!(matches!(
            fields(&catalog, "Empty"),
            Err(FormError::SchemaResolution { .. })
        ));
    }

    #[test]
    fn loads_from_toml() {
        let catalog = SchemaCatalog::from_toml_str(
            r#"
[sources.Products]
columns = ["ProductID", "ProductName"]

[sources."Order Details"]
columns = ["OrderID"]
"#,
        )
        .unwrap();
        assert_eq!(
            catalog.sources().collect::<Vec<_>>(),
            vec!["Products", "Order Details"]
        );
        assert_eq!(catalog.columns("Order Details").unwrap(), vec!["OrderID"]);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            SchemaCatalog::from_toml_str("[sources.X]\ncolumns = 3\n"),
            Err(FormError::InvalidConfig(_))
        ));
    }
}
