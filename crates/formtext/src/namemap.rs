//! NameMap encoding.
//!
//! A NameMap maps short binary identifiers to control names. Each record is
//! one hex blob:
//!
//! ```text
//! 0x <identifier: 32 hex> <length: 2 hex> 000000 <name: UTF-16LE hex>
//! ```
//!
//! Records are comma separated and the table always ends with the fixed
//! [`TERMINATOR`] record. Tables are never decoded or merged: every pass
//! regenerates the whole map from the current control names.

use std::fmt::Write as _;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::error::FormError;
use crate::ids::{IdSource, Identifier};

/// End-of-table record required after the last entry.
pub const TERMINATOR: &str =
    "0x000000000000000000000000000000000c000000050000000000000000000000000000000000";

/// Padding between the length byte and the encoded name.
const LENGTH_PAD: &str = "000000";

/// The length field is a single byte.
pub const MAX_NAME_UNITS: usize = u8::MAX as usize;

/// One NameMap record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMapEntry {
    identifier: Identifier,
    name: SmolStr,
    units: u8,
}

impl NameMapEntry {
    /// Creates an entry, rejecting names the length byte cannot describe.
    pub fn new(identifier: Identifier, name: &str) -> Result<Self, FormError> {
        let units = validate_name(name)?;
        Ok(Self {
            identifier,
            name: SmolStr::new(name),
            units,
        })
    }

    /// The entry's identifier.
    #[must_use]
    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// The control name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name length in UTF-16 code units.
    #[must_use]
    pub fn name_len(&self) -> u8 {
        self.units
    }

    /// Renders the record as `0x...` hex.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(2 + 32 + 2 + 6 + self.name.len() * 4);
        let _ = write!(out, "0x{}{:02x}{LENGTH_PAD}", self.identifier, self.units);
        for unit in self.name.encode_utf16() {
            for byte in unit.to_le_bytes() {
                let _ = write!(out, "{byte:02x}");
            }
        }
        out
    }
}

/// Checks that `name` fits a NameMap record and returns its length in
/// UTF-16 code units.
pub fn validate_name(name: &str) -> Result<u8, FormError> {
    if name.is_empty() {
        return Err(FormError::InvalidControlName {
            name: SmolStr::new(name),
            reason: "name is empty",
        });
    }
    let units = name.encode_utf16().count();
    u8::try_from(units).map_err(|_| FormError::InvalidControlName {
        name: SmolStr::new(name),
        reason: "name is longer than 255 UTF-16 code units",
    })
}

/// A complete NameMap: one entry per unique name, first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameMap {
    entries: Vec<NameMapEntry>,
}

impl NameMap {
    /// Builds a map from `names`, drawing a fresh identifier per entry.
    ///
    /// Duplicate names collapse onto their first occurrence. Every name is
    /// validated before any identifier is drawn.
    pub fn build<'a, I>(names: I, ids: &mut dyn IdSource) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: IndexSet<&str> = names.into_iter().collect();
        for name in &unique {
            validate_name(name)?;
        }
        let entries = unique
            .into_iter()
            .map(|name| NameMapEntry::new(ids.next_id(), name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// The entries, without the terminator.
    #[must_use]
    pub fn entries(&self) -> &[NameMapEntry] {
        &self.entries
    }

    /// Number of entries, without the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every record including the terminator, in table order.
    pub fn records(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(NameMapEntry::encode)
            .chain(std::iter::once(TERMINATOR.to_string()))
    }

    /// The comma-separated record list, one record per line, each line
    /// prefixed with `indent` and broken with `eol`.
    #[must_use]
    pub fn encode(&self, indent: &str, eol: &str) -> String {
        let separator = format!(",{eol}{indent}");
        let mut out = String::from(indent);
        out.push_str(&self.records().collect::<Vec<_>>().join(&separator));
        out
    }

    /// Renders the full `NameMap = Begin ... End` property. The first line
    /// is not indented; records sit one level deeper than `indent` and the
    /// closing `End` lines up with `indent`.
    #[must_use]
    pub fn render(&self, indent: &str, eol: &str) -> String {
        let inner = format!("{indent}    ");
        format!("NameMap = Begin{eol}{}{eol}{indent}End", self.encode(&inner, eol))
    }
}

/// Encodes `names` into a record list (see [`NameMap::encode`]).
pub fn encode_names<'a, I>(names: I, ids: &mut dyn IdSource) -> Result<String, FormError>
where
    I: IntoIterator<Item = &'a str>,
{
    Ok(NameMap::build(names, ids)?.encode("", "\n"))
}
