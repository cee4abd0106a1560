//! Event and eVar attribute lists (`event1=4.99|event2`).

use crate::Span;
use crate::split::{ATTRIBUTE_SEPARATOR, KEY_VALUE_SEPARATOR, Piece};
use tracing::trace;

/// A single `key[=value]` entry of an event or eVar field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Attribute {
    /// Attribute key, e.g. `event1` or `eVar3`. Never empty.
    pub key: String,
    /// Value after the first `=`. `None` when the entry has no `=`.
    pub value: Option<String>,
    /// Source span of the whole entry.
    pub span: Span,
}

impl Attribute {
    /// The value, if present.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Parse an event or eVar field into its attributes.
///
/// Absent or empty input gives an empty list. Entries without `=` keep the
/// key with no value, and entries with an empty key are skipped. Never fails.
pub fn parse_attributes(field: Option<&str>) -> Vec<Attribute> {
    match field {
        Some(text) => attributes_in(Piece::root(text)),
        None => Vec::new(),
    }
}

pub(crate) fn attributes_in(field: Piece<'_>) -> Vec<Attribute> {
    if field.text.is_empty() {
        return Vec::new();
    }

    field
        .split(ATTRIBUTE_SEPARATOR)
        .filter_map(|entry| {
            let (key, value) = entry.split_once(KEY_VALUE_SEPARATOR);
            if key.text.is_empty() {
                trace!("Skipping attribute without key at {:?}", entry.span);
                return None;
            }
            Some(Attribute {
                key: key.text.to_string(),
                value: value.map(|v| v.text.to_string()),
                span: entry.span,
            })
        })
        .collect()
}
