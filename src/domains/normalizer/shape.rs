//! Declarative field-mapping tables.
//!
//! Each tool describes its upstream payload once, as a `RecordShape` constant:
//! which output keys exist, where each one is read from, what it falls back
//! to, and how the summary line is laid out.

use serde_json::Value;

use super::display::NOT_AVAILABLE;

/// Value substituted when a field is absent, null, or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The string `"N/A"`.
    NotAvailable,
    /// The number `0`.
    Zero,
    /// The empty string.
    Empty,
    /// JSON `null`.
    Null,
    /// An empty JSON array.
    EmptyList,
}

impl Fallback {
    /// The JSON value this fallback stands for.
    pub fn value(self) -> Value {
        match self {
            Self::NotAvailable => Value::String(NOT_AVAILABLE.to_string()),
            Self::Zero => Value::from(0),
            Self::Empty => Value::String(String::new()),
            Self::Null => Value::Null,
            Self::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Where a field's value comes from in the upstream payload.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// A key path into nested objects, copied as-is (`&["map", "name_en"]`).
    Path(&'static [&'static str]),

    /// The first path holding a non-empty value.
    FirstOf(&'static [&'static [&'static str]]),

    /// A list of sub-records rendered as a comma-joined list of names.
    ///
    /// Each sub-record contributes the first non-empty field of `names`,
    /// or `"Unknown"` when it has none.
    NameList {
        list: &'static str,
        names: &'static [&'static str],
    },

    /// Labels of the listed keys whose values are truthy, comma-joined.
    Flags(&'static [(&'static str, &'static str)]),

    /// A truthy value rendered with a unit suffix (`"120"` -> `"120 pt"`).
    Suffixed {
        path: &'static [&'static str],
        suffix: &'static str,
    },

    /// Text rendered from previously extracted fields and shape variables.
    Template(&'static str),
}

/// One output field of a record.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Output key in the normalized record.
    pub key: &'static str,
    /// Where the value is read from.
    pub source: Source,
    /// Value used when the source yields nothing.
    pub fallback: Fallback,
}

impl Field {
    /// A field read from a key path.
    pub const fn at(key: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            key,
            source: Source::Path(path),
            fallback: Fallback::NotAvailable,
        }
    }

    /// A field read from an arbitrary source.
    pub const fn new(key: &'static str, source: Source) -> Self {
        Self {
            key,
            source,
            fallback: Fallback::NotAvailable,
        }
    }

    /// Override the fallback.
    pub const fn or(self, fallback: Fallback) -> Self {
        Self {
            key: self.key,
            source: self.source,
            fallback,
        }
    }
}

/// Field table plus summary-line layout for one upstream record type.
#[derive(Debug, Clone, Copy)]
pub struct RecordShape {
    /// Human-readable record kind, used in logs.
    pub kind: &'static str,
    /// Output fields, in output order. Templates may refer to earlier fields.
    pub fields: &'static [Field],
    /// Summary line template with `{key}` placeholders.
    pub line: &'static str,
}
