use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::CoercionError;

/// A single output record: column name to typed value, in header order.
pub type Record = IndexMap<String, FieldValue>;

/// Declared type of a CSV column. Every column is `String` unless overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Integer,
    Number,
}

impl ColumnType {
    /// Name used in config files and schema declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Number => "number",
        }
    }

    /// Convert raw field text into a value of this type.
    ///
    /// Numeric types ignore surrounding whitespace. Integers are 128-bit so unsigned 64-bit ids
    /// fit. Strings are passed through untouched.
    pub fn coerce(&self, raw: &str) -> Result<FieldValue, CoercionError> {
        match self {
            ColumnType::String => Ok(FieldValue::Text(raw.to_string())),
            ColumnType::Integer => raw
                .trim()
                .parse::<i128>()
                .map(FieldValue::Integer)
                .map_err(|_| CoercionError::new(raw, *self)),
            ColumnType::Number => match raw.trim().parse::<f64>() {
                // JSON has no representation for NaN or infinities
                Ok(v) if v.is_finite() => Ok(FieldValue::Number(v)),
                _ => Err(CoercionError::new(raw, *self)),
            },
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed field values. All source data arrives as text; the manifest decides the variant.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i128),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Extract as string, returning None for numeric values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

// Untagged derive buffers values and cannot hand an i128 back out, so integers are read by hand.
impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an integer, a number or a string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
                Ok(FieldValue::Integer(v.into()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
                Ok(FieldValue::Integer(v.into()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<FieldValue, E> {
                Ok(FieldValue::Integer(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
                Ok(FieldValue::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v))
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// One position of a file's header: the column name and how its values are coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

/// Ordered column list derived from a single file's header row.
///
/// Position `i` describes field `i` of every data row in that file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnManifest {
    columns: Vec<Column>,
}

impl ColumnManifest {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a ColumnManifest {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
