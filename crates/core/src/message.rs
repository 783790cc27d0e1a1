use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{ColumnManifest, ColumnType, Record};

/// JSON-schema fragment describing one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Object schema for an entity, properties in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: IndexMap<String, PropertySchema>,
}

impl Schema {
    pub fn from_manifest(manifest: &ColumnManifest) -> Self {
        let properties = manifest
            .iter()
            .map(|col| {
                (
                    col.name.clone(),
                    PropertySchema {
                        column_type: col.column_type,
                    },
                )
            })
            .collect();
        Self {
            schema_type: "object".to_string(),
            properties,
        }
    }
}

/// One line of the output stream.
///
/// Serialized as a JSON object tagged by `"type"`; every stream emits a `Schema` before any of
/// its `Record`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    Schema {
        stream: String,
        schema: Schema,
        key_properties: Vec<String>,
    },
    Record {
        stream: String,
        record: Record,
    },
    State {
        value: Value,
    },
}

impl Message {
    /// Serialize to a single JSON line (no trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
