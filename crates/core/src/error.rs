use std::path::PathBuf;

use thiserror::Error;

use crate::record::ColumnType;

/// Raw field text that does not fit its declared column type.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert {value:?} to {expected}")]
pub struct CoercionError {
    pub value: String,
    pub expected: ColumnType,
}

impl CoercionError {
    pub fn new(value: &str, expected: ColumnType) -> Self {
        Self {
            value: value.to_string(),
            expected,
        }
    }
}

/// Failures while loading the configuration or state files. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config is missing required keys: {0:?}")]
    MissingKeys(Vec<String>),

    #[error("invalid config: {0}")]
    Invalid(#[source] serde_json::Error),
}
