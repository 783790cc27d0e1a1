use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::record::ColumnType;

/// Top-level keys every config file must carry.
pub const REQUIRED_CONFIG_KEYS: &[&str] = &["files"];

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

// ── Sources ───────────────────────────────────────────────────

/// One configured CSV source: a file or a directory of files, synced under one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// File or directory to read. Directories are scanned recursively.
    #[serde(rename = "file")]
    pub path: PathBuf,
    /// Stream name the records are emitted under.
    pub entity: String,
    /// Columns identifying a record within its entity (may be empty).
    pub keys: Vec<String>,
    /// Per-column type overrides; anything not listed is a string.
    #[serde(rename = "columns", default)]
    pub column_overrides: IndexMap<String, ColumnType>,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>, entity: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entity: entity.into(),
            keys: Vec::new(),
            column_overrides: IndexMap::new(),
        }
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_overrides.insert(name.into(), column_type);
        self
    }

    /// Declared type for a header column.
    pub fn column_type(&self, name: &str) -> ColumnType {
        self.column_overrides.get(name).copied().unwrap_or_default()
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapConfig {
    /// Sources, synced in this order.
    pub files: Vec<SourceSpec>,
}

impl TapConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_value(read_json(path)?)
    }

    /// Validate an already-parsed config document.
    ///
    /// Missing top-level keys are reported together before any entry is inspected.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        check_required_keys(&value, REQUIRED_CONFIG_KEYS)?;
        serde_json::from_value(value).map_err(ConfigError::Invalid)
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded ({} sources):", self.files.len());
        for source in &self.files {
            tracing::info!(
                "  {:<16} path={}, keys={:?}, overrides={}",
                source.entity,
                source.path.display(),
                source.keys,
                source.column_overrides.len()
            );
        }
    }
}

fn check_required_keys(value: &Value, required: &[&str]) -> Result<(), ConfigError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| value.get(*key).is_none())
        .map(|key| key.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingKeys(missing))
    }
}

// ── State ─────────────────────────────────────────────────────

/// Load the state document, or an empty object when no path is given.
///
/// State is opaque: it is written back unchanged after every file.
pub fn load_state(path: Option<&Path>) -> Result<Value, ConfigError> {
    match path {
        Some(p) => read_json(p),
        None => Ok(Value::Object(Default::default())),
    }
}

fn read_json(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
