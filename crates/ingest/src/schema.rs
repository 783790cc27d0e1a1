use std::collections::HashSet;

use csv::StringRecord;
use thiserror::Error;

use tap_csv_core::{Column, ColumnManifest, Schema, SourceSpec};

use crate::emitter::{EmitError, Emitter};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Derive the column manifest from a header row.
///
/// Each column takes its declared type from the source's overrides, defaulting to string.
/// Names are used verbatim; a name appearing twice is rejected.
pub fn build_manifest(header: &StringRecord, source: &SourceSpec) -> Result<ColumnManifest, SchemaError> {
    let mut seen = HashSet::with_capacity(header.len());
    let mut columns = Vec::with_capacity(header.len());

    for name in header {
        if !seen.insert(name) {
            return Err(SchemaError::DuplicateColumn(name.to_string()));
        }
        columns.push(Column {
            name: name.to_string(),
            column_type: source.column_type(name),
        });
    }

    Ok(ColumnManifest::new(columns))
}

/// Build the manifest and declare it as the entity's schema.
pub fn write_schema_from_header<E: Emitter + ?Sized>(
    emitter: &mut E,
    header: &StringRecord,
    source: &SourceSpec,
) -> Result<ColumnManifest, SchemaError> {
    let manifest = build_manifest(header, source)?;
    emitter.write_schema(&source.entity, Schema::from_manifest(&manifest), &source.keys)?;
    Ok(manifest)
}
