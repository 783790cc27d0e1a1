use csv::StringRecord;
use thiserror::Error;

use tap_csv_core::{CoercionError, ColumnManifest, Record};

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("column '{column}': {source}")]
    Coercion {
        column: String,
        #[source]
        source: CoercionError,
    },

    #[error("row has {found} fields but the header has {expected}")]
    Malformed { expected: usize, found: usize },
}

/// Whether a row carries no data: no fields at all, or only empty ones.
pub fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(str::is_empty)
}

/// Convert one data row into a record using the file's manifest.
///
/// Returns `Ok(None)` for blank rows. A row shorter than the manifest is malformed; fields past
/// the end of the manifest are ignored. Either every field converts or the row fails as a whole.
pub fn coerce_row(row: &StringRecord, manifest: &ColumnManifest) -> Result<Option<Record>, RowError> {
    if is_blank(row) {
        return Ok(None);
    }
    if row.len() < manifest.len() {
        return Err(RowError::Malformed {
            expected: manifest.len(),
            found: row.len(),
        });
    }

    let mut record = Record::with_capacity(manifest.len());
    for (column, raw) in manifest.iter().zip(row.iter()) {
        let value = column
            .column_type
            .coerce(raw)
            .map_err(|source| RowError::Coercion {
                column: column.name.clone(),
                source,
            })?;
        record.insert(column.name.clone(), value);
    }

    if record.is_empty() {
        return Ok(None);
    }
    Ok(Some(record))
}
