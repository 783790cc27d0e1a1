use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::{debug, info};

use tap_csv_core::SourceSpec;

use crate::coerce::{coerce_row, RowError};
use crate::emitter::Emitter;
use crate::error::SyncError;
use crate::resolver::{is_csv, resolve};
use crate::schema::{write_schema_from_header, SchemaError};

/// What happened to a single candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Schema (if the file had a header), records and state were written.
    Synced { records: u64 },
    /// Not a `.csv` file; nothing was written.
    Skipped,
}

/// Stream one file through the emitter: schema from the header, one record per non-blank row
/// in file order, then the state.
///
/// The file is read incrementally and closed on every exit path. Any bad row aborts the file
/// with no checkpoint.
pub fn sync_file<E: Emitter + ?Sized>(
    source: &SourceSpec,
    path: &Path,
    state: &Value,
    emitter: &mut E,
) -> Result<FileOutcome, SyncError> {
    if !is_csv(path) {
        info!("Skipping non-csv file '{}'", path.display());
        return Ok(FileOutcome::Skipped);
    }

    info!(
        "Syncing entity '{}' from file: '{}'",
        source.entity,
        path.display()
    );

    let file = File::open(path).map_err(|e| SyncError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut rows = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file)
        .into_records();

    let mut records = 0u64;
    if let Some(header) = rows.next() {
        let header = header.map_err(|e| csv_error(path, e))?;
        let manifest =
            write_schema_from_header(emitter, &header, source).map_err(|e| match e {
                SchemaError::DuplicateColumn(column) => SyncError::DuplicateColumn {
                    path: path.to_path_buf(),
                    column,
                },
                SchemaError::Emit(e) => SyncError::Emit(e),
            })?;

        for row in rows {
            let row = row.map_err(|e| csv_error(path, e))?;
            let record = coerce_row(&row, &manifest).map_err(|e| row_error(path, &row, e))?;
            if let Some(record) = record {
                emitter.write_record(&source.entity, record)?;
                records += 1;
            }
        }
    }

    emitter.write_state(state)?;
    debug!(file = %path.display(), records, "file synced");
    Ok(FileOutcome::Synced { records })
}

/// Resolve a source and sync every file it expands to, in resolution order.
pub fn sync_source<E: Emitter + ?Sized>(
    source: &SourceSpec,
    state: &Value,
    emitter: &mut E,
) -> Result<(), SyncError> {
    for path in resolve(&source.path) {
        let path = path.map_err(|e| SyncError::Walk {
            path: source.path.clone(),
            source: e,
        })?;
        sync_file(source, &path, state, emitter)?;
    }
    Ok(())
}

fn csv_error(path: &Path, source: csv::Error) -> SyncError {
    SyncError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn row_error(path: &Path, row: &StringRecord, err: RowError) -> SyncError {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    match err {
        RowError::Coercion { column, source } => SyncError::TypeCoercion {
            path: path.to_path_buf(),
            line,
            column,
            source,
        },
        RowError::Malformed { expected, found } => SyncError::MalformedRow {
            path: path.to_path_buf(),
            line,
            expected,
            found,
        },
    }
}
