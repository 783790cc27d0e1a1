use std::path::PathBuf;

use thiserror::Error;

use tap_csv_core::CoercionError;

use crate::emitter::EmitError;

/// Errors that abort a sync run.
///
/// Missing sources, symlink loops and non-CSV files are not errors; they are logged and skipped.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{}:{line}: column '{column}': {source}", .path.display())]
    TypeCoercion {
        path: PathBuf,
        line: u64,
        column: String,
        #[source]
        source: CoercionError,
    },

    #[error("{}:{line}: row has {found} fields but the header has {expected}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{}: duplicate column '{column}' in header", .path.display())]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read CSV from {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Emit(#[from] EmitError),
}
