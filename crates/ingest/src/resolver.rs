//! Expands a configured source path into the concrete files to sync.
//!
//! Directories are walked recursively with an explicit work stack (`walkdir`), so nesting depth
//! does not grow the call stack. Symlinks are followed. Symlink loops and entries that vanished
//! (or dangling links) are logged and skipped; any other walk failure, such as an unreadable
//! directory, is yielded as an error. Only files whose path ends in `.csv` are synced, see
//! [`is_csv`].

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

/// Lazy sequence of candidate files under a source path.
///
/// Yields every regular file, CSV or not; the extension filter runs at sync time.
pub struct ResolvedFiles {
    walker: Option<walkdir::IntoIter>,
}

impl Iterator for ResolvedFiles {
    type Item = Result<PathBuf, walkdir::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let walker = self.walker.as_mut()?;
        loop {
            match walker.next()? {
                Ok(entry) if entry.file_type().is_dir() => {
                    info!(
                        "Syncing all CSV files in directory '{}' recursively",
                        entry.path().display()
                    );
                }
                Ok(entry) => return Some(Ok(entry.into_path())),
                Err(e) => {
                    if let Some(ancestor) = e.loop_ancestor() {
                        warn!(
                            path = %display_path(&e),
                            ancestor = %ancestor.display(),
                            "symlink loop, skipping entry"
                        );
                    } else if is_not_found(&e) {
                        info!("Path {} does not exist, skipping", display_path(&e));
                    } else {
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}

/// Resolve `path` into candidate files.
///
/// A missing path is not an error: it is logged and resolves to nothing. A regular file
/// resolves to itself. Directory entries are visited in file-name order.
pub fn resolve(path: &Path) -> ResolvedFiles {
    if !path.exists() {
        info!("Directory {} does not exist, skipping", path.display());
        return ResolvedFiles { walker: None };
    }

    let walker = WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();
    ResolvedFiles {
        walker: Some(walker),
    }
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn display_path(err: &walkdir::Error) -> String {
    err.path()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Whether a path names a CSV file: exact, case-sensitive `.csv` suffix.
pub fn is_csv(path: &Path) -> bool {
    path.as_os_str().as_encoded_bytes().ends_with(b".csv")
}
