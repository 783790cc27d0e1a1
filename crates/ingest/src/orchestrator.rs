use serde_json::Value;
use tracing::info;

use tap_csv_core::SourceSpec;

use crate::emitter::Emitter;
use crate::error::SyncError;
use crate::sync::sync_source;

/// Sync every configured source in order, stopping at the first hard failure.
pub fn run<E: Emitter + ?Sized>(
    sources: &[SourceSpec],
    state: &Value,
    emitter: &mut E,
) -> Result<(), SyncError> {
    info!("Starting sync");
    for source in sources {
        sync_source(source, state, emitter)?;
    }
    info!("Sync completed");
    Ok(())
}
