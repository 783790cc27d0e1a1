pub mod coerce;
pub mod emitter;
pub mod error;
pub mod orchestrator;
pub mod resolver;
pub mod schema;
pub mod sync;

pub use emitter::{EmitError, Emitter, MessageWriter};
pub use error::SyncError;
pub use orchestrator::run;
pub use sync::{sync_file, sync_source, FileOutcome};
