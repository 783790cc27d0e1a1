pub mod config;
pub mod error;
pub mod message;
pub mod record;

pub use config::{SourceSpec, TapConfig};
pub use error::*;
pub use message::*;
pub use record::*;
