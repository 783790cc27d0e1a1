use std::path::PathBuf;

use clap::Parser;

/// Stream CSV files as schema, record and state messages.
///
/// Reads every configured source in order and writes one JSON message per line to stdout.
/// Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "tap-csv", version, about)]
pub struct CliArgs {
    /// Path to the JSON config file listing the sources to sync
    #[arg(long, short = 'c', env = "TAP_CSV_CONFIG")]
    pub config: PathBuf,

    /// Path to a JSON state file (defaults to an empty state)
    #[arg(long, short = 's', env = "TAP_CSV_STATE")]
    pub state: Option<PathBuf>,
}
