//! Command-line options.

use crate::config::{OutputFormat, StoreKind};
use clap::Parser;
use std::path::PathBuf;

/// Replays a depth feed and prints the top of book after every applied
/// snapshot or update.
///
/// Diagnostics go to stderr; set `RUST_LOG` to change their verbosity.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct TickbookCli {
    /// Feed file with one message per line. Reads stdin when omitted.
    #[arg(value_name = "INPUT", env = "TICKBOOK_INPUT")]
    pub input: Option<PathBuf>,
    /// File receiving top-of-book records. Writes stdout when omitted.
    #[arg(value_name = "OUTPUT", env = "TICKBOOK_OUTPUT")]
    pub output: Option<PathBuf>,
    /// Ladder backing store.
    #[arg(long, value_enum, default_value_t = StoreKind::Vec)]
    pub store: StoreKind,
    /// Record format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print update latency statistics to stderr when the feed ends.
    #[arg(long)]
    pub stats: bool,
}
