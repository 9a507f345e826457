//! # tickbook CLI
//!
//! Feed driver that replays a line-delimited depth feed through the
//! classifier and order book.
//!
//! This crate provides:
//! - Command-line options and the driver configuration built from them
//! - The line loop routing each message to the book handler
//! - Text and JSON top-of-book records
//! - Per-message latency statistics

pub mod config;
pub mod driver;
pub mod latency;
pub mod opt;
pub mod output;

pub use config::{DriverConfig, DriverConfigBuilder, OutputFormat, StoreKind};
pub use driver::{FeedDriver, LineOutcome, RunSummary, run};
pub use latency::{LatencyCollector, LatencyStats};
pub use opt::TickbookCli;
