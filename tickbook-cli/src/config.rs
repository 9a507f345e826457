//! Driver configuration.

use crate::opt::TickbookCli;
use std::path::PathBuf;

/// Ladder backing store selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StoreKind {
    /// Sorted vector with a single-pass merge.
    #[default]
    Vec,
    /// Ordered map with per-level upserts.
    Tree,
}

/// Top-of-book record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{ts}, {bid}, {bid_qty}, {ask}, {ask_qty}` with 2-decimal prices.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Configuration for a feed replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Feed file, or stdin when `None`.
    pub input: Option<PathBuf>,
    /// Record destination, or stdout when `None`.
    pub output: Option<PathBuf>,
    /// Ladder backing store.
    pub store: StoreKind,
    /// Record format.
    pub format: OutputFormat,
    /// Whether to report latency statistics at the end.
    pub report_stats: bool,
}

impl DriverConfig {
    /// Returns a builder with default settings.
    #[must_use]
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::new()
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfigBuilder::new().build()
    }
}

impl From<TickbookCli> for DriverConfig {
    fn from(cli: TickbookCli) -> Self {
        let mut builder = DriverConfigBuilder::new()
            .store(cli.store)
            .format(cli.format)
            .report_stats(cli.stats);
        if let Some(input) = cli.input {
            builder = builder.input(input);
        }
        if let Some(output) = cli.output {
            builder = builder.output(output);
        }
        builder.build()
    }
}

/// Builder for [`DriverConfig`].
#[derive(Debug, Clone, Default)]
pub struct DriverConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    store: StoreKind,
    format: OutputFormat,
    report_stats: bool,
}

impl DriverConfigBuilder {
    /// Creates a new builder: stdin to stdout, vector store, text records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the feed file.
    #[must_use]
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Sets the record destination file.
    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the ladder backing store.
    #[must_use]
    pub fn store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Sets the record format.
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables the latency report.
    #[must_use]
    pub fn report_stats(mut self, enabled: bool) -> Self {
        self.report_stats = enabled;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> DriverConfig {
        DriverConfig {
            input: self.input,
            output: self.output,
            store: self.store,
            format: self.format,
            report_stats: self.report_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_builder_defaults() {
        let config = DriverConfig::default();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert_eq!(config.store, StoreKind::Vec);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.report_stats);
    }

    #[test]
    fn test_builder_chain() {
        let config = DriverConfig::builder()
            .input("feed.txt")
            .output("out.txt")
            .store(StoreKind::Tree)
            .format(OutputFormat::Json)
            .report_stats(true)
            .build();

        assert_eq!(config.input, Some(PathBuf::from("feed.txt")));
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert_eq!(config.store, StoreKind::Tree);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.report_stats);
    }

    #[test]
    fn test_from_cli() {
        let cli = TickbookCli::try_parse_from(["tickbook", "in.txt", "--stats"]).unwrap();
        let config = DriverConfig::from(cli);
        assert_eq!(config.input, Some(PathBuf::from("in.txt")));
        assert!(config.output.is_none());
        assert!(config.report_stats);
    }
}
