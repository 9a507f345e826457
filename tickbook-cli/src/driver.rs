//! Line loop routing feed messages through the classifier and book.

use crate::config::{DriverConfig, OutputFormat, StoreKind};
use crate::latency::{LatencyCollector, LatencyStats};
use crate::output::write_record;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tickbook_book::{BookHandler, HandlerStats, LevelStore, TopOfBook, TreeStore, VecStore};
use tickbook_core::{Event, Result};

/// What one feed line did to the book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOutcome {
    /// Keep-alive. The book is untouched.
    Ping,
    /// Snapshot or update applied, with both sides quoted.
    Applied(TopOfBook),
    /// Snapshot or update applied, but a side is empty so there is no
    /// top of book to report.
    OneSided,
}

/// Counters for one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines read.
    pub lines: u64,
    /// Snapshots and updates applied.
    pub applied: u64,
    /// Applied messages that left a side empty and wrote no record.
    pub one_sided: u64,
    /// Pings seen.
    pub pings: u64,
    /// Lines that failed classification or application.
    pub failed: u64,
}

/// Drives one book from a line-delimited feed.
#[derive(Debug)]
pub struct FeedDriver<S = VecStore> {
    handler: BookHandler<S>,
    format: OutputFormat,
    latency: LatencyCollector,
    summary: RunSummary,
}

impl<S: LevelStore> FeedDriver<S> {
    /// Creates a driver around an empty book.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            handler: BookHandler::new(),
            format,
            latency: LatencyCollector::new(),
            summary: RunSummary::default(),
        }
    }

    /// Classifies one line and applies it to the book.
    ///
    /// Only snapshot and update handling is timed.
    ///
    /// # Errors
    /// Returns the classification or handler error for this line. The
    /// book is left as it was before the line.
    pub fn process_line(&mut self, line: &str) -> Result<LineOutcome> {
        let event = tickbook_feed::classify_str(line)?;
        if matches!(event, Event::Ping) {
            self.handler.on_event(event)?;
            return Ok(LineOutcome::Ping);
        }

        let top = self.latency.measure(|| self.handler.on_event(event))?;
        Ok(top.map_or(LineOutcome::OneSided, LineOutcome::Applied))
    }

    /// Replays every line of `reader`, writing one record per applied
    /// message to `writer`.
    ///
    /// Message errors are logged and skipped.
    ///
    /// # Errors
    /// Returns an error if reading or writing fails.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
    ) -> anyhow::Result<RunSummary> {
        for line in reader.lines() {
            let line = line.context("failed to read feed line")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.summary.lines += 1;

            match self.process_line(line) {
                Ok(LineOutcome::Applied(top)) => {
                    self.summary.applied += 1;
                    tracing::info!(line, timestamp = top.timestamp, "success");
                    write_record(&mut writer, &top, self.format)
                        .context("failed to write top-of-book record")?;
                }
                Ok(LineOutcome::OneSided) => {
                    self.summary.applied += 1;
                    self.summary.one_sided += 1;
                    tracing::info!(line, "applied, no record (side empty)");
                }
                Ok(LineOutcome::Ping) => {
                    self.summary.pings += 1;
                    tracing::debug!(line, "ping");
                }
                Err(error) => {
                    self.summary.failed += 1;
                    tracing::warn!(line, %error, "message skipped");
                }
            }
        }

        writer.flush().context("failed to flush output")?;
        Ok(self.summary)
    }

    /// Returns latency statistics for the timed book updates.
    #[must_use]
    pub fn latency_stats(&mut self) -> Option<LatencyStats> {
        self.latency.stats()
    }

    /// Returns the handler's event counters.
    #[must_use]
    pub fn handler_stats(&self) -> HandlerStats {
        self.handler.stats()
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &BookHandler<S> {
        &self.handler
    }
}

/// Replays the feed described by `config`.
///
/// # Errors
/// Returns an error if a file cannot be opened or an I/O operation fails.
pub fn run(config: &DriverConfig) -> anyhow::Result<RunSummary> {
    let reader: Box<dyn BufRead> = match &config.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match config.store {
        StoreKind::Vec => run_with::<VecStore>(config, reader, writer),
        StoreKind::Tree => run_with::<TreeStore>(config, reader, writer),
    }
}

fn run_with<S: LevelStore>(
    config: &DriverConfig,
    reader: impl BufRead,
    writer: impl Write,
) -> anyhow::Result<RunSummary> {
    let mut driver = FeedDriver::<S>::new(config.format);
    let summary = driver.run(reader, writer)?;

    tracing::info!(
        lines = summary.lines,
        applied = summary.applied,
        one_sided = summary.one_sided,
        pings = summary.pings,
        failed = summary.failed,
        "feed finished"
    );

    if config.report_stats {
        match driver.latency_stats() {
            Some(stats) => eprintln!("{stats}"),
            None => eprintln!("book updates: no samples"),
        }
    }

    Ok(summary)
}
