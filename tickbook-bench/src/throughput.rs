//! Feed replay throughput measurement.

use std::time::{Duration, Instant};

/// Result of a throughput run.
#[derive(Debug, Clone)]
pub struct ThroughputResult {
    /// Total messages processed.
    pub messages: u64,
    /// Total bytes processed.
    pub bytes: u64,
    /// Total duration.
    pub duration: Duration,
}

impl ThroughputResult {
    /// Returns messages per second.
    #[must_use]
    pub fn messages_per_second(&self) -> f64 {
        self.messages as f64 / self.duration.as_secs_f64()
    }

    /// Returns bytes per second.
    #[must_use]
    pub fn bytes_per_second(&self) -> f64 {
        self.bytes as f64 / self.duration.as_secs_f64()
    }

    /// Returns megabytes per second.
    #[must_use]
    pub fn mb_per_second(&self) -> f64 {
        self.bytes_per_second() / (1024.0 * 1024.0)
    }

    /// Returns the mean time spent per message.
    #[must_use]
    pub fn mean_per_message(&self) -> Duration {
        if self.messages == 0 {
            return Duration::ZERO;
        }
        self.duration / u32::try_from(self.messages).unwrap_or(u32::MAX)
    }
}

/// Feeds every line to `process_fn` once and times the whole pass.
pub fn run_throughput_benchmark<F>(lines: &[String], mut process_fn: F) -> ThroughputResult
where
    F: FnMut(&str),
{
    let start = Instant::now();

    for line in lines {
        process_fn(line);
    }

    let duration = start.elapsed();

    ThroughputResult {
        messages: lines.len() as u64,
        bytes: lines.iter().map(|l| l.len() as u64).sum(),
        duration,
    }
}
