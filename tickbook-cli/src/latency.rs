//! Book update latency measurement.

use std::fmt;
use std::time::{Duration, Instant};

/// Latency statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyStats {
    /// Minimum latency.
    pub min: Duration,
    /// Maximum latency.
    pub max: Duration,
    /// Mean latency.
    pub mean: Duration,
    /// Median latency (p50).
    pub median: Duration,
    /// 99th percentile latency.
    pub p99: Duration,
    /// Sample count.
    pub count: usize,
}

impl fmt::Display for LatencyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "book updates: {} samples, min {} ns, mean {} ns, p50 {} ns, p99 {} ns, max {} ns",
            self.count,
            self.min.as_nanos(),
            self.mean.as_nanos(),
            self.median.as_nanos(),
            self.p99.as_nanos(),
            self.max.as_nanos(),
        )
    }
}

/// Collects latency samples and computes statistics.
#[derive(Debug, Default)]
pub struct LatencyCollector {
    samples: Vec<Duration>,
}

impl LatencyCollector {
    /// Creates a new latency collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a latency sample.
    pub fn record(&mut self, latency: Duration) {
        self.samples.push(latency);
    }

    /// Measures the latency of a function.
    pub fn measure<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        self.record(start.elapsed());
        result
    }

    /// Computes statistics from collected samples.
    #[must_use]
    pub fn stats(&mut self) -> Option<LatencyStats> {
        if self.samples.is_empty() {
            return None;
        }

        self.samples.sort_unstable();

        let count = self.samples.len();
        let total: Duration = self.samples.iter().sum();

        Some(LatencyStats {
            min: self.samples[0],
            max: self.samples[count - 1],
            mean: total / u32::try_from(count).unwrap_or(u32::MAX),
            median: self.samples[count / 2],
            p99: self.samples[(count as f64 * 0.99) as usize],
            count,
        })
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_stats() {
        let mut collector = LatencyCollector::new();

        for i in (1..=100).rev() {
            collector.record(Duration::from_nanos(i * 100));
        }

        let stats = collector.stats().unwrap();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.min, Duration::from_nanos(100));
        assert_eq!(stats.max, Duration::from_nanos(10_000));
        assert_eq!(stats.median, Duration::from_nanos(5_100));
        assert_eq!(stats.mean, Duration::from_nanos(5_050));
    }

    #[test]
    fn test_empty_collector() {
        let mut collector = LatencyCollector::new();
        assert!(collector.is_empty());
        assert!(collector.stats().is_none());
    }

    #[test]
    fn test_measure() {
        let mut collector = LatencyCollector::new();

        let result = collector.measure(|| 42);
        assert_eq!(result, 42);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_stats_display() {
        let mut collector = LatencyCollector::new();
        collector.record(Duration::from_nanos(250));

        let report = collector.stats().unwrap().to_string();
        assert!(report.contains("1 samples"));
        assert!(report.contains("p99 250 ns"));
    }
}
