//! # tickbook Bench
//!
//! Benchmarking utilities for tickbook: a deterministic synthetic depth
//! feed and a simple throughput runner.

pub mod feed;
pub mod throughput;

pub use feed::{FeedConfig, FeedGenerator, render};
pub use throughput::{ThroughputResult, run_throughput_benchmark};
