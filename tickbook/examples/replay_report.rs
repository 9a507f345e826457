//! Feed replay throughput report.
//!
//! Generates a synthetic depth feed, replays it through both ladder
//! stores and prints messages per second and mean time per message.
//!
//! Run with: cargo run --example replay_report --release

use tickbook::prelude::*;
use tickbook_bench::{FeedConfig, FeedGenerator, ThroughputResult, run_throughput_benchmark};

const UPDATES: usize = 200_000;

fn replay<S: LevelStore>(lines: &[String]) -> ThroughputResult {
    let mut handler = BookHandler::<S>::new();
    run_throughput_benchmark(lines, |line| {
        if let Ok(event) = classify_str(line) {
            let _ = handler.on_event(event);
        }
    })
}

fn print_row(name: &str, result: &ThroughputResult) {
    println!(
        "| {:<6} | {:>12.0} msg/s | {:>8.1} MB/s | {:>8} ns/msg |",
        name,
        result.messages_per_second(),
        result.mb_per_second(),
        result.mean_per_message().as_nanos()
    );
}

fn main() {
    for depth in [20, 150, 1000] {
        let mut feed = FeedGenerator::new(FeedConfig {
            depth,
            ..FeedConfig::default()
        });
        let lines = feed.lines(UPDATES);

        println!("\ndepth {depth}, {} messages", lines.len());
        print_row("vec", &replay::<VecStore>(&lines));
        print_row("tree", &replay::<TreeStore>(&lines));
    }
}
