//! One book fed from a worker thread while the main thread samples it.
//!
//! Run with: `RUST_LOG=debug cargo run --example shared_book`

use std::thread;
use std::time::Duration;
use tickbook::prelude::*;
use tickbook_bench::{FeedConfig, FeedGenerator};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let shared = SharedBook::<VecStore>::new();
    let lines = FeedGenerator::new(FeedConfig::default()).lines(10_000);

    let writer = {
        let book = shared.clone();
        thread::spawn(move || {
            for line in &lines {
                match classify_str(line) {
                    Ok(event) => {
                        if let Err(error) = book.on_event(event) {
                            tracing::warn!(%error, "message skipped");
                        }
                    }
                    Err(error) => tracing::warn!(%error, "unclassified line"),
                }
            }
        })
    };

    for _ in 0..5 {
        thread::sleep(Duration::from_millis(2));
        match shared.top_of_book() {
            Ok(top) => println!(
                "ts {} bid {:.2} x {} ask {:.2} x {}",
                top.timestamp, top.bid.price, top.bid.quantity, top.ask.price, top.ask.quantity
            ),
            Err(error) => println!("no top of book yet: {error}"),
        }
    }

    if writer.join().is_err() {
        eprintln!("feed thread panicked");
        return;
    }

    let stats = shared.stats();
    println!(
        "snapshots {} updates {} rejected {}",
        stats.snapshots, stats.updates, stats.rejected
    );
    println!("spread {:?}", shared.with_book(|book| book.spread()));
}
