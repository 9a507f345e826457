//! # tickbook
//!
//! Order book engine for line-delimited JSON depth feeds.
//!
//! Each feed line is classified as a ping, a full snapshot or an
//! incremental update, then applied to a two-sided book of sorted price
//! ladders. After every applied message the best bid and ask are
//! available as a [`TopOfBook`](book::TopOfBook).
//!
//! ## Features
//!
//! - **Tolerant classification** - Framing bytes before the JSON object are skipped
//! - **Single-pass merges** - Sorted diffs are merged into sorted ladders in linear time
//! - **Pluggable ladder storage** - Sorted vector or ordered map behind one trait
//! - **Sequencing** - Updates before the first snapshot and stale messages are rejected
//!
//! ## Quick Start
//!
//! ```
//! use tickbook::prelude::*;
//!
//! let mut handler = BookHandler::<VecStore>::new();
//!
//! let line = r#"{"ch":"market.btcusdt.depth","ts":1,"tick":{"asks":[[100.5,3]],"bids":[[100.0,2]],"event":"snapshot"}}"#;
//! let top = handler.on_event(classify_str(line)?)?.unwrap();
//!
//! assert_eq!(top.bid.price, 100.0);
//! assert_eq!(top.ask.quantity, 3);
//! # Ok::<(), tickbook::prelude::CoreError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Price levels, sides, events and the error type
//! - [`feed`] - Message classification and level validation
//! - [`book`] - Ladders, level stores, the order book and its handlers

pub mod prelude;

/// Core types shared by every tickbook crate.
pub mod core {
    pub use tickbook_core::*;
}

/// Feed message classification.
pub mod feed {
    pub use tickbook_feed::*;
}

/// Price ladders and the order book.
pub mod book {
    pub use tickbook_book::*;
}

// Re-export commonly used items at the crate root
pub use tickbook_book::{BookHandler, OrderBook, SharedBook, TopOfBook};
pub use tickbook_core::{Error, Event, PriceLevel, Result, Side};
pub use tickbook_feed::{classify, classify_str};
