//! Prelude module for convenient imports.
//!
//! ```
//! use tickbook::prelude::*;
//! ```

// Core types
pub use tickbook_core::{BookPayload, Event, PriceLevel, Side};
pub use tickbook_core::{Error as CoreError, Result as CoreResult};

// Classification
pub use tickbook_feed::{classify, classify_str};

// Book types
pub use tickbook_book::{
    BookHandler, BookState, HandlerStats, Ladder, LevelStore, OrderBook, SharedBook, TopOfBook,
    TreeStore, VecStore,
};
