//! # tickbook Book
//!
//! Price-level order book maintenance for a single instrument.
//!
//! This crate provides:
//! - Price ladders kept in side ranking order, over swappable level stores
//! - Order book with snapshot replace and incremental diff merge
//! - A handler enforcing snapshot-first sequencing and timestamp order
//! - A mutex-guarded book for hosts that share it across threads

pub mod book;
pub mod handler;
pub mod ladder;
pub mod shared;
pub mod store;

pub use book::{OrderBook, TopOfBook};
pub use handler::{BookHandler, BookState, HandlerStats};
pub use ladder::Ladder;
pub use shared::SharedBook;
pub use store::{LevelStore, TreeStore, VecStore};
