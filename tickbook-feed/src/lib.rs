//! # tickbook Feed
//!
//! Classification of raw depth-feed messages.
//!
//! This crate provides:
//! - Locating and decoding the JSON object inside a framed feed line
//! - Required field checks for the top-level message and its `tick`
//! - Validation of `[price, quantity]` level pairs
//! - Mapping of each message to a typed [`Event`](tickbook_core::Event)

pub mod classifier;
pub mod validation;

pub use classifier::{classify, classify_str};
pub use validation::{parse_level, parse_levels};
