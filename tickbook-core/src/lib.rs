//! # tickbook Core
//!
//! Core types shared by every tickbook crate.
//!
//! This crate provides:
//! - Price level and book side types
//! - Classified feed events and their payloads
//! - The error type returned by classification and book operations

pub mod error;
pub mod event;
pub mod types;

pub use error::{Error, Result};
pub use event::{BookPayload, Event};
pub use types::{PriceLevel, Side};
