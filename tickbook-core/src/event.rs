//! Classified feed events.

use crate::types::PriceLevel;
use serde::{Deserialize, Serialize};

/// Book contents carried by a snapshot or update message.
///
/// Levels are kept exactly as received: unfiltered and in feed order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookPayload {
    /// Feed timestamp of the message.
    pub timestamp: u64,
    /// Channel identifier of the stream the message belongs to.
    pub channel: String,
    /// Ask side levels.
    pub asks: Vec<PriceLevel>,
    /// Bid side levels.
    pub bids: Vec<PriceLevel>,
}

impl BookPayload {
    /// Creates a payload from `(price, quantity)` pairs.
    #[must_use]
    pub fn new(
        timestamp: u64,
        channel: impl Into<String>,
        asks: &[(f64, i64)],
        bids: &[(f64, i64)],
    ) -> Self {
        Self {
            timestamp,
            channel: channel.into(),
            asks: asks.iter().copied().map(PriceLevel::from).collect(),
            bids: bids.iter().copied().map(PriceLevel::from).collect(),
        }
    }
}

/// A classified feed message.
///
/// Classification failures are carried by the `Err` side of
/// [`crate::Result`], so there is no error variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Keep-alive probe. Never touches book state.
    Ping,
    /// Full replacement of both ladders.
    Snapshot(BookPayload),
    /// Incremental diff against the current ladders.
    Update(BookPayload),
}

impl Event {
    /// Returns the payload for snapshot and update events.
    #[must_use]
    pub fn payload(&self) -> Option<&BookPayload> {
        match self {
            Self::Ping => None,
            Self::Snapshot(payload) | Self::Update(payload) => Some(payload),
        }
    }

    /// Returns a short name for the event kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Snapshot(_) => "snapshot",
            Self::Update(_) => "update",
        }
    }
}
