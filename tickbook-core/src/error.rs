//! Error types for tickbook operations.

use crate::types::Side;
use thiserror::Error;

/// Error type for feed classification and order book operations.
///
/// Every variant is local to a single feed message: the message is
/// reported and discarded, and the book keeps its last valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The message has no JSON object start or does not decode as an object.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A required field is absent at top level or inside `tick`.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but holds a value of the wrong shape.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Best-level query on a side with no levels.
    #[error("empty ladder: no {0} levels")]
    EmptyLadder(Side),

    /// Incremental update received before any snapshot.
    #[error("book not initialized: update received before first snapshot")]
    Uninitialized,

    /// Message timestamp is older than the last applied one.
    #[error("stale message: timestamp {received} is older than last update {last}")]
    StaleMessage {
        /// Timestamp of the last applied message.
        last: u64,
        /// Timestamp carried by the rejected message.
        received: u64,
    },
}

impl Error {
    /// Creates a malformed input error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }

    /// Creates an invalid value error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue(reason.into())
    }

    /// Returns true if the error was raised while classifying the raw message.
    #[must_use]
    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::MissingField(_) | Self::InvalidValue(_)
        )
    }
}

/// Result type alias for tickbook operations.
pub type Result<T> = std::result::Result<T, Error>;
