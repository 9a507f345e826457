//! Price level and book side types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Order book side (bid or ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Bid (buy) side. Best level is the highest price.
    Bid,
    /// Ask (sell) side. Best level is the lowest price.
    Ask,
}

impl Side {
    /// Compares two prices by rank on this side.
    ///
    /// `Ordering::Less` means `a` ranks ahead of `b`. Negative zero ranks
    /// equal to zero.
    #[inline]
    #[must_use]
    pub fn rank(self, a: f64, b: f64) -> Ordering {
        // Adding zero folds -0.0 into 0.0 before the total ordering.
        let (a, b) = (a + 0.0, b + 0.0);
        match self {
            Self::Ask => a.total_cmp(&b),
            Self::Bid => b.total_cmp(&a),
        }
    }

    /// Returns true if price `a` ranks strictly ahead of price `b`.
    #[inline]
    #[must_use]
    pub fn better(self, a: f64, b: f64) -> bool {
        self.rank(a, b) == Ordering::Less
    }

    /// Returns the lowercase name used in feed messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price level in the order book.
///
/// A quantity of zero marks the level as absent: it is a deletion signal
/// in a diff and is never stored in a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Level price.
    pub price: f64,
    /// Total quantity at this level.
    pub quantity: i64,
}

impl PriceLevel {
    /// Creates a new price level.
    #[inline]
    #[must_use]
    pub const fn new(price: f64, quantity: i64) -> Self {
        Self { price, quantity }
    }

    /// Returns true if this level carries no quantity.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

impl From<(f64, i64)> for PriceLevel {
    fn from((price, quantity): (f64, i64)) -> Self {
        Self::new(price, quantity)
    }
}
