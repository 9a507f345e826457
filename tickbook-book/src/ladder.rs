//! One side of the order book.

use crate::store::{LevelStore, VecStore};
use tickbook_core::{Error, PriceLevel, Result, Side};

/// Price ladder for one book side, kept in ranking order.
///
/// Ladders are mutated only through their owning
/// [`OrderBook`](crate::OrderBook); everything public here is a query.
#[derive(Debug, Clone)]
pub struct Ladder<S = VecStore> {
    store: S,
}

impl<S: LevelStore> Ladder<S> {
    /// Creates an empty ladder for the given side.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            store: S::with_side(side),
        }
    }

    /// Returns the side of this ladder.
    #[inline]
    #[must_use]
    pub fn side(&self) -> Side {
        self.store.side()
    }

    /// Returns the best-ranked level.
    ///
    /// # Errors
    /// Returns `Error::EmptyLadder` if the ladder holds no levels.
    #[inline]
    pub fn best(&self) -> Result<PriceLevel> {
        self.store.best().ok_or(Error::EmptyLadder(self.side()))
    }

    /// Returns the N best levels.
    #[must_use]
    pub fn best_n(&self, n: usize) -> Vec<PriceLevel> {
        self.store.iter().take(n).collect()
    }

    /// Returns the level at a specific price.
    #[must_use]
    pub fn get(&self, price: f64) -> Option<PriceLevel> {
        self.store.get(price)
    }

    /// Returns the number of price levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if there are no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterates over all levels, best first.
    pub fn iter(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.store.iter()
    }

    /// Checks that a diff is strictly ordered by this ladder's ranking.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` naming the first out-of-order pair.
    pub fn check_diff(&self, diff: &[PriceLevel]) -> Result<()> {
        let side = self.side();
        match diff
            .windows(2)
            .position(|pair| !side.better(pair[0].price, pair[1].price))
        {
            Some(index) => Err(Error::invalid(format!(
                "{side} diff out of order at index {}: {} then {}",
                index + 1,
                diff[index].price,
                diff[index + 1].price
            ))),
            None => Ok(()),
        }
    }

    pub(crate) fn replace(&mut self, levels: Vec<PriceLevel>) {
        self.store.replace(levels);
    }

    pub(crate) fn apply_diff(&mut self, diff: &[PriceLevel]) {
        self.store.apply_diff(diff);
    }

    pub(crate) fn clear(&mut self) {
        self.store.clear();
    }
}
