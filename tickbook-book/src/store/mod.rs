//! Backing stores for price ladders.
//!
//! A [`LevelStore`] keeps the levels of one book side in ranking order,
//! best first. Two implementations are provided:
//!
//! - [`VecStore`]: a sorted vector merged against each diff in one pass
//! - [`TreeStore`]: a `BTreeMap` keyed by side-ranked price
//!
//! Both must produce the same level sequence for the same operations.

mod tree;
mod vec;

pub use tree::TreeStore;
pub use vec::VecStore;

use tickbook_core::{PriceLevel, Side};

/// Storage for the levels of one book side.
///
/// Implementations never hold a zero-quantity level and never hold two
/// levels at the same price.
pub trait LevelStore {
    /// Creates an empty store ranked for `side`.
    fn with_side(side: Side) -> Self;

    /// Returns the side this store is ranked for.
    fn side(&self) -> Side;

    /// Returns the number of stored levels.
    fn len(&self) -> usize;

    /// Returns true if no levels are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the best-ranked level.
    fn best(&self) -> Option<PriceLevel>;

    /// Returns the level stored at exactly `price`.
    fn get(&self, price: f64) -> Option<PriceLevel>;

    /// Iterates over the stored levels, best first.
    fn iter(&self) -> impl Iterator<Item = PriceLevel> + '_;

    /// Removes every level.
    fn clear(&mut self);

    /// Replaces the contents with `levels`.
    ///
    /// Zero-quantity levels are dropped. When a price repeats, the last
    /// occurrence wins.
    fn replace(&mut self, levels: Vec<PriceLevel>);

    /// Merges a diff into the stored levels.
    ///
    /// `diff` must be strictly ordered by this store's side ranking.
    /// A non-zero quantity inserts or overwrites the level at its price;
    /// a zero quantity removes it, and is a no-op if the price is absent.
    fn apply_diff(&mut self, diff: &[PriceLevel]);
}
