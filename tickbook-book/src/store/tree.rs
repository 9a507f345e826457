//! Ordered-map level store.

use super::LevelStore;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tickbook_core::{PriceLevel, Side};

/// Price key ordered by side rank, so map iteration is best first.
///
/// Keys are only compared within one store, which holds a single side.
#[derive(Debug, Clone, Copy)]
struct RankedPrice {
    price: f64,
    side: Side,
}

impl PartialEq for RankedPrice {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedPrice {}

impl PartialOrd for RankedPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.side, other.side, "RankedPrice compared across sides");
        self.side.rank(self.price, other.price)
    }
}

/// Level store backed by a `BTreeMap`.
///
/// Each diff entry is applied as an independent upsert or removal, which
/// costs O(log n) per changed level regardless of ladder size.
#[derive(Debug, Clone)]
pub struct TreeStore {
    side: Side,
    levels: BTreeMap<RankedPrice, i64>,
}

impl TreeStore {
    #[inline]
    fn key(&self, price: f64) -> RankedPrice {
        RankedPrice {
            price,
            side: self.side,
        }
    }

    #[inline]
    fn update(&mut self, level: PriceLevel) {
        let key = self.key(level.price);
        if level.is_empty() {
            self.levels.remove(&key);
        } else {
            self.levels.insert(key, level.quantity);
        }
    }
}

impl LevelStore for TreeStore {
    fn with_side(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    #[inline]
    fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    fn best(&self) -> Option<PriceLevel> {
        self.levels
            .first_key_value()
            .map(|(key, quantity)| PriceLevel::new(key.price, *quantity))
    }

    fn get(&self, price: f64) -> Option<PriceLevel> {
        self.levels
            .get_key_value(&self.key(price))
            .map(|(key, quantity)| PriceLevel::new(key.price, *quantity))
    }

    fn iter(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.levels
            .iter()
            .map(|(key, quantity)| PriceLevel::new(key.price, *quantity))
    }

    fn clear(&mut self) {
        self.levels.clear();
    }

    fn replace(&mut self, levels: Vec<PriceLevel>) {
        self.levels.clear();
        for level in levels.into_iter().filter(|level| !level.is_empty()) {
            self.update(level);
        }
    }

    fn apply_diff(&mut self, diff: &[PriceLevel]) {
        for change in diff {
            self.update(*change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(pairs: &[(f64, i64)]) -> Vec<PriceLevel> {
        pairs.iter().copied().map(PriceLevel::from).collect()
    }

    #[test]
    fn test_bid_store_iterates_best_first() {
        let mut store = TreeStore::with_side(Side::Bid);
        store.replace(levels(&[(99.0, 1), (101.0, 2), (100.0, 3)]));

        let prices: Vec<f64> = store.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![101.0, 100.0, 99.0]);
        assert_eq!(store.best(), Some(PriceLevel::new(101.0, 2)));
    }

    #[test]
    fn test_ask_store_iterates_best_first() {
        let mut store = TreeStore::with_side(Side::Ask);
        store.replace(levels(&[(101.0, 2), (100.5, 3)]));
        assert_eq!(store.best(), Some(PriceLevel::new(100.5, 3)));
    }

    #[test]
    fn test_apply_diff() {
        let mut store = TreeStore::with_side(Side::Ask);
        store.replace(levels(&[(100.5, 3), (101.0, 5)]));

        store.apply_diff(&levels(&[(100.5, 0), (100.75, 7), (105.0, 0)]));

        assert_eq!(
            store.iter().collect::<Vec<_>>(),
            levels(&[(100.75, 7), (101.0, 5)])
        );
    }

    #[test]
    fn test_replace_drops_zero_and_keeps_last_duplicate() {
        let mut store = TreeStore::with_side(Side::Ask);
        store.replace(levels(&[(100.0, 1), (100.0, 4), (101.0, 0)]));
        assert_eq!(store.iter().collect::<Vec<_>>(), levels(&[(100.0, 4)]));
    }

    #[test]
    fn test_get_and_clear() {
        let mut store = TreeStore::with_side(Side::Bid);
        store.replace(levels(&[(100.0, 1)]));
        assert_eq!(store.get(100.0), Some(PriceLevel::new(100.0, 1)));
        assert!(store.get(100.5).is_none());

        store.clear();
        assert!(store.is_empty());
        assert!(store.best().is_none());
    }
}
