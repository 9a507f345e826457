//! Sorted-vector level store.

use super::LevelStore;
use std::cmp::Ordering;
use tickbook_core::{PriceLevel, Side};

/// Level store backed by a vector sorted best first.
///
/// Diffs are merged in a single co-sorted pass into a scratch buffer that
/// is then swapped in, so each merge moves every level at most once.
#[derive(Debug, Clone)]
pub struct VecStore {
    side: Side,
    levels: Vec<PriceLevel>,
    scratch: Vec<PriceLevel>,
}

impl VecStore {
    /// Returns the stored levels as a slice, best first.
    #[must_use]
    pub fn as_slice(&self) -> &[PriceLevel] {
        &self.levels
    }

    fn position(&self, price: f64) -> std::result::Result<usize, usize> {
        let side = self.side;
        self.levels
            .binary_search_by(|level| side.rank(level.price, price))
    }
}

impl LevelStore for VecStore {
    fn with_side(side: Side) -> Self {
        Self {
            side,
            levels: Vec::new(),
            scratch: Vec::new(),
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
        self.levels.first().copied()
    }

    fn get(&self, price: f64) -> Option<PriceLevel> {
        self.position(price).ok().map(|index| self.levels[index])
    }

    fn iter(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.levels.iter().copied()
    }

    fn clear(&mut self) {
        self.levels.clear();
    }

    fn replace(&mut self, mut levels: Vec<PriceLevel>) {
        let side = self.side;
        levels.retain(|level| !level.is_empty());
        // Stable, so repeated prices keep their feed order.
        levels.sort_by(|a, b| side.rank(a.price, b.price));

        self.levels.clear();
        self.levels.reserve(levels.len());
        for level in levels {
            if let Some(last) = self.levels.last_mut()
                && side.rank(last.price, level.price) == Ordering::Equal
            {
                *last = level;
            } else {
                self.levels.push(level);
            }
        }
    }

    fn apply_diff(&mut self, diff: &[PriceLevel]) {
        if diff.is_empty() {
            return;
        }

        let side = self.side;
        let levels = &self.levels;
        let merged = &mut self.scratch;
        merged.clear();
        merged.reserve(levels.len() + diff.len());

        // `cursor` walks the current ladder, `next` walks the diff.
        let mut cursor = 0;
        let mut next = 0;

        while cursor < levels.len() && next < diff.len() {
            let level = levels[cursor];
            let change = diff[next];

            match side.rank(change.price, level.price) {
                Ordering::Less => {
                    if !change.is_empty() {
                        merged.push(change);
                    }
                    next += 1;
                }
                Ordering::Equal => {
                    if !change.is_empty() {
                        merged.push(PriceLevel::new(level.price, change.quantity));
                    }
                    cursor += 1;
                    next += 1;
                }
                Ordering::Greater => {
                    // Copy the whole run of levels ranked ahead of the change.
                    let run = 1 + levels[cursor + 1..]
                        .partition_point(|l| side.better(l.price, change.price));
                    merged.extend_from_slice(&levels[cursor..cursor + run]);
                    cursor += run;
                }
            }
        }

        merged.extend_from_slice(&levels[cursor..]);
        merged.extend(diff[next..].iter().copied().filter(|c| !c.is_empty()));

        std::mem::swap(&mut self.levels, &mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(pairs: &[(f64, i64)]) -> Vec<PriceLevel> {
        pairs.iter().copied().map(PriceLevel::from).collect()
    }

    #[test]
    fn test_replace_sorts_and_filters() {
        let mut store = VecStore::with_side(Side::Ask);
        store.replace(levels(&[(101.0, 5), (100.5, 3), (102.0, 0)]));
        assert_eq!(store.as_slice(), levels(&[(100.5, 3), (101.0, 5)]).as_slice());
    }

    #[test]
    fn test_replace_last_duplicate_wins() {
        let mut store = VecStore::with_side(Side::Bid);
        store.replace(levels(&[(100.0, 1), (99.0, 4), (100.0, 2)]));
        assert_eq!(store.as_slice(), levels(&[(100.0, 2), (99.0, 4)]).as_slice());
    }

    #[test]
    fn test_apply_diff_insert_update_delete() {
        let mut store = VecStore::with_side(Side::Ask);
        store.replace(levels(&[(100.0, 1), (101.0, 2), (103.0, 3)]));

        store.apply_diff(&levels(&[(99.5, 9), (101.0, 0), (102.0, 4), (103.0, 7)]));

        assert_eq!(
            store.as_slice(),
            levels(&[(99.5, 9), (100.0, 1), (102.0, 4), (103.0, 7)]).as_slice()
        );
    }

    #[test]
    fn test_apply_diff_appends_tail() {
        let mut store = VecStore::with_side(Side::Bid);
        store.replace(levels(&[(100.0, 1)]));

        store.apply_diff(&levels(&[(99.0, 2), (98.5, 0), (98.0, 3)]));

        assert_eq!(
            store.as_slice(),
            levels(&[(100.0, 1), (99.0, 2), (98.0, 3)]).as_slice()
        );
    }

    #[test]
    fn test_apply_diff_zero_for_absent_price_ahead() {
        let mut store = VecStore::with_side(Side::Ask);
        store.replace(levels(&[(100.0, 1), (101.0, 2)]));

        store.apply_diff(&levels(&[(99.0, 0), (101.0, 5)]));

        assert_eq!(store.as_slice(), levels(&[(100.0, 1), (101.0, 5)]).as_slice());
    }

    #[test]
    fn test_apply_diff_on_empty_store() {
        let mut store = VecStore::with_side(Side::Ask);
        store.apply_diff(&levels(&[(100.0, 0), (100.5, 2)]));
        assert_eq!(store.as_slice(), levels(&[(100.5, 2)]).as_slice());
    }

    #[test]
    fn test_apply_empty_diff_is_noop() {
        let mut store = VecStore::with_side(Side::Ask);
        store.replace(levels(&[(100.0, 1)]));
        store.apply_diff(&[]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get() {
        let mut store = VecStore::with_side(Side::Bid);
        store.replace(levels(&[(100.0, 1), (99.0, 2)]));
        assert_eq!(store.get(99.0), Some(PriceLevel::new(99.0, 2)));
        assert_eq!(store.get(98.0), None);
    }
}
