//! Order book management.

use crate::ladder::Ladder;
use crate::store::{LevelStore, VecStore};
use serde::{Deserialize, Serialize};
use tickbook_core::{BookPayload, Event, PriceLevel, Result, Side};

/// Best bid and best ask after a message was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopOfBook {
    /// Timestamp of the last applied message.
    pub timestamp: u64,
    /// Best bid level.
    pub bid: PriceLevel,
    /// Best ask level.
    pub ask: PriceLevel,
}

/// Full order book for one instrument.
///
/// The book is mutated only by [`OrderBook::replace`] and
/// [`OrderBook::merge`]; each either applies completely or not at all.
#[derive(Debug, Clone)]
pub struct OrderBook<S = VecStore> {
    asks: Ladder<S>,
    bids: Ladder<S>,
    last_update_time: u64,
    channel: Option<String>,
}

impl<S: LevelStore> OrderBook<S> {
    /// Creates a new empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            asks: Ladder::new(Side::Ask),
            bids: Ladder::new(Side::Bid),
            last_update_time: 0,
            channel: None,
        }
    }

    /// Returns the ask ladder.
    #[must_use]
    pub fn asks(&self) -> &Ladder<S> {
        &self.asks
    }

    /// Returns the bid ladder.
    #[must_use]
    pub fn bids(&self) -> &Ladder<S> {
        &self.bids
    }

    /// Returns the ladder for a side.
    #[must_use]
    pub fn ladder(&self, side: Side) -> &Ladder<S> {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Returns the timestamp of the last applied message.
    #[inline]
    #[must_use]
    pub fn last_update_time(&self) -> u64 {
        self.last_update_time
    }

    /// Returns the channel of the last applied message.
    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Applies a snapshot (replaces entire book).
    pub fn replace(&mut self, payload: BookPayload) {
        self.last_update_time = payload.timestamp;
        self.channel = Some(payload.channel);
        self.asks.replace(payload.asks);
        self.bids.replace(payload.bids);

        tracing::debug!(
            timestamp = self.last_update_time,
            asks = self.asks.len(),
            bids = self.bids.len(),
            "snapshot applied"
        );
    }

    /// Merges an incremental update into both ladders.
    ///
    /// Both diffs are checked before either ladder is touched.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` if a diff is not strictly ordered by
    /// its side's ranking. The book is left unchanged.
    pub fn merge(&mut self, payload: BookPayload) -> Result<()> {
        self.asks.check_diff(&payload.asks)?;
        self.bids.check_diff(&payload.bids)?;

        self.last_update_time = payload.timestamp;
        self.asks.apply_diff(&payload.asks);
        self.bids.apply_diff(&payload.bids);
        self.channel = Some(payload.channel);

        tracing::trace!(
            timestamp = self.last_update_time,
            ask_changes = payload.asks.len(),
            bid_changes = payload.bids.len(),
            "update merged"
        );
        Ok(())
    }

    /// Routes a classified event to [`replace`](Self::replace) or
    /// [`merge`](Self::merge). Pings are ignored.
    ///
    /// # Errors
    /// Returns the error from [`merge`](Self::merge).
    pub fn apply(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Ping => Ok(()),
            Event::Snapshot(payload) => {
                self.replace(payload);
                Ok(())
            }
            Event::Update(payload) => self.merge(payload),
        }
    }

    /// Returns the best ask level.
    ///
    /// # Errors
    /// Returns `Error::EmptyLadder` if there are no asks.
    #[inline]
    pub fn best_ask(&self) -> Result<PriceLevel> {
        self.asks.best()
    }

    /// Returns the best bid level.
    ///
    /// # Errors
    /// Returns `Error::EmptyLadder` if there are no bids.
    #[inline]
    pub fn best_bid(&self) -> Result<PriceLevel> {
        self.bids.best()
    }

    /// Returns the best levels on both sides with the book timestamp.
    ///
    /// # Errors
    /// Returns `Error::EmptyLadder` if either side is empty.
    pub fn top_of_book(&self) -> Result<TopOfBook> {
        Ok(TopOfBook {
            timestamp: self.last_update_time,
            bid: self.best_bid()?,
            ask: self.best_ask()?,
        })
    }

    /// Returns the bid-ask spread.
    #[must_use]
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Ok(bid), Ok(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Returns the mid price.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Ok(bid), Ok(ask)) => Some((bid.price + ask.price) / 2.0),
            _ => None,
        }
    }

    /// Clears the entire book.
    pub fn clear(&mut self) {
        self.asks.clear();
        self.bids.clear();
        self.last_update_time = 0;
        self.channel = None;
    }
}

impl<S: LevelStore> Default for OrderBook<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TreeStore;
    use tickbook_core::Error;

    fn scenario_snapshot() -> BookPayload {
        BookPayload::new(
            1,
            "market.btcusdt.depth",
            &[(100.5, 3), (101.0, 5)],
            &[(100.0, 2), (99.5, 4)],
        )
    }

    fn levels<S: LevelStore>(ladder: &Ladder<S>) -> Vec<(f64, i64)> {
        ladder.iter().map(|l| (l.price, l.quantity)).collect()
    }

    #[test]
    fn test_snapshot_scenario() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());

        assert_eq!(book.best_ask().unwrap(), PriceLevel::new(100.5, 3));
        assert_eq!(book.best_bid().unwrap(), PriceLevel::new(100.0, 2));
        assert_eq!(book.last_update_time(), 1);
        assert_eq!(book.channel(), Some("market.btcusdt.depth"));
    }

    #[test]
    fn test_update_scenario() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());

        let update = BookPayload::new(2, "market.btcusdt.depth", &[(100.5, 0), (100.75, 7)], &[]);
        book.merge(update).unwrap();

        assert_eq!(book.best_ask().unwrap(), PriceLevel::new(100.75, 7));
        assert_eq!(book.best_bid().unwrap(), PriceLevel::new(100.0, 2));
        assert_eq!(book.last_update_time(), 2);
        assert_eq!(levels(book.asks()), vec![(100.75, 7), (101.0, 5)]);
    }

    #[test]
    fn test_merge_records_channel() {
        let mut book = OrderBook::<TreeStore>::new();
        book.replace(scenario_snapshot());

        book.merge(BookPayload::new(2, "market.ethusdt.depth", &[], &[])).unwrap();
        assert_eq!(book.channel(), Some("market.ethusdt.depth"));
        assert_eq!(book.last_update_time(), 2);
    }

    #[test]
    fn test_tree_store_book() {
        let mut book = OrderBook::<TreeStore>::new();
        book.replace(scenario_snapshot());
        book.merge(BookPayload::new(2, "c", &[], &[(100.25, 6), (99.5, 0)]))
            .unwrap();

        assert_eq!(book.best_bid().unwrap(), PriceLevel::new(100.25, 6));
        assert_eq!(levels(book.bids()), vec![(100.25, 6), (100.0, 2)]);
    }

    #[test]
    fn test_out_of_order_diff_leaves_book_unchanged() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());
        let asks_before = levels(book.asks());

        // Valid asks, but bids ascending where descending is required.
        let update = BookPayload::new(2, "c", &[(100.75, 1)], &[(99.0, 1), (99.75, 1)]);
        let err = book.merge(update).unwrap_err();

        assert!(matches!(err, Error::InvalidValue(_)));
        assert_eq!(levels(book.asks()), asks_before);
        assert_eq!(book.last_update_time(), 1);
    }

    #[test]
    fn test_snapshot_replaces_previous_state() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());
        book.replace(BookPayload::new(5, "c", &[(200.0, 1)], &[(199.0, 0), (198.0, 2)]));

        assert_eq!(levels(book.asks()), vec![(200.0, 1)]);
        assert_eq!(levels(book.bids()), vec![(198.0, 2)]);
    }

    #[test]
    fn test_snapshot_idempotent() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());
        let first = (levels(book.asks()), levels(book.bids()));
        book.replace(scenario_snapshot());
        assert_eq!(first, (levels(book.asks()), levels(book.bids())));
    }

    #[test]
    fn test_apply_routes_events() {
        let mut book = OrderBook::<VecStore>::new();
        book.apply(Event::Ping).unwrap();
        assert!(book.asks().is_empty());

        book.apply(Event::Snapshot(scenario_snapshot())).unwrap();
        book.apply(Event::Update(BookPayload::new(3, "c", &[(101.0, 0)], &[])))
            .unwrap();
        assert_eq!(levels(book.asks()), vec![(100.5, 3)]);
    }

    #[test]
    fn test_top_of_book() {
        let mut book = OrderBook::<VecStore>::new();
        assert_eq!(book.top_of_book().unwrap_err(), Error::EmptyLadder(Side::Bid));

        book.replace(scenario_snapshot());
        let top = book.top_of_book().unwrap();
        assert_eq!(top.timestamp, 1);
        assert_eq!(top.bid, PriceLevel::new(100.0, 2));
        assert_eq!(top.ask, PriceLevel::new(100.5, 3));
    }

    #[test]
    fn test_spread_and_mid() {
        let mut book = OrderBook::<VecStore>::new();
        assert!(book.spread().is_none());
        assert!(book.mid_price().is_none());

        book.replace(scenario_snapshot());
        assert_eq!(book.spread(), Some(0.5));
        assert_eq!(book.mid_price(), Some(100.25));
    }

    #[test]
    fn test_ladder_by_side() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());
        assert_eq!(book.ladder(Side::Ask).side(), Side::Ask);
        assert_eq!(book.ladder(Side::Bid).len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut book = OrderBook::<VecStore>::new();
        book.replace(scenario_snapshot());
        book.clear();

        assert!(book.best_bid().is_err());
        assert!(book.best_ask().is_err());
        assert_eq!(book.last_update_time(), 0);
        assert!(book.channel().is_none());
    }

    #[test]
    fn test_top_of_book_serialization() {
        let top = TopOfBook {
            timestamp: 1,
            bid: PriceLevel::new(100.0, 2),
            ask: PriceLevel::new(100.5, 3),
        };
        let json = serde_json::to_string(&top).unwrap();
        let decoded: TopOfBook = serde_json::from_str(&json).unwrap();
        assert_eq!(top, decoded);
    }
}
