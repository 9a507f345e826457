//! Deterministic synthetic depth feed.

use serde_json::json;
use tickbook_core::{BookPayload, Event, PriceLevel};

/// Shape of a generated feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    /// Levels per side in the snapshot.
    pub depth: usize,
    /// Distance between adjacent price levels.
    pub tick: f64,
    /// Price both ladders are built around.
    pub mid: f64,
    /// Upper bound on entries per side in one update.
    pub diff_len: usize,
    /// Generator seed.
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            depth: 150,
            tick: 0.5,
            mid: 30_000.0,
            diff_len: 8,
            seed: 0x9e37_79b9_7f4a_7c15,
        }
    }
}

/// Produces a snapshot followed by random sorted diffs.
///
/// Diffs touch levels inside twice the snapshot depth, so they mix
/// inserts, replacements and deletions.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    config: FeedConfig,
    state: u64,
    timestamp: u64,
}

impl FeedGenerator {
    /// Creates a generator.
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            state: config.seed | 1,
            timestamp: 0,
        }
    }

    /// Returns a full snapshot of `depth` levels per side.
    pub fn snapshot(&mut self) -> BookPayload {
        self.timestamp += 1;
        let depth = self.config.depth;
        let asks = (0..depth)
            .map(|i| PriceLevel::new(self.ask_price(i), self.quantity(1)))
            .collect();
        let bids = (0..depth)
            .map(|i| PriceLevel::new(self.bid_price(i), self.quantity(1)))
            .collect();
        self.payload(asks, bids)
    }

    /// Returns a diff with strictly ordered entries on both sides.
    pub fn update(&mut self) -> BookPayload {
        self.timestamp += 1;
        let asks = self
            .indices()
            .into_iter()
            .map(|i| PriceLevel::new(self.ask_price(i), self.quantity(0)))
            .collect();
        let bids = self
            .indices()
            .into_iter()
            .map(|i| PriceLevel::new(self.bid_price(i), self.quantity(0)))
            .collect();
        self.payload(asks, bids)
    }

    /// Returns one snapshot line followed by `updates` update lines.
    pub fn lines(&mut self, updates: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(updates + 1);
        lines.push(render(&Event::Snapshot(self.snapshot())));
        for _ in 0..updates {
            lines.push(render(&Event::Update(self.update())));
        }
        lines
    }

    fn payload(&self, asks: Vec<PriceLevel>, bids: Vec<PriceLevel>) -> BookPayload {
        BookPayload {
            timestamp: self.timestamp,
            channel: "market.synthetic.depth".to_string(),
            asks,
            bids,
        }
    }

    fn ask_price(&self, index: usize) -> f64 {
        self.config.mid + self.config.tick * (index + 1) as f64
    }

    fn bid_price(&self, index: usize) -> f64 {
        self.config.mid - self.config.tick * (index + 1) as f64
    }

    // Increasing ladder indices, i.e. best first for either side.
    fn indices(&mut self) -> Vec<usize> {
        let range = self.config.depth * 2;
        let count = 1 + self.next() as usize % self.config.diff_len.max(1);
        let mut out = Vec::with_capacity(count);
        let mut index = self.next() as usize % 4;
        while out.len() < count && index < range {
            out.push(index);
            index += 1 + self.next() as usize % 4;
        }
        out
    }

    fn quantity(&mut self, min: u64) -> i64 {
        (min + self.next() % (11 - min)) as i64
    }

    // xorshift64
    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Renders an event as one feed line.
#[must_use]
pub fn render(event: &Event) -> String {
    let pairs = |levels: &[PriceLevel]| -> Vec<(f64, i64)> {
        levels.iter().map(|l| (l.price, l.quantity)).collect()
    };

    match event {
        Event::Ping => json!({ "ping": 0 }).to_string(),
        Event::Snapshot(payload) | Event::Update(payload) => json!({
            "ch": payload.channel,
            "ts": payload.timestamp,
            "tick": {
                "asks": pairs(&payload.asks),
                "bids": pairs(&payload.bids),
                "event": event.kind(),
            },
        })
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickbook_book::{BookHandler, VecStore};

    #[test]
    fn test_snapshot_depth() {
        let mut feed = FeedGenerator::new(FeedConfig::default());
        let snapshot = feed.snapshot();

        assert_eq!(snapshot.asks.len(), 150);
        assert_eq!(snapshot.bids.len(), 150);
        assert!(snapshot.asks.iter().all(|l| l.quantity > 0));
        assert!(snapshot.asks[0].price < snapshot.asks[1].price);
        assert!(snapshot.bids[0].price > snapshot.bids[1].price);
    }

    #[test]
    fn test_generator_is_deterministic() {
        let mut a = FeedGenerator::new(FeedConfig::default());
        let mut b = FeedGenerator::new(FeedConfig::default());
        assert_eq!(a.lines(20), b.lines(20));
    }

    #[test]
    fn test_updates_strictly_ordered() {
        let mut feed = FeedGenerator::new(FeedConfig::default());
        for _ in 0..200 {
            let update = feed.update();
            assert!(!update.asks.is_empty());
            assert!(update.asks.windows(2).all(|w| w[0].price < w[1].price));
            assert!(update.bids.windows(2).all(|w| w[0].price > w[1].price));
        }
    }

    #[test]
    fn test_lines_replay_cleanly() {
        let mut feed = FeedGenerator::new(FeedConfig::default());
        let mut handler = BookHandler::<VecStore>::new();

        for line in feed.lines(500) {
            let event = tickbook_feed::classify_str(&line).unwrap();
            handler.on_event(event).unwrap();
        }
        assert_eq!(handler.stats().snapshots, 1);
        assert_eq!(handler.stats().rejected, 0);
    }

    #[test]
    fn test_render_ping() {
        assert_eq!(
            tickbook_feed::classify_str(&render(&Event::Ping)).unwrap(),
            Event::Ping
        );
    }
}
