//! Book handler enforcing feed sequencing.

use crate::book::{OrderBook, TopOfBook};
use crate::store::{LevelStore, VecStore};
use tickbook_core::{BookPayload, Error, Event, Result};

/// Lifecycle state of the handled book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Waiting for the initial snapshot.
    Initializing,
    /// Snapshot applied; updates are merged.
    Active,
}

/// Counters for events seen by a handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerStats {
    /// Snapshots applied.
    pub snapshots: u64,
    /// Updates merged.
    pub updates: u64,
    /// Pings received.
    pub pings: u64,
    /// Events rejected without touching the book.
    pub rejected: u64,
}

/// Applies classified events to an [`OrderBook`].
///
/// Updates are rejected until the first snapshot arrives, and messages
/// older than the last applied timestamp are rejected as stale.
#[derive(Debug)]
pub struct BookHandler<S = VecStore> {
    book: OrderBook<S>,
    state: BookState,
    stats: HandlerStats,
}

impl<S: LevelStore> BookHandler<S> {
    /// Creates a handler around an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            state: BookState::Initializing,
            stats: HandlerStats::default(),
        }
    }

    /// Processes one classified event.
    ///
    /// Returns the top of book after a snapshot or update. Returns `None`
    /// for a ping, and for an applied message that leaves a side empty.
    ///
    /// An error means the event was rejected and the book is unchanged.
    ///
    /// # Errors
    /// - `Error::Uninitialized` for an update before the first snapshot
    /// - `Error::StaleMessage` for a timestamp older than the last one
    /// - `Error::InvalidValue` for an out-of-order diff
    pub fn on_event(&mut self, event: Event) -> Result<Option<TopOfBook>> {
        match event {
            Event::Ping => {
                self.stats.pings += 1;
                Ok(None)
            }
            Event::Snapshot(payload) => {
                self.admit(&payload)?;
                self.book.replace(payload);
                self.stats.snapshots += 1;

                if self.state == BookState::Initializing {
                    self.state = BookState::Active;
                    tracing::info!(
                        timestamp = self.book.last_update_time(),
                        "book initialized from snapshot"
                    );
                }

                Ok(self.applied_top())
            }
            Event::Update(payload) => {
                if self.state == BookState::Initializing {
                    return Err(self.reject(Error::Uninitialized));
                }
                self.admit(&payload)?;
                self.book.merge(payload).map_err(|e| self.reject(e))?;
                self.stats.updates += 1;

                Ok(self.applied_top())
            }
        }
    }

    /// Returns the current top of book.
    ///
    /// # Errors
    /// Returns `Error::EmptyLadder` if either side is empty.
    pub fn top_of_book(&self) -> Result<TopOfBook> {
        self.book.top_of_book()
    }

    /// Returns the handled book.
    #[must_use]
    pub fn book(&self) -> &OrderBook<S> {
        &self.book
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> BookState {
        self.state
    }

    /// Returns the event counters.
    #[must_use]
    pub fn stats(&self) -> HandlerStats {
        self.stats
    }

    fn applied_top(&self) -> Option<TopOfBook> {
        match self.book.top_of_book() {
            Ok(top) => Some(top),
            Err(error) => {
                tracing::debug!(
                    timestamp = self.book.last_update_time(),
                    %error,
                    "message applied with a one-sided book"
                );
                None
            }
        }
    }

    fn admit(&mut self, payload: &BookPayload) -> Result<()> {
        let last = self.book.last_update_time();
        if self.state == BookState::Active && payload.timestamp < last {
            return Err(self.reject(Error::StaleMessage {
                last,
                received: payload.timestamp,
            }));
        }

        if let Some(channel) = self.book.channel()
            && channel != payload.channel
        {
            tracing::warn!(
                expected = channel,
                received = %payload.channel,
                "message from a different channel"
            );
        }
        Ok(())
    }

    fn reject(&mut self, error: Error) -> Error {
        self.stats.rejected += 1;
        error
    }
}

impl<S: LevelStore> Default for BookHandler<S> {
    fn default() -> Self {
        Self::new()
    }
}
