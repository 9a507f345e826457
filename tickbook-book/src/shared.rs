//! Book handler shared across threads.

use crate::book::{OrderBook, TopOfBook};
use crate::handler::{BookHandler, HandlerStats};
use crate::store::{LevelStore, VecStore};
use parking_lot::Mutex;
use std::sync::Arc;
use tickbook_core::{Event, Result};

/// A [`BookHandler`] behind a mutex, for hosts that touch one book from
/// several threads.
///
/// Every call holds the lock only for the duration of that call, so all
/// mutations and queries on the book are serialized.
#[derive(Debug)]
pub struct SharedBook<S = VecStore> {
    inner: Arc<Mutex<BookHandler<S>>>,
}

impl<S: LevelStore> SharedBook<S> {
    /// Creates a shared handler around an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BookHandler::new())),
        }
    }

    /// Processes one classified event under the lock.
    ///
    /// # Errors
    /// Same as [`BookHandler::on_event`].
    pub fn on_event(&self, event: Event) -> Result<Option<TopOfBook>> {
        self.inner.lock().on_event(event)
    }

    /// Returns the current top of book.
    ///
    /// # Errors
    /// Returns `Error::EmptyLadder` if either side is empty.
    pub fn top_of_book(&self) -> Result<TopOfBook> {
        self.inner.lock().top_of_book()
    }

    /// Runs a read-only query against the book under the lock.
    pub fn with_book<R>(&self, f: impl FnOnce(&OrderBook<S>) -> R) -> R {
        f(self.inner.lock().book())
    }

    /// Returns the handler's event counters.
    #[must_use]
    pub fn stats(&self) -> HandlerStats {
        self.inner.lock().stats()
    }
}

impl<S> Clone for SharedBook<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LevelStore> Default for SharedBook<S> {
    fn default() -> Self {
        Self::new()
    }
}
