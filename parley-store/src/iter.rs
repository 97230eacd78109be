//! Per-subscriber iteration over store change events
//!
//! Each call to `InstanceStore::subscribe()` creates its own channel, so
//! every subscriber sees every event emitted after it subscribed.
//! - Blocking: `recv()`, `for event in iter`
//! - Non-blocking: `try_recv()`, `try_iter()`
//! - Timeout: `recv_timeout()`, `timeout_iter()`

use std::sync::mpsc;
use std::time::Duration;

use crate::event::ChangeEvent;

/// Blocking iterator over change events for one subscriber
///
/// Dropping the iterator unsubscribes; the store prunes closed channels on
/// the next emit.
pub struct ChangeIterator<Id> {
    rx: mpsc::Receiver<ChangeEvent<Id>>,
}

impl<Id> ChangeIterator<Id> {
    pub(crate) fn new(rx: mpsc::Receiver<ChangeEvent<Id>>) -> Self {
        Self { rx }
    }

    /// Block until the next event is available
    ///
    /// Returns `None` once the store and all its clones are dropped.
    pub fn recv(&self) -> Option<ChangeEvent<Id>> {
        self.rx.recv().ok()
    }

    /// Block until the next event or timeout expires
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ChangeEvent<Id>> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<ChangeEvent<Id>> {
        self.rx.try_recv().ok()
    }

    /// Drain the events queued so far without blocking
    pub fn try_iter(&self) -> TryIter<'_, Id> {
        TryIter { inner: self }
    }

    /// Iterate until no event arrives within `timeout`
    pub fn timeout_iter(&self, timeout: Duration) -> TimeoutIter<'_, Id> {
        TimeoutIter {
            inner: self,
            timeout,
        }
    }
}

impl<Id> Iterator for ChangeIterator<Id> {
    type Item = ChangeEvent<Id>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

/// Non-blocking iterator over currently queued events
pub struct TryIter<'a, Id> {
    inner: &'a ChangeIterator<Id>,
}

impl<'a, Id> Iterator for TryIter<'a, Id> {
    type Item = ChangeEvent<Id>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.try_recv()
    }
}

/// Blocking iterator with a per-item timeout
pub struct TimeoutIter<'a, Id> {
    inner: &'a ChangeIterator<Id>,
    timeout: Duration,
}

impl<'a, Id> Iterator for TimeoutIter<'a, Id> {
    type Item = ChangeEvent<Id>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.recv_timeout(self.timeout)
    }
}
