//! Observable single-writer state container.
//!
//! [`StateHolder`] keeps one snapshot of a state value and broadcasts every change
//! to its subscribers. Each update runs a closure against the current value under
//! the channel lock, so an update always produces a complete new snapshot and
//! concurrent updates never interleave field writes.
//!
//! The holder is backed by `tokio::sync::watch`, whose primitives work without a
//! running runtime; only awaiting subscribers need an executor.

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

/// Snapshot store with subscribe/publish semantics.
#[derive(Debug)]
pub struct StateHolder<T> {
    tx: watch::Sender<T>,
}

impl<T> StateHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a holder publishing `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a clone of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Atomically modifies the state and notifies subscribers.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.tx.send_modify(f);
    }

    /// Atomically modifies the state if `f` returns `true`.
    ///
    /// Subscribers are only notified when `f` reports a modification. `f` must
    /// leave the value untouched when it returns `false`.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.tx.send_if_modified(f)
    }

    /// Returns a receiver observing every future snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Returns a stream yielding the current snapshot and then every change.
    ///
    /// Intermediate snapshots may be skipped when the consumer is slower than the
    /// producer; the latest snapshot is always delivered.
    #[must_use]
    pub fn stream(&self) -> BoxStream<'static, T> {
        let rx = self.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let snapshot = rx.borrow_and_update().clone();
            Some((snapshot, (rx, false)))
        })
        .boxed()
    }
}
