//! Snapshot fan-out to live subscribers.
//!
//! [`Broadcaster`] keeps a registry of bounded channels, one per connected
//! observer. Publishing never blocks and never fails: a subscriber whose
//! channel is closed, or whose buffer is full because it stopped reading,
//! is marked during the pass and pruned after it. Every publish carries the
//! full document, so a pruned observer recovers by reconnecting.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;
use uuid::Uuid;

/// Default per-subscriber buffer, in snapshots.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 64;

/// Opaque identifier of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receiving end of one subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    id: SubscriberId,
    rx: mpsc::Receiver<T>,
}

impl<T> Subscription<T> {
    /// The handle to pass to [`Broadcaster::unsubscribe`].
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the subscription has been removed from the
    /// registry and every buffered snapshot has been read.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Take the next buffered snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

/// Delivery summary of one [`Broadcaster::publish`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that accepted the snapshot.
    pub delivered: usize,
    /// Subscribers pruned because delivery failed.
    pub dropped: usize,
}

/// Registry of subscribers and best-effort fan-out.
#[derive(Debug)]
pub struct Broadcaster<T> {
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<T>>>,
    buffer: usize,
}

impl<T: Clone> Broadcaster<T> {
    /// Create a broadcaster whose subscribers each buffer up to `buffer`
    /// snapshots. A zero buffer is raised to one.
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            buffer: buffer.max(1),
        }
    }

    /// Register an observer and queue `initial` as its first snapshot.
    pub fn subscribe(&self, initial: T) -> Subscription<T> {
        let (tx, rx) = mpsc::channel(self.buffer);
        // The channel is fresh and has room for at least one message.
        let _ = tx.try_send(initial);

        let id = SubscriberId::new();
        let mut subscribers = self.registry();
        subscribers.insert(id, tx);
        debug!(subscriber = %id, total = subscribers.len(), "Subscriber registered");

        Subscription { id, rx }
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.registry();
        let removed = subscribers.remove(&id).is_some();
        if removed {
            debug!(subscriber = %id, total = subscribers.len(), "Subscriber removed");
        }
        removed
    }

    /// Deliver `snapshot` to every registered observer.
    ///
    /// Observers that cannot take it right now are dropped from the
    /// registry; the rest still receive it.
    pub fn publish(&self, snapshot: &T) -> PublishReport {
        let mut subscribers = self.registry();
        let mut report = PublishReport::default();
        let mut failed = Vec::new();

        for (id, tx) in subscribers.iter() {
            match tx.try_send(snapshot.clone()) {
                Ok(()) => report.delivered = report.delivered.saturating_add(1),
                Err(TrySendError::Closed(_)) => {
                    debug!(subscriber = %id, "Subscriber channel closed");
                    failed.push(*id);
                }
                Err(TrySendError::Full(_)) => {
                    debug!(subscriber = %id, "Subscriber buffer full, dropping slow observer");
                    failed.push(*id);
                }
            }
        }

        for id in &failed {
            subscribers.remove(id);
        }
        report.dropped = failed.len();
        report
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<SubscriberId, mpsc::Sender<T>>> {
        // Nothing panics while the guard is held; recover the map regardless.
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_BUFFER)
    }
}
