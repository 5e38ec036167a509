//! # Notification Bus
//!
//! In-process publish/subscribe channel distributing roster events
//! to whatever UI surfaces are currently listening, independent of
//! which component or which remote client produced the change.
//!
//! ## Semantics
//!
//! - `publish` synchronously invokes every currently registered
//!   subscriber, in registration order.
//! - At-most-once, in-memory, fire-and-forget: no persistence, no
//!   replay. A subscriber registered after `publish` returns never
//!   sees that event.
//! - Fault isolation: a panicking subscriber is caught and logged;
//!   delivery to the remaining subscribers continues.
//!
//! ## Reentrancy
//!
//! The fan-out iterates over a snapshot of the subscriber list taken
//! before any callback runs, and the list lock is released before
//! the first invocation. A callback may therefore publish, subscribe,
//! or unsubscribe without deadlocking; subscribers added mid-fan-out
//! do not receive the in-flight event.
//!
//! ## Construction
//!
//! The bus is an explicitly constructed, injectable value — there is
//! no process-wide singleton — so tests instantiate isolated buses
//! per case.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::warn;

use roster_common::RosterEvent;

/// A registered subscriber callback.
type Callback = Arc<dyn Fn(&RosterEvent) + Send + Sync + 'static>;

// ════════════════════════════════════════════════════════════════════════════
// NOTIFICATION BUS
// ════════════════════════════════════════════════════════════════════════════

/// In-process, best-effort event fan-out.
#[derive(Default)]
pub struct NotificationBus {
    /// Registration-ordered subscriber list. Entries are keyed by a
    /// monotonically assigned id so `unsubscribe` removes exactly
    /// one registration.
    subscribers: Mutex<Vec<(u64, Callback)>>,
    /// Next registration id.
    next_id: AtomicU64,
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

impl NotificationBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback and returns its [`Subscription`] guard.
    ///
    /// The callback is invoked synchronously on the publisher's
    /// call stack for every event published while the subscription
    /// is live. Dropping or cancelling the guard removes exactly
    /// this registration.
    pub fn subscribe<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&RosterEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscribers.lock().push((id, Arc::new(callback)));
        Subscription {
            bus: Arc::downgrade(self),
            id,
        }
    }

    /// Delivers `event` to every subscriber registered at the moment
    /// of the call, in registration order.
    ///
    /// A panicking subscriber is caught, logged, and skipped; the
    /// rest of the fan-out proceeds.
    pub fn publish(&self, event: &RosterEvent) {
        // Snapshot before invoking anything: callbacks may mutate
        // the subscriber list reentrantly.
        let snapshot: Vec<(u64, Callback)> = self.subscribers.lock().clone();

        for (id, callback) in snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| callback(event)));
            if outcome.is_err() {
                warn!(subscriber_id = id, "subscriber panicked during fan-out; continuing");
            }
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.lock().retain(|(sid, _)| *sid != id);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SUBSCRIPTION
// ════════════════════════════════════════════════════════════════════════════

/// Guard for one bus registration.
///
/// Dropping the guard (or calling [`cancel`](Subscription::cancel))
/// removes the registration. [`detach`](Subscription::detach) leaves
/// the registration live for the bus's lifetime.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    bus: Weak<NotificationBus>,
    id: u64,
}

impl Subscription {
    /// Removes the registration now.
    pub fn cancel(self) {
        // Drop does the work.
    }

    /// Leaves the registration live until the bus itself is dropped.
    pub fn detach(mut self) {
        self.bus = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
