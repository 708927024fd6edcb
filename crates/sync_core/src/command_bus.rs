use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{Arc, Mutex, PoisonError, Weak},
};

use shared::{
    contract::GESTURE_COMMAND_EVENT,
    domain::{CommandMessage, TAP_CONFIDENCE},
};
use tracing::{error, trace};

type Listener = Arc<dyn Fn(&CommandMessage) + Send + Sync>;

/// Process-wide broadcast channel for gesture commands. Created once at
/// startup and handed to surfaces by explicit injection; sender and
/// receivers never hold references to each other.
///
/// Delivery is synchronous within the dispatching turn, in registration
/// order, at most once, with no buffering: a message dispatched with zero
/// listeners is dropped, and a listener registered afterwards never sees it.
pub struct CommandBus {
    inner: Mutex<BusInner>,
}

struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl CommandBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(BusInner {
                next_id: 0,
                listeners: Vec::new(),
            }),
        })
    }

    /// Broadcasts a command built from recognizer output. Never fails; with
    /// no listeners mounted the message is simply dropped.
    pub fn dispatch(&self, action: &str, gesture_kind: &str, confidence: f64) {
        self.deliver(CommandMessage::new(action, gesture_kind, confidence));
    }

    /// Broadcasts a command for a deterministic UI tap (confidence fixed at
    /// [`TAP_CONFIDENCE`]).
    pub fn dispatch_tap(&self, action: &str) {
        self.dispatch(action, "tap", TAP_CONFIDENCE);
    }

    fn deliver(&self, message: CommandMessage) {
        // Snapshot the listener list so a handler unsubscribing itself or a
        // peer mid-dispatch cannot affect delivery of this message.
        let snapshot: Vec<(u64, Listener)> = self.lock_inner().listeners.clone();

        trace!(
            event = GESTURE_COMMAND_EVENT,
            action = %message.action,
            listeners = snapshot.len(),
            "dispatching gesture command"
        );

        for (listener_id, listener) in snapshot {
            // A panicking listener must not rob the remaining listeners of
            // this dispatch; it is reported and delivery continues.
            if catch_unwind(AssertUnwindSafe(|| listener(&message))).is_err() {
                error!(
                    listener_id,
                    action = %message.action,
                    "gesture command listener panicked during delivery"
                );
            }
        }
    }

    /// Registers a listener and returns the capability to deregister it.
    /// Identical handlers registered twice are independent registrations.
    pub fn subscribe(
        self: &Arc<Self>,
        listener: impl Fn(&CommandMessage) + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.lock_inner();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription {
            bus: Arc::downgrade(self),
            id,
        }
    }

    fn remove(&self, id: u64) {
        self.lock_inner().listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, BusInner> {
        // Listener panics are caught outside the lock, so a poisoned guard
        // still holds a consistent list.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Revocable registration handle returned by [`CommandBus::subscribe`].
/// Unsubscribing twice is a no-op; dropping the handle without
/// unsubscribing leaves the listener mounted.
#[derive(Clone)]
pub struct Subscription {
    bus: Weak<CommandBus>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.id);
        }
    }
}

#[cfg(test)]
#[path = "tests/command_bus_tests.rs"]
mod tests;
