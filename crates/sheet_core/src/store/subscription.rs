//! Snapshot subscriber registry.

use crate::model::sheet::Sheet;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Callback invoked with the new snapshot after each applied mutation.
pub type SnapshotListener = Box<dyn FnMut(&Arc<Sheet>) + Send>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered set of listeners. Notification order is subscription order.
#[derive(Default)]
pub struct Subscribers {
    listeners: BTreeMap<SubscriptionId, SnapshotListener>,
    next_id: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Sheet>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes one listener. Returns `false` for unknown or stale handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `snapshot` to every listener synchronously.
    pub fn notify(&mut self, snapshot: &Arc<Sheet>) {
        for listener in self.listeners.values_mut() {
            listener(snapshot);
        }
    }
}

impl Debug for Subscribers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Subscribers;
    use crate::model::sheet::Sheet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn notifies_in_subscription_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut subscribers = Subscribers::new();
        for tag in ["first", "second"] {
            let calls = Arc::clone(&calls);
            subscribers.subscribe(move |_| calls.lock().unwrap().push(tag));
        }

        subscribers.notify(&Arc::new(Sheet::default()));
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_delivery_and_ids_are_not_reused() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut subscribers = Subscribers::new();
        let counter = Arc::clone(&hits);
        let id = subscribers.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        let next = subscribers.subscribe(|_| {});
        assert_ne!(id, next);

        subscribers.notify(&Arc::new(Sheet::default()));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(subscribers.len(), 1);
    }
}
