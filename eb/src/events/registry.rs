//! Subscriber registry
//!
//! Maps event IDs to ordered callbacks. Each registration gets a handle
//! that is unique for the registry's lifetime. Lookups hand out snapshots,
//! so an in-flight dispatch is never affected by later mutation.

use std::sync::Arc;

use tracing::debug;

use super::types::{EventId, Payload, SubscriptionId};

/// A subscriber's callback capability.
///
/// Handlers receive the event's ID and payload. Returning an error marks
/// the delivery as failed for this subscriber only; the dispatch loop logs
/// it and moves on to the next subscriber.
pub trait EventHandler: Send + Sync {
    fn handle(&self, id: EventId, payload: &Payload) -> eyre::Result<()>;
}

impl<F> EventHandler for F
where
    F: Fn(EventId, &Payload) -> eyre::Result<()> + Send + Sync,
{
    fn handle(&self, id: EventId, payload: &Payload) -> eyre::Result<()> {
        self(id, payload)
    }
}

/// One registered (handle, event ID, callback) record.
#[derive(Clone)]
pub struct Subscription {
    pub handle: SubscriptionId,
    pub event_id: EventId,
    pub handler: Arc<dyn EventHandler>,
}

/// Registry of subscriptions, kept in subscription order.
#[derive(Default)]
pub struct SubscriberRegistry {
    records: Vec<Subscription>,
    last_handle: SubscriptionId,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new subscription and return its handle.
    pub fn add(&mut self, event_id: EventId, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        self.last_handle += 1;
        let handle = self.last_handle;
        self.records.push(Subscription {
            handle,
            event_id,
            handler,
        });
        debug!(handle, event_id, total = self.records.len(), "subscriber added");
        handle
    }

    /// Remove the subscription with the given handle.
    pub fn remove(&mut self, handle: SubscriptionId) -> Option<Subscription> {
        let pos = self.records.iter().position(|record| record.handle == handle)?;
        let record = self.records.remove(pos);
        debug!(handle, event_id = record.event_id, "subscriber removed");
        Some(record)
    }

    /// Independent snapshot of every handler registered for `event_id`,
    /// oldest subscription first.
    ///
    /// The returned handlers are shared references to the registered
    /// callbacks, not copies. Removing or adding subscriptions after the
    /// snapshot was taken does not change it.
    pub fn snapshot(&self, event_id: EventId) -> Vec<Arc<dyn EventHandler>> {
        self.records
            .iter()
            .filter(|record| record.event_id == event_id)
            .map(|record| Arc::clone(&record.handler))
            .collect()
    }

    /// Total number of subscriptions across all event IDs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(discarded = self.records.len(), "clearing subscriber registry");
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        hits: AtomicUsize,
    }

    impl EventHandler for CountingHandler {
        fn handle(&self, _id: EventId, _payload: &Payload) -> eyre::Result<()> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn noop() -> Arc<dyn EventHandler> {
        Arc::new(|_id: EventId, _payload: &Payload| Ok(()))
    }

    #[test]
    fn test_handles_are_unique_and_monotonic() {
        let mut registry = SubscriberRegistry::new();
        let first = registry.add(1, noop());
        let second = registry.add(1, noop());
        let third = registry.add(2, noop());

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut registry = SubscriberRegistry::new();
        let first = registry.add(1, noop());
        registry.remove(first).unwrap();

        let next = registry.add(1, noop());
        assert_ne!(first, next);
    }

    #[test]
    fn test_remove_unknown_handle_is_none() {
        let mut registry = SubscriberRegistry::new();
        registry.add(1, noop());
        assert!(registry.remove(99).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_filters_by_event_id_in_order() {
        let mut registry = SubscriberRegistry::new();
        let a = Arc::new(CountingHandler { hits: AtomicUsize::new(0) });
        let b = Arc::new(CountingHandler { hits: AtomicUsize::new(0) });
        registry.add(5, a.clone());
        registry.add(6, noop());
        registry.add(5, b.clone());

        let snapshot = registry.snapshot(5);
        assert_eq!(snapshot.len(), 2);
        for handler in &snapshot {
            handler.handle(5, &Payload::empty()).unwrap();
        }
        assert_eq!(a.hits.load(Ordering::SeqCst), 1);
        assert_eq!(b.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        let mut registry = SubscriberRegistry::new();
        let counter = Arc::new(CountingHandler { hits: AtomicUsize::new(0) });
        let handle = registry.add(5, counter.clone());

        let snapshot = registry.snapshot(5);
        registry.remove(handle).unwrap();
        registry.add(5, noop());

        assert_eq!(snapshot.len(), 1);
        snapshot[0].handle(5, &Payload::empty()).unwrap();
        assert_eq!(counter.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_snapshot_for_unknown_event_is_empty() {
        let mut registry = SubscriberRegistry::new();
        registry.add(5, noop());
        assert!(registry.snapshot(6).is_empty());
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = SubscriberRegistry::new();
        registry.add(1, noop());
        registry.add(2, noop());
        registry.clear();
        assert!(registry.is_empty());
    }
}
