//! Event bus - deferred-dispatch pub/sub
//!
//! Producers call [`EventBus::trigger`] to queue events; nothing is
//! delivered until some caller pumps the bus with [`EventBus::process`].
//! Subscribe, unsubscribe, trigger, and the pop step of a drain all
//! serialize on one lock per bus instance. Callbacks always run with that
//! lock released, so a slow or reentrant subscriber cannot block
//! producers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, error, warn};

use super::registry::{EventHandler, SubscriberRegistry};
use super::types::{EventId, Payload, PendingEvent, SubscriptionId};
use crate::queue::Queue;

/// Errors from bus operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusError {
    /// The bus has been closed. No operation is valid on it again; a new
    /// bus must be constructed.
    #[error("event bus is not initialised")]
    NotInitialized,

    /// `close` was called on a bus that is already closed.
    #[error("event bus is already closed")]
    AlreadyClosed,

    /// `unsubscribe` named a handle with no matching subscription.
    #[error("no subscription with handle {0}")]
    SubscriptionNotFound(SubscriptionId),
}

/// Tuning knobs for a bus instance.
#[derive(Debug, Clone, Default)]
pub struct BusConfig {
    /// Upper bound on the number of events drained by a single `process`
    /// call, to bound its worst-case latency when triggers arrive faster
    /// than pumping. `None` drains until the queue is empty.
    pub max_batch: Option<usize>,
}

/// Result of one `process` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Events popped and dispatched. An event counts whether or not any
    /// subscriber existed for its ID.
    pub processed: usize,
    /// Handler invocations that returned an error during this call.
    pub callback_failures: usize,
}

enum BusState {
    Open,
    Closed,
}

struct BusInner {
    state: BusState,
    registry: SubscriberRegistry,
    pending: Queue<PendingEvent>,
}

impl BusInner {
    fn check_open(&self) -> Result<(), BusError> {
        match self.state {
            BusState::Open => Ok(()),
            BusState::Closed => Err(BusError::NotInitialized),
        }
    }
}

/// In-process publish/subscribe event bus with an explicit pump point.
///
/// Constructing the bus initialises it; [`EventBus::close`] tears it down
/// and releases every subscription and pending event. Buses are
/// independent of each other: state is per-instance, never process-wide.
pub struct EventBus {
    config: BusConfig,
    inner: Mutex<BusInner>,
}

impl EventBus {
    /// Create a bus with default configuration.
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Create a bus with the given configuration.
    pub fn with_config(config: BusConfig) -> Self {
        debug!(?config, "creating event bus");
        Self {
            config,
            inner: Mutex::new(BusInner {
                state: BusState::Open,
                registry: SubscriberRegistry::new(),
                pending: Queue::new(),
            }),
        }
    }

    // Handlers run with the lock released, so a panicking subscriber can
    // never poison the guard mid-mutation; recover the inner state.
    fn lock(&self) -> MutexGuard<'_, BusInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` for events with `event_id`.
    ///
    /// Returns the subscription's unique handle. Handles are monotonically
    /// increasing and never reused for the lifetime of the bus.
    pub fn subscribe<H>(&self, event_id: EventId, handler: H) -> Result<SubscriptionId, BusError>
    where
        H: EventHandler + 'static,
    {
        let mut inner = self.lock();
        inner.check_open()?;
        Ok(inner.registry.add(event_id, Arc::new(handler)))
    }

    /// Remove the subscription with the given handle.
    pub fn unsubscribe(&self, handle: SubscriptionId) -> Result<(), BusError> {
        let mut inner = self.lock();
        inner.check_open()?;
        inner
            .registry
            .remove(handle)
            .map(|_| ())
            .ok_or(BusError::SubscriptionNotFound(handle))
    }

    /// Queue an event for delivery at the next pump.
    ///
    /// Never blocks and never dispatches synchronously. If the pending
    /// queue cannot grow, the event is dropped with an ERROR diagnostic
    /// and the producer keeps running; that degraded mode is deliberate.
    pub fn trigger(&self, event_id: EventId, payload: impl Into<Payload>) -> Result<(), BusError> {
        let mut inner = self.lock();
        inner.check_open()?;

        let payload = payload.into();
        debug!(event_id, payload_len = payload.len(), "triggering event");
        match inner.pending.push(PendingEvent { id: event_id, payload }) {
            Ok(_) => {
                debug!(pending = inner.pending.len(), "event queued");
                Ok(())
            }
            Err(_) => {
                error!(event_id, "could not queue event, insufficient memory; event dropped");
                Ok(())
            }
        }
    }

    /// Drain pending events and dispatch them to matching subscribers.
    ///
    /// Events are delivered in trigger order. For each event the
    /// subscriber list is snapshotted under the bus lock and the lock is
    /// released before any callback runs, so a callback may subscribe,
    /// unsubscribe, or trigger without affecting the current event's
    /// delivery. Popping is the atomic unit of ownership: concurrent
    /// `process` callers each deliver a disjoint set of events.
    ///
    /// A handler error is logged, tallied in the report, and never aborts
    /// the drain. Returns once the queue is empty or the configured batch
    /// cap is reached.
    pub fn process(&self) -> Result<ProcessReport, BusError> {
        self.lock().check_open()?;

        let mut report = ProcessReport::default();
        loop {
            if let Some(cap) = self.config.max_batch {
                if report.processed >= cap {
                    debug!(cap, "batch cap reached with events still pending");
                    break;
                }
            }

            // Pop one event and snapshot its subscribers in a single
            // critical section, then dispatch outside of it. A close
            // landing mid-drain clears the queue, so the next iteration
            // sees it empty and the drain ends there.
            let (event, handlers) = {
                let mut inner = self.lock();
                match inner.pending.pop() {
                    Ok(event) => {
                        let handlers = inner.registry.snapshot(event.id);
                        (event, handlers)
                    }
                    // pop only ever fails with Empty; the drain is done
                    Err(_) => break,
                }
            };

            if handlers.is_empty() {
                debug!(event_id = event.id, "no subscribers for event");
            } else {
                debug!(event_id = event.id, subscribers = handlers.len(), "dispatching event");
            }

            for handler in &handlers {
                if let Err(err) = handler.handle(event.id, &event.payload) {
                    warn!(event_id = event.id, error = %err, "subscriber callback failed");
                    report.callback_failures += 1;
                }
            }
            report.processed += 1;
        }

        debug!(
            processed = report.processed,
            failures = report.callback_failures,
            "process drained"
        );
        Ok(report)
    }

    /// Tear the bus down, releasing all subscriptions and pending events.
    ///
    /// Any further operation on the bus fails with
    /// [`BusError::NotInitialized`]; a second `close` fails with
    /// [`BusError::AlreadyClosed`].
    pub fn close(&self) -> Result<(), BusError> {
        let mut inner = self.lock();
        match inner.state {
            BusState::Closed => Err(BusError::AlreadyClosed),
            BusState::Open => {
                debug!(
                    subscribers = inner.registry.len(),
                    pending = inner.pending.len(),
                    "closing event bus"
                );
                inner.state = BusState::Closed;
                inner.registry.clear();
                inner.pending.clear();
                Ok(())
            }
        }
    }

    /// Number of raised-but-undelivered events.
    pub fn pending_events(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of live subscriptions across all event IDs.
    pub fn subscriber_count(&self) -> usize {
        self.lock().registry.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an event bus wrapped in an Arc for shared ownership.
pub fn create_event_bus() -> Arc<EventBus> {
    Arc::new(EventBus::new())
}
