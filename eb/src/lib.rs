//! EventBus - deferred-dispatch pub/sub for single-process applications
//!
//! Producers raise events identified by a numeric ID plus an opaque
//! payload; interested components register callbacks against that ID
//! ahead of time; a later explicit `process` call drains pending events
//! and invokes every matching callback. Useful wherever an explicit pump
//! point beats interrupt-style immediate dispatch: game loops, daemons,
//! embedded control loops.
//!
//! # Core Concepts
//!
//! - **Deferred dispatch**: `trigger` only queues. Nothing runs until
//!   `process` is called, inside the caller's stack.
//! - **Snapshot isolation**: the subscriber list for an event is fixed
//!   when the event is popped, so reentrant registry mutation is safe.
//! - **Contained failures**: a callback error is logged and counted, and
//!   the drain moves on. One broken subscriber cannot starve the queue.
//!
//! # Modules
//!
//! - [`queue`] - generic FIFO queue with stable positional indices
//! - [`events`] - subscriber registry, event bus, dispatch loop
//! - [`config`] - bootstrap settings loaded through confstore
//! - [`logging`] - tracing subscriber setup for the eb binary
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod events;
pub mod logging;
pub mod queue;

pub use config::AppConfig;
pub use events::{
    BusConfig, BusError, EventBus, EventHandler, EventId, Payload, PendingEvent, ProcessReport,
    SubscriberRegistry, Subscription, SubscriptionId, create_event_bus,
};
pub use queue::{Queue, QueueError};
