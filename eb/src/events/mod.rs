//! Deferred-dispatch event system
//!
//! The classic in-process pattern: producers raise events against numeric
//! IDs, components register callbacks ahead of time, and a caller-chosen
//! pump point drains everything pending in one synchronous pass. There is
//! no background thread; dispatch happens inside the stack of whoever
//! calls [`EventBus::process`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use eventbus::events::{EventBus, EventId, Payload};
//!
//! let bus = EventBus::new();
//!
//! let handle = bus.subscribe(1, |id: EventId, payload: &Payload| {
//!     println!("event {id}: {} bytes", payload.len());
//!     Ok(())
//! })?;
//!
//! bus.trigger(1, "first")?;
//! bus.trigger(1, "second")?;
//!
//! // both subscribers run here, in trigger order
//! let report = bus.process()?;
//! assert_eq!(report.processed, 2);
//!
//! bus.unsubscribe(handle)?;
//! bus.close()?;
//! ```
//!
//! # Guarantees
//!
//! - Events are delivered in trigger order relative to each other.
//! - The subscriber list for an event is snapshotted when the event is
//!   popped; a callback that mutates the registry never affects the
//!   in-flight dispatch.
//! - A callback error is logged and tallied; it never aborts the drain.
//! - Each pending event is delivered to exactly one `process` call, even
//!   with concurrent pumpers.

mod bus;
mod registry;
mod types;

pub use bus::{BusConfig, BusError, EventBus, ProcessReport, create_event_bus};
pub use registry::{EventHandler, SubscriberRegistry, Subscription};
pub use types::{EventId, Payload, PendingEvent, SubscriptionId};
