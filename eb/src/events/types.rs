//! Event types
//!
//! An event is an (ID, payload) pair: something that happened, awaiting
//! delivery at the next pump. Payloads are opaque bytes; the bus never
//! inspects them.

use std::fmt;
use std::sync::Arc;

/// Numeric topic identifier an event is raised under.
pub type EventId = u32;

/// Unique handle to a registered subscription.
///
/// Handles are allocated monotonically for the lifetime of a bus and are
/// never reused, so a stale handle can never alias a later subscription.
pub type SubscriptionId = u64;

/// Opaque event payload.
///
/// Cheap to clone: every clone shares the same backing bytes, so the
/// payload handed to each subscriber compares equal to what the producer
/// passed to `trigger`.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload(Arc<[u8]>);

impl Payload {
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload").field("len", &self.len()).finish()
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self(Arc::from(text.as_bytes()))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self(Arc::from(text.into_bytes()))
    }
}

/// A raised-but-undelivered event sitting on the pending queue.
#[derive(Clone, Debug)]
pub struct PendingEvent {
    pub id: EventId,
    pub payload: Payload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_equality_across_clones() {
        let payload = Payload::from("hello");
        let clone = payload.clone();
        assert_eq!(payload, clone);
        assert_eq!(clone.as_bytes(), b"hello");
    }

    #[test]
    fn test_payload_from_conversions() {
        assert_eq!(Payload::from("abc"), Payload::from(vec![b'a', b'b', b'c']));
        assert_eq!(Payload::from(String::from("abc")), Payload::from(&b"abc"[..]));
        assert!(Payload::empty().is_empty());
    }

    #[test]
    fn test_payload_debug_is_opaque() {
        let payload = Payload::from("secret");
        let rendered = format!("{:?}", payload);
        assert!(rendered.contains("len"));
        assert!(!rendered.contains("secret"));
    }
}
