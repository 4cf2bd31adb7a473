//! Generic FIFO queue with stable positional indices
//!
//! The bus keeps its pending events on this queue, so the queue's ordering
//! contract is what makes event delivery first-in, first-out. Each item is
//! assigned a zero-based index at insertion time; the index stays attached
//! to the item for its whole lifetime, so positional lookups keep working
//! while the head is being drained.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, error};

/// Errors from queue operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// Pop was called on an empty queue. Expected during a drain, not fatal.
    #[error("queue is empty")]
    Empty,

    /// The backing storage could not grow.
    #[error("insufficient memory to grow queue")]
    OutOfResources,
}

struct Slot<T> {
    index: u64,
    item: T,
}

/// Ordered sequence of items with O(n) positional lookup.
///
/// `push` appends to the tail, `pop` removes the head. The length is read
/// from the same storage the pop removes from, so the count can never go
/// negative or drift out of sync with the contents.
pub struct Queue<T> {
    slots: VecDeque<Slot<T>>,
    next_index: u64,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            slots: VecDeque::new(),
            next_index: 0,
        }
    }

    /// Append an item to the tail of the queue.
    ///
    /// Returns the index assigned to the item. Indices are contiguous and
    /// monotonically increasing across appends, and an item keeps its index
    /// until it is popped.
    pub fn push(&mut self, item: T) -> Result<u64, QueueError> {
        if self.slots.try_reserve(1).is_err() {
            error!("could not add item to queue, insufficient memory");
            return Err(QueueError::OutOfResources);
        }

        let index = self.next_index;
        self.slots.push_back(Slot { index, item });
        self.next_index += 1;
        Ok(index)
    }

    /// Remove and return the head item (the oldest one).
    pub fn pop(&mut self) -> Result<T, QueueError> {
        match self.slots.pop_front() {
            Some(slot) => Ok(slot.item),
            None => Err(QueueError::Empty),
        }
    }

    /// Linear scan for the item whose recorded index matches `index`.
    pub fn get(&self, index: u64) -> Option<&T> {
        self.slots.iter().find(|slot| slot.index == index).map(|slot| &slot.item)
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Discard all items and reset indexing, as if freshly created.
    ///
    /// Payloads shared with other owners (e.g. behind an `Arc`) stay alive
    /// with those owners; only the queue's own hold on them is released.
    pub fn clear(&mut self) {
        debug!(discarded = self.slots.len(), "clearing queue");
        self.slots.clear();
        self.next_index = 0;
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_assigns_contiguous_indices() {
        let mut queue = Queue::new();
        assert_eq!(queue.push("a").unwrap(), 0);
        assert_eq!(queue.push("b").unwrap(), 1);
        assert_eq!(queue.push("c").unwrap(), 2);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut queue = Queue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();

        assert_eq!(queue.pop().unwrap(), 1);
        assert_eq!(queue.pop().unwrap(), 2);
        assert_eq!(queue.pop().unwrap(), 3);
    }

    #[test]
    fn test_pop_empty_returns_error() {
        let mut queue: Queue<u32> = Queue::new();
        assert_eq!(queue.pop(), Err(QueueError::Empty));

        // a failed pop must not disturb the count
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_get_by_index() {
        let mut queue = Queue::new();
        queue.push("a").unwrap();
        queue.push("b").unwrap();

        assert_eq!(queue.get(0), Some(&"a"));
        assert_eq!(queue.get(1), Some(&"b"));
        assert_eq!(queue.get(2), None);
    }

    #[test]
    fn test_indices_survive_head_removal() {
        let mut queue = Queue::new();
        queue.push("a").unwrap();
        queue.push("b").unwrap();
        queue.pop().unwrap();

        assert_eq!(queue.get(0), None);
        assert_eq!(queue.get(1), Some(&"b"));
        // appends keep counting from where they left off
        assert_eq!(queue.push("c").unwrap(), 2);
    }

    #[test]
    fn test_clear_discards_items_and_resets() {
        let mut queue = Queue::new();
        queue.push("a").unwrap();
        queue.push("b").unwrap();
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.push("c").unwrap(), 0);
    }

    proptest! {
        #[test]
        fn prop_fifo_order_preserved(items in proptest::collection::vec(any::<u32>(), 0..64)) {
            let mut queue = Queue::new();
            for item in &items {
                queue.push(*item).unwrap();
            }

            let mut drained = Vec::new();
            while let Ok(item) = queue.pop() {
                drained.push(item);
            }
            prop_assert_eq!(drained, items);
        }

        #[test]
        fn prop_indices_stay_attached_across_pops(pops in 0usize..8, extra in 1u64..8) {
            let mut queue = Queue::new();
            for n in 0..8u64 {
                prop_assert_eq!(queue.push(n).unwrap(), n);
            }
            for _ in 0..pops {
                queue.pop().unwrap();
            }
            for n in 8..8 + extra {
                prop_assert_eq!(queue.push(n).unwrap(), n);
            }

            for n in 0..pops as u64 {
                prop_assert_eq!(queue.get(n), None);
            }
            for n in pops as u64..8 + extra {
                prop_assert_eq!(queue.get(n), Some(&n));
            }
            prop_assert_eq!(queue.len(), (8 + extra) as usize - pops);
        }
    }
}
