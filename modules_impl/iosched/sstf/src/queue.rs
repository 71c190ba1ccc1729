//! # Request Queue
//!
//! Pending requests in submission order.
//!
//! Requests live in an arena of slots linked by explicit `prev`/`next`
//! indices, with an id → slot map so removal and neighbor lookup do not need
//! a scan. The queue order is what `predecessor`/`successor` report; it has
//! nothing to do with seek order.
//!
//! ```text
//!   head                                      tail
//!    │                                         │
//!    ▼                                         ▼
//! ┌──────┐ next ┌──────┐ next ┌──────┐ next ┌──────┐
//! │slot 2│─────▶│slot 0│─────▶│slot 3│─────▶│slot 1│
//! │      │◀─────│      │◀─────│      │◀─────│      │
//! └──────┘ prev └──────┘ prev └──────┘ prev └──────┘
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::{SchedError, SchedResult};
use crate::request::{IoRequest, RequestId};

type SlotIndex = usize;

// =============================================================================
// NODE
// =============================================================================

#[derive(Debug)]
struct Node<R> {
    request: R,
    prev: Option<SlotIndex>,
    next: Option<SlotIndex>,
}

// =============================================================================
// REQUEST QUEUE
// =============================================================================

/// Insertion-ordered queue of pending requests
#[derive(Debug)]
pub struct RequestQueue<R> {
    /// Slot arena; `None` marks a free slot
    slots: Vec<Option<Node<R>>>,
    /// Free slot indices, reused before the arena grows
    free: Vec<SlotIndex>,
    /// Request id → slot
    index: HashMap<RequestId, SlotIndex>,
    /// Oldest request
    head: Option<SlotIndex>,
    /// Newest request
    tail: Option<SlotIndex>,
}

impl<R: IoRequest> RequestQueue<R> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    /// Create an empty queue with room for `capacity` requests
    ///
    /// Fails with [`SchedError::OutOfMemory`] instead of aborting when the
    /// reservation cannot be satisfied.
    pub fn try_with_capacity(capacity: usize) -> SchedResult<Self> {
        let mut queue = Self::new();
        queue.slots.try_reserve(capacity)?;
        queue.free.try_reserve(capacity)?;
        queue.index.try_reserve(capacity)?;
        Ok(queue)
    }

    /// Number of queued requests
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Is a request with this id queued?
    pub fn contains(&self, id: RequestId) -> bool {
        self.index.contains_key(&id)
    }

    /// Append a request at the tail
    pub fn push_back(&mut self, request: R) -> SchedResult<()> {
        let id = request.id();
        if self.index.contains_key(&id) {
            return Err(SchedError::AlreadyQueued(id));
        }

        let node = Node {
            request,
            prev: self.tail,
            next: None,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            },
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            },
        };

        match self.tail {
            Some(tail) => {
                if let Some(last) = self.node_mut(tail) {
                    last.next = Some(slot);
                }
            },
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.index.insert(id, slot);

        Ok(())
    }

    /// Detach a request, returning its handle
    ///
    /// Returns `None` and leaves the queue untouched if `id` is not queued.
    pub fn remove(&mut self, id: RequestId) -> Option<R> {
        let slot = self.index.remove(&id)?;
        let node = self.slots.get_mut(slot)?.take()?;

        match node.prev {
            Some(prev) => {
                if let Some(before) = self.node_mut(prev) {
                    before.next = node.next;
                }
            },
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(after) = self.node_mut(next) {
                    after.prev = node.prev;
                }
            },
            None => self.tail = node.prev,
        }

        self.free.push(slot);
        Some(node.request)
    }

    /// Request queued immediately before `id`
    pub fn predecessor(&self, id: RequestId) -> Option<&R> {
        let prev = self.node(*self.index.get(&id)?)?.prev?;
        self.node(prev).map(|n| &n.request)
    }

    /// Request queued immediately after `id`
    pub fn successor(&self, id: RequestId) -> Option<&R> {
        let next = self.node(*self.index.get(&id)?)?.next?;
        self.node(next).map(|n| &n.request)
    }

    /// Look up a queued request by id
    pub fn get(&self, id: RequestId) -> Option<&R> {
        self.node(*self.index.get(&id)?).map(|n| &n.request)
    }

    /// Oldest queued request
    pub fn front(&self) -> Option<&R> {
        self.node(self.head?).map(|n| &n.request)
    }

    /// Newest queued request
    pub fn back(&self) -> Option<&R> {
        self.node(self.tail?).map(|n| &n.request)
    }

    /// Iterate in queue order, oldest first
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            queue: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    fn node(&self, slot: SlotIndex) -> Option<&Node<R>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: SlotIndex) -> Option<&mut Node<R>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }
}

impl<R: IoRequest> Default for RequestQueue<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R: IoRequest> IntoIterator for &'a RequestQueue<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// ITERATOR
// =============================================================================

/// Queue-order iterator over [`RequestQueue`]
#[derive(Debug)]
pub struct Iter<'a, R> {
    queue: &'a RequestQueue<R>,
    cursor: Option<SlotIndex>,
    remaining: usize,
}

impl<R> Clone for Iter<'_, R> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.slots.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.request)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}

// =============================================================================
// TESTS
// =============================================================================
