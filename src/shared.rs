//! Shared, unbounded priority queue
//!
//! [`SharedPriorityQueue`] wraps a [`BoundedPriorityQueue`] in a
//! [`parking_lot::Mutex`] and hides the two things the inner queue makes
//! explicit: capacity (doubled inline whenever an enqueue would overflow)
//! and handles (items are located by value with a linear scan). The result
//! is the convenient variant: slower per operation, but callable from
//! anywhere with plain values.
//!
//! Locking is deliberately coarse: one lock, held for the whole of every
//! call. Operations are short (O(log n) or O(n)) and run to completion; no
//! operation blocks on anything but the lock itself.
//!
//! Check-then-act across two calls is racy under concurrency, so every
//! fallible operation also has a `try_*` form that folds the check in:
//!
//! ```rust
//! use indexed_priority_queue::SharedPriorityQueue;
//!
//! let queue = SharedPriorityQueue::new();
//! queue.enqueue("job", 3u32);
//!
//! // Safe under races: no separate is_empty() check needed
//! while let Some(job) = queue.try_dequeue() {
//!     assert_eq!(job, "job");
//! }
//! ```

use parking_lot::Mutex;

use crate::bounded::BoundedPriorityQueue;
use crate::traits::{Compare, NaturalOrder, PriorityQueue, QueueError};

const DEFAULT_CAPACITY: usize = 16;

/// A stable, auto-resizing, thread-safe priority queue of plain values.
///
/// Items need no handle fields; they are found again by `==`. Duplicates
/// are allowed, and operations naming "an item" act on the first match in
/// heap-array order (not necessarily the lowest-priority copy).
pub struct SharedPriorityQueue<T, P, C = NaturalOrder> {
    inner: Mutex<BoundedPriorityQueue<T, P, C>>,
}

impl<T, P: Ord> SharedPriorityQueue<T, P> {
    /// Creates an empty queue with a small default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty queue pre-sized for `capacity` items. Capacity is
    /// only a hint here; the queue grows past it on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(BoundedPriorityQueue::with_capacity(capacity.max(1))),
        }
    }
}

impl<T, P: Ord> Default for SharedPriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, C: Compare<P>> SharedPriorityQueue<T, P, C> {
    /// Creates an empty queue ordered by an explicit comparator
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            inner: Mutex::new(BoundedPriorityQueue::with_comparator(DEFAULT_CAPACITY, cmp)),
        }
    }

    /// Number of enqueued items
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if no items are enqueued
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Removes every item
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Adds an item; the queue grows as needed, so this cannot fail.
    /// Duplicates are allowed. O(log n), amortized over resizes.
    pub fn enqueue(&self, item: T, priority: P) {
        let mut queue = self.inner.lock();
        Self::enqueue_locked(&mut queue, item, priority);
    }

    /// Removes and returns the minimum-priority item (FIFO on ties), or
    /// `Err(Empty)`
    pub fn dequeue(&self) -> Result<T, QueueError> {
        self.try_dequeue().ok_or(QueueError::Empty)
    }

    /// Like [`dequeue`](Self::dequeue), but `None` on empty, safe between
    /// racing consumers
    pub fn try_dequeue(&self) -> Option<T> {
        self.inner.lock().dequeue().map(|(item, _)| item)
    }

    /// O(n) whole-queue invariant sweep, for tests and debugging
    pub fn is_valid_queue(&self) -> bool {
        self.inner.lock().is_valid_queue()
    }

    fn enqueue_locked(queue: &mut BoundedPriorityQueue<T, P, C>, item: T, priority: P) {
        if queue.len() == queue.max_size() {
            // max(1) keeps a zero-capacity queue growable
            let doubled = (queue.max_size() * 2).max(1);
            queue
                .resize(doubled)
                .expect("doubling never shrinks below the live count");
        }
        queue.enqueue(item, priority);
    }
}

impl<T: Clone, P, C: Compare<P>> SharedPriorityQueue<T, P, C> {
    /// The item `dequeue` would return next, cloned out so no lock is held
    /// after the call. `Err(Empty)` on an empty queue.
    pub fn first(&self) -> Result<T, QueueError> {
        self.try_first().ok_or(QueueError::Empty)
    }

    /// Like [`first`](Self::first), but `None` on empty
    pub fn try_first(&self) -> Option<T> {
        self.inner.lock().peek().map(|(item, _)| item.clone())
    }

    /// Snapshot of the queue in heap-array order. Taken under the lock,
    /// returned unlocked, so it can go stale immediately under concurrency.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.lock().iter().map(|(item, _)| item.clone()).collect()
    }
}

impl<T: PartialEq, P, C: Compare<P>> SharedPriorityQueue<T, P, C> {
    /// Returns whether some enqueued item equals `item`. O(n).
    ///
    /// Under concurrency the answer can be stale by the time it is used;
    /// prefer the `try_*` operations over check-then-act.
    pub fn contains(&self, item: &T) -> bool {
        let queue = self.inner.lock();
        queue.find_key(item).is_some()
    }

    /// Adds the item only if no equal item is enqueued; returns whether it
    /// was added. O(n).
    pub fn enqueue_without_duplicates(&self, item: T, priority: P) -> bool {
        let mut queue = self.inner.lock();
        if queue.find_key(&item).is_some() {
            return false;
        }
        Self::enqueue_locked(&mut queue, item, priority);
        true
    }

    /// Removes the first enqueued item equal to `item`, or `Err(NotFound)`.
    /// O(n).
    pub fn remove(&self, item: &T) -> Result<(), QueueError> {
        if self.try_remove(item) {
            Ok(())
        } else {
            Err(QueueError::NotFound)
        }
    }

    /// Like [`remove`](Self::remove), but reports success as a flag, safe
    /// between `contains` races
    pub fn try_remove(&self, item: &T) -> bool {
        let mut queue = self.inner.lock();
        match queue.find_key(item) {
            Some(key) => queue.remove(key).is_ok(),
            None => false,
        }
    }

    /// Reprioritizes the first enqueued item equal to `item`, or
    /// `Err(NotFound)`. O(n) to find, O(log n) to re-sort.
    pub fn update_priority(&self, item: &T, priority: P) -> Result<(), QueueError> {
        if self.try_update_priority(item, priority) {
            Ok(())
        } else {
            Err(QueueError::NotFound)
        }
    }

    /// Like [`update_priority`](Self::update_priority), reporting success as
    /// a flag
    pub fn try_update_priority(&self, item: &T, priority: P) -> bool {
        let mut queue = self.inner.lock();
        match queue.find_key(item) {
            Some(key) => queue.update_priority(key, priority).is_ok(),
            None => false,
        }
    }
}

impl<T: PartialEq, P: Clone, C: Compare<P>> SharedPriorityQueue<T, P, C> {
    /// The priority of the first enqueued item equal to `item`, or
    /// `Err(NotFound)`. O(n).
    pub fn priority_of(&self, item: &T) -> Result<P, QueueError> {
        self.try_priority_of(item).ok_or(QueueError::NotFound)
    }

    /// Like [`priority_of`](Self::priority_of), but `None` when absent
    pub fn try_priority_of(&self, item: &T) -> Option<P> {
        let queue = self.inner.lock();
        let key = queue.find_key(item)?;
        queue.priority_of(key).cloned()
    }
}

impl<T, P, C: Compare<P>> PriorityQueue<T, P> for SharedPriorityQueue<T, P, C> {
    fn len(&self) -> usize {
        SharedPriorityQueue::len(self)
    }

    fn enqueue(&mut self, item: T, priority: P) {
        SharedPriorityQueue::enqueue(self, item, priority);
    }

    fn dequeue(&mut self) -> Option<(T, P)> {
        self.inner.lock().dequeue()
    }

    fn clear(&mut self) {
        SharedPriorityQueue::clear(self);
    }
}
