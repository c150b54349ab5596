//! Bounded generic-item priority queue
//!
//! [`BoundedPriorityQueue`] pairs an [`IndexedBinaryHeap`] with a private
//! [`NodeArena`], trading the engine's explicit node handling for a plain
//! `enqueue(item, priority)` surface. Each enqueue boxes the item into an
//! internal node; the returned [`NodeKey`] is the handle for later O(log n)
//! removal or reprioritization.
//!
//! Capacity is fixed at construction, like the engine's: enqueueing a
//! full queue is a contract violation (checked builds panic), and
//! [`resize`](BoundedPriorityQueue::resize) is the explicit growth path.
//!
//! # Example
//!
//! ```rust
//! use indexed_priority_queue::BoundedPriorityQueue;
//!
//! let mut queue = BoundedPriorityQueue::with_capacity(8);
//! queue.enqueue("walk dog", 2u32);
//! let laundry = queue.enqueue("laundry", 5);
//! queue.enqueue("dishes", 3);
//!
//! // Laundry became urgent
//! queue.update_priority(laundry, 1).unwrap();
//!
//! assert_eq!(queue.dequeue(), Some(("laundry", 1)));
//! assert_eq!(queue.dequeue(), Some(("walk dog", 2)));
//! assert_eq!(queue.dequeue(), Some(("dishes", 3)));
//! ```

use crate::indexed::IndexedBinaryHeap;
use crate::node::{NodeArena, NodeKey};
use crate::traits::{Compare, NaturalOrder, PriorityQueue, QueueError};

/// A stable, fixed-capacity priority queue over caller items.
///
/// Keys returned from [`enqueue`](BoundedPriorityQueue::enqueue) are
/// single-use: once the item leaves the queue (dequeue or remove) the key
/// goes stale and later calls with it return
/// [`QueueError::NotEnqueued`].
pub struct BoundedPriorityQueue<T, P, C = NaturalOrder> {
    arena: NodeArena<T, P>,
    heap: IndexedBinaryHeap<T, P, C>,
}

impl<T, P: Ord> BoundedPriorityQueue<T, P> {
    /// Creates a queue holding at most `max_items`, ordered naturally
    pub fn with_capacity(max_items: usize) -> Self {
        Self::with_comparator(max_items, NaturalOrder)
    }
}

impl<T, P, C: Compare<P>> BoundedPriorityQueue<T, P, C> {
    /// Creates a queue holding at most `max_items`, ordered by `cmp`
    pub fn with_comparator(max_items: usize, cmp: C) -> Self {
        Self {
            arena: NodeArena::with_capacity(max_items),
            heap: IndexedBinaryHeap::with_comparator(max_items, cmp),
        }
    }

    /// Number of enqueued items
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no items are enqueued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Capacity; exceeding it on enqueue is a contract violation
    #[inline]
    pub fn max_size(&self) -> usize {
        self.heap.max_size()
    }

    /// Adds an item, returning the handle for later `update_priority`,
    /// `remove`, or `priority_of` calls.
    ///
    /// Duplicate items are fine; each gets its own node and handle.
    pub fn enqueue(&mut self, item: T, priority: P) -> NodeKey {
        let key = self.arena.insert(item, priority);
        self.heap.enqueue_preset(&mut self.arena, key);
        key
    }

    /// Removes and returns the minimum-priority item, FIFO on ties
    pub fn dequeue(&mut self) -> Option<(T, P)> {
        let key = self.heap.dequeue(&mut self.arena)?;
        self.arena.remove(key)
    }

    /// The item and priority that `dequeue` would return next
    pub fn peek(&self) -> Option<(&T, &P)> {
        let node = self.arena.get(self.heap.first()?)?;
        Some((node.data(), node.priority()))
    }

    /// Removes an arbitrary enqueued item by handle, O(log n)
    pub fn remove(&mut self, key: NodeKey) -> Result<(T, P), QueueError> {
        self.heap.remove(&mut self.arena, key)?;
        self.arena
            .remove(key)
            .ok_or(QueueError::NotEnqueued)
    }

    /// Changes an enqueued item's priority, O(log n)
    pub fn update_priority(&mut self, key: NodeKey, priority: P) -> Result<(), QueueError> {
        self.heap.update_priority(&mut self.arena, key, priority)
    }

    /// The priority behind a handle, or `None` if stale
    pub fn priority_of(&self, key: NodeKey) -> Option<&P> {
        Some(self.arena.get(key)?.priority())
    }

    /// The item behind a handle, or `None` if stale
    pub fn get(&self, key: NodeKey) -> Option<&T> {
        Some(self.arena.get(key)?.data())
    }

    /// Mutable access to the item behind a handle
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        Some(self.arena.get_mut(key)?.data_mut())
    }

    /// O(1) test of whether a handle is still enqueued here
    pub fn contains(&self, key: NodeKey) -> bool {
        self.heap.contains(&self.arena, key)
    }

    /// Grows (or shrinks) capacity; fails below the live count or to zero
    pub fn resize(&mut self, max_items: usize) -> Result<(), QueueError> {
        self.heap.resize(max_items)
    }

    /// Drops every enqueued item, O(n)
    pub fn clear(&mut self) {
        self.heap.clear(&mut self.arena);
        self.arena.clear();
    }

    /// Items and priorities in heap-array order (not sorted order)
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> + '_ {
        self.heap.iter().filter_map(|key| {
            let node = self.arena.get(key)?;
            Some((node.data(), node.priority()))
        })
    }

    /// O(n) invariant sweep; see
    /// [`IndexedBinaryHeap::is_valid_queue`]
    pub fn is_valid_queue(&self) -> bool {
        self.heap.is_valid_queue(&self.arena)
    }

    /// First handle (in heap-array order) whose item equals `item`
    pub(crate) fn find_key(&self, item: &T) -> Option<NodeKey>
    where
        T: PartialEq,
    {
        self.heap
            .iter()
            .find(|&key| self.arena.get(key).is_some_and(|node| node.data() == item))
    }
}

impl<T, P, C: Compare<P>> PriorityQueue<T, P> for BoundedPriorityQueue<T, P, C> {
    fn len(&self) -> usize {
        BoundedPriorityQueue::len(self)
    }

    fn enqueue(&mut self, item: T, priority: P) {
        BoundedPriorityQueue::enqueue(self, item, priority);
    }

    fn dequeue(&mut self) -> Option<(T, P)> {
        BoundedPriorityQueue::dequeue(self)
    }

    fn clear(&mut self) {
        BoundedPriorityQueue::clear(self);
    }
}
