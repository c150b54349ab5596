//! Indexed binary-heap engine
//!
//! An array-backed min-heap over [`NodeKey`]s whose nodes embed their own
//! heap position. The embedded position is what turns the usual O(n) "find
//! the element first" step of removal and priority updates into an O(1)
//! lookup, leaving just the O(log n) sift.
//!
//! The heap is **stable**: equal priorities dequeue in insertion order,
//! enforced by a per-queue insertion counter that participates in every
//! comparison.
//!
//! # Time complexity
//!
//! | Operation          | Complexity |
//! |--------------------|------------|
//! | `enqueue`          | O(log n)   |
//! | `dequeue`          | O(log n)   |
//! | `first`            | O(1)       |
//! | `update_priority`  | O(log n)   |
//! | `remove`           | O(log n)   |
//! | `contains`         | O(1)       |
//! | `resize` / `clear` | O(n)       |
//!
//! # Layout
//!
//! Positions are 0-based: the root lives at index 0 and the children of `i`
//! at `2i + 1` and `2i + 2`. All parent/child arithmetic in this module
//! assumes that convention.
//!
//! # Capacity
//!
//! Capacity is fixed at construction and changed only by the explicit
//! [`resize`](IndexedBinaryHeap::resize); the hot path never allocates.
//! Enqueueing into a full queue is a contract violation: checked builds
//! panic, release builds are unspecified (the backing array grows). Callers
//! wanting transparent growth should use
//! [`SharedPriorityQueue`](crate::SharedPriorityQueue).
//!
//! # Example
//!
//! ```rust
//! use indexed_priority_queue::{IndexedBinaryHeap, NodeArena};
//!
//! let mut arena = NodeArena::with_capacity(16);
//! let mut heap = IndexedBinaryHeap::with_capacity(16);
//!
//! let reload = arena.insert("reload", 0u32);
//! let fire = arena.insert("fire", 0);
//!
//! heap.enqueue(&mut arena, reload, 5);
//! heap.enqueue(&mut arena, fire, 2);
//! assert_eq!(heap.first(), Some(fire));
//!
//! // O(log n) reprioritization through the handle
//! heap.update_priority(&mut arena, reload, 1).unwrap();
//! assert_eq!(heap.dequeue(&mut arena), Some(reload));
//! assert_eq!(heap.dequeue(&mut arena), Some(fire));
//! ```

use std::marker::PhantomData;

use crate::node::{NodeArena, NodeKey, QueueNode, UNQUEUED};
use crate::traits::{Compare, NaturalOrder, QueueError};

#[cfg(any(debug_assertions, feature = "checked"))]
use crate::node::QueueId;

const MISSING_NODE: &str = "queue references a released node";

/// A stable indexed binary min-heap over an external [`NodeArena`].
///
/// The engine stores only keys; node lifetime belongs to the arena. Every
/// operation that can move nodes takes `&mut NodeArena` so the engine can
/// write back positions.
///
/// There is no internal synchronization; `&mut self` makes single-writer
/// access a compile-time property. Wrap the queue in a lock to share it
/// (see [`SharedPriorityQueue`](crate::SharedPriorityQueue)).
#[derive(Debug)]
pub struct IndexedBinaryHeap<T, P, C = NaturalOrder> {
    /// Keys in heap order; `heap[i]`'s children sit at `2i + 1` and `2i + 2`.
    heap: Vec<NodeKey>,
    max_nodes: usize,
    next_order: u64,
    cmp: C,
    #[cfg(any(debug_assertions, feature = "checked"))]
    id: QueueId,
    _marker: PhantomData<fn(T, P)>,
}

impl<T, P> IndexedBinaryHeap<T, P>
where
    P: Ord,
{
    /// Creates a queue that holds at most `max_nodes` nodes, ordered by the
    /// priority type's natural ordering.
    pub fn with_capacity(max_nodes: usize) -> Self {
        Self::with_comparator(max_nodes, NaturalOrder)
    }
}

impl<T, P, C: Compare<P>> IndexedBinaryHeap<T, P, C> {
    /// Creates a queue that holds at most `max_nodes` nodes, ordered by an
    /// explicit comparator.
    pub fn with_comparator(max_nodes: usize, cmp: C) -> Self {
        #[cfg(any(debug_assertions, feature = "checked"))]
        assert!(max_nodes > 0, "queue capacity must be at least 1");

        Self {
            heap: Vec::with_capacity(max_nodes),
            max_nodes,
            next_order: 0,
            cmp,
            #[cfg(any(debug_assertions, feature = "checked"))]
            id: QueueId::next(),
            _marker: PhantomData,
        }
    }

    /// Number of enqueued nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no nodes are enqueued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Maximum number of nodes the queue holds before `enqueue` becomes a
    /// contract violation
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_nodes
    }

    /// The root: minimum priority, earliest insertion on ties. `None` when
    /// empty.
    #[inline]
    pub fn first(&self) -> Option<NodeKey> {
        self.heap.first().copied()
    }

    /// O(1) membership test.
    ///
    /// True only if `key` is live *and* the slot its node points at actually
    /// holds `key`; a stale or corrupted position never passes by landing
    /// on some other node's slot.
    pub fn contains(&self, arena: &NodeArena<T, P>, key: NodeKey) -> bool {
        match arena.get(key) {
            Some(node) => {
                let pos = node.pos() as usize;
                pos < self.heap.len() && self.heap[pos] == key
            }
            None => false,
        }
    }

    /// Enqueues a node, overwriting its priority with `priority`.
    ///
    /// The node must be unbound and the queue below capacity; both are
    /// contract violations otherwise (checked builds panic).
    pub fn enqueue(&mut self, arena: &mut NodeArena<T, P>, key: NodeKey, priority: P) {
        if let Some(node) = arena.get_mut(key) {
            node.set_priority(priority);
        }
        self.enqueue_preset(arena, key);
    }

    /// Enqueues a node at the priority already stored on it (from
    /// [`NodeArena::insert`] or an earlier enqueue).
    pub fn enqueue_preset(&mut self, arena: &mut NodeArena<T, P>, key: NodeKey) {
        #[cfg(any(debug_assertions, feature = "checked"))]
        {
            let node = arena.get(key).expect("enqueue of a key not in the arena");
            assert!(!node.is_enqueued(), "node is already enqueued");
            assert!(node.owner().is_none(), "node still belongs to a queue");
            assert!(
                self.heap.len() < self.max_nodes,
                "queue is full (max_size {})",
                self.max_nodes
            );
        }

        let pos = self.heap.len();
        let order = self.next_order;
        self.next_order += 1;

        let node = arena.get_mut(key).expect("enqueue of a key not in the arena");
        node.set_pos(pos as u32);
        node.set_order(order);
        #[cfg(any(debug_assertions, feature = "checked"))]
        node.set_owner(Some(self.id));

        self.heap.push(key);
        self.sift_up(arena, pos);
        self.validate(arena);
    }

    /// Unbinds and returns the root. The node stays in the arena and can be
    /// re-enqueued, here or in another queue.
    pub fn dequeue(&mut self, arena: &mut NodeArena<T, P>) -> Option<NodeKey> {
        let root = *self.heap.first()?;
        self.unbind(arena, root);

        let last = self.heap.pop().expect("heap is non-empty here");
        if !self.heap.is_empty() {
            self.heap[0] = last;
            arena.get_mut(last).expect(MISSING_NODE).set_pos(0);
            self.sift_down(arena, 0);
        }

        self.validate(arena);
        Some(root)
    }

    /// Re-sorts a node after a priority change, in O(log n).
    ///
    /// This is the only sanctioned way to change the priority of an
    /// enqueued node.
    pub fn update_priority(
        &mut self,
        arena: &mut NodeArena<T, P>,
        key: NodeKey,
        priority: P,
    ) -> Result<(), QueueError> {
        if !self.contains(arena, key) {
            return Err(QueueError::NotEnqueued);
        }

        let node = arena.get_mut(key).expect(MISSING_NODE);
        node.set_priority(priority);
        let pos = node.pos() as usize;

        self.resift(arena, pos);
        self.validate(arena);
        Ok(())
    }

    /// Unbinds an arbitrary node in O(log n). The node need not be the root.
    pub fn remove(&mut self, arena: &mut NodeArena<T, P>, key: NodeKey) -> Result<(), QueueError> {
        if !self.contains(arena, key) {
            return Err(QueueError::NotEnqueued);
        }

        let pos = arena.get(key).expect(MISSING_NODE).pos() as usize;
        self.unbind(arena, key);

        let last = self.heap.pop().expect("heap is non-empty here");
        if pos < self.heap.len() {
            // The removed node was not the last: relocate the former last
            // node into the gap and re-sort it in whichever direction the
            // invariant demands.
            self.heap[pos] = last;
            arena.get_mut(last).expect(MISSING_NODE).set_pos(pos as u32);
            self.resift(arena, pos);
        }

        self.validate(arena);
        Ok(())
    }

    /// Grows (or shrinks) the capacity, the single sanctioned O(n)
    /// operation. Positions of live nodes are unchanged.
    pub fn resize(&mut self, max_nodes: usize) -> Result<(), QueueError> {
        if max_nodes == 0 || max_nodes < self.heap.len() {
            return Err(QueueError::CapacityTooSmall);
        }

        let mut heap = Vec::with_capacity(max_nodes);
        heap.extend_from_slice(&self.heap);
        self.heap = heap;
        self.max_nodes = max_nodes;
        Ok(())
    }

    /// Unbinds every node, O(n). Nodes stay in the arena.
    pub fn clear(&mut self, arena: &mut NodeArena<T, P>) {
        for &key in &self.heap {
            if let Some(node) = arena.get_mut(key) {
                node.set_pos(UNQUEUED);
                #[cfg(any(debug_assertions, feature = "checked"))]
                node.set_owner(None);
            }
        }
        self.heap.clear();
    }

    /// Enqueued keys in heap-array order (not sorted order). Mutating the
    /// queue invalidates the iterator through the borrow.
    pub fn iter(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.heap.iter().copied()
    }

    /// O(n) whole-array invariant check: every parent beats its children
    /// under the stable comparison, and every node's embedded position
    /// points back at its own slot.
    ///
    /// For tests and debugging; checked builds run it after every mutation.
    pub fn is_valid_queue(&self, arena: &NodeArena<T, P>) -> bool {
        for (i, &key) in self.heap.iter().enumerate() {
            let node = match arena.get(key) {
                Some(node) => node,
                None => return false,
            };
            if node.pos() as usize != i {
                return false;
            }
            for child in [2 * i + 1, 2 * i + 2] {
                if child >= self.heap.len() {
                    continue;
                }
                match arena.get(self.heap[child]) {
                    Some(child_node) if !self.beats(child_node, node) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// The stable comparison: priority first, insertion order on ties.
    /// `beats(a, a)` is false.
    #[inline]
    fn beats(&self, a: &QueueNode<T, P>, b: &QueueNode<T, P>) -> bool {
        match self.cmp.compare(a.priority(), b.priority()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => a.insertion_order() < b.insertion_order(),
            std::cmp::Ordering::Greater => false,
        }
    }

    fn unbind(&self, arena: &mut NodeArena<T, P>, key: NodeKey) {
        let node = arena.get_mut(key).expect(MISSING_NODE);
        node.set_pos(UNQUEUED);
        #[cfg(any(debug_assertions, feature = "checked"))]
        node.set_owner(None);
    }

    /// Restores the invariant for the node at `pos` after its priority (or
    /// its occupant) changed: up if it now beats its parent, down otherwise.
    /// Sift-down is the correct no-op direction at the root.
    fn resift(&mut self, arena: &mut NodeArena<T, P>, pos: usize) {
        if pos > 0 {
            let parent = (pos - 1) / 2;
            let rises = {
                let node = arena.get(self.heap[pos]).expect(MISSING_NODE);
                let parent_node = arena.get(self.heap[parent]).expect(MISSING_NODE);
                self.beats(node, parent_node)
            };
            if rises {
                self.sift_up(arena, pos);
                return;
            }
        }
        self.sift_down(arena, pos);
    }

    /// Moves the node at `pos` toward the root while it beats its parent.
    /// Hole-based: parents slide down, the node is written once at the end.
    fn sift_up(&mut self, arena: &mut NodeArena<T, P>, pos: usize) {
        let key = self.heap[pos];
        let mut hole = pos;

        while hole > 0 {
            let parent = (hole - 1) / 2;
            let parent_key = self.heap[parent];
            let rises = {
                let node = arena.get(key).expect(MISSING_NODE);
                let parent_node = arena.get(parent_key).expect(MISSING_NODE);
                self.beats(node, parent_node)
            };
            if !rises {
                break;
            }

            self.heap[hole] = parent_key;
            arena.get_mut(parent_key).expect(MISSING_NODE).set_pos(hole as u32);
            hole = parent;
        }

        if hole != pos {
            self.heap[hole] = key;
            arena.get_mut(key).expect(MISSING_NODE).set_pos(hole as u32);
        }
    }

    /// Moves the node at `pos` toward the leaves while either child beats
    /// it, always descending into the higher-priority child.
    fn sift_down(&mut self, arena: &mut NodeArena<T, P>, pos: usize) {
        let len = self.heap.len();
        let key = self.heap[pos];
        let mut hole = pos;

        loop {
            let left = 2 * hole + 1;
            if left >= len {
                break;
            }

            // Pick the higher-priority child; beats() settles priority ties
            // by insertion order.
            let right = left + 1;
            let mut child = left;
            if right < len {
                let left_node = arena.get(self.heap[left]).expect(MISSING_NODE);
                let right_node = arena.get(self.heap[right]).expect(MISSING_NODE);
                if self.beats(right_node, left_node) {
                    child = right;
                }
            }

            let child_key = self.heap[child];
            let descends = {
                let child_node = arena.get(child_key).expect(MISSING_NODE);
                let node = arena.get(key).expect(MISSING_NODE);
                self.beats(child_node, node)
            };
            if !descends {
                break;
            }

            self.heap[hole] = child_key;
            arena.get_mut(child_key).expect(MISSING_NODE).set_pos(hole as u32);
            hole = child;
        }

        if hole != pos {
            self.heap[hole] = key;
            arena.get_mut(key).expect(MISSING_NODE).set_pos(hole as u32);
        }
    }

    #[cfg(any(debug_assertions, feature = "checked"))]
    fn validate(&self, arena: &NodeArena<T, P>) {
        assert!(
            self.is_valid_queue(arena),
            "heap invariant violated; was a priority changed without update_priority()?"
        );
    }

    #[cfg(not(any(debug_assertions, feature = "checked")))]
    #[inline(always)]
    fn validate(&self, _arena: &NodeArena<T, P>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(cap: usize) -> (NodeArena<&'static str, u32>, IndexedBinaryHeap<&'static str, u32>) {
        (NodeArena::with_capacity(cap), IndexedBinaryHeap::with_capacity(cap))
    }

    #[test]
    fn new_queue_is_empty() {
        let (_, heap) = setup(8);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.max_size(), 8);
        assert_eq!(heap.first(), None);
    }

    #[test]
    fn dequeues_in_priority_order() {
        let (mut arena, mut heap) = setup(8);
        let keys: Vec<_> = [2u32, 5, 1, 3, 4]
            .iter()
            .map(|&p| {
                let k = arena.insert("node", p);
                heap.enqueue_preset(&mut arena, k);
                k
            })
            .collect();

        let mut order = Vec::new();
        while let Some(k) = heap.dequeue(&mut arena) {
            order.push(*arena.get(k).unwrap().priority());
        }
        assert_eq!(order, vec![1, 2, 3, 4, 5]);

        // All unbound again
        for k in keys {
            assert!(!arena.get(k).unwrap().is_enqueued());
            assert!(!heap.contains(&arena, k));
        }
    }

    #[test]
    fn equal_priorities_dequeue_fifo() {
        let (mut arena, mut heap) = setup(8);
        let names = ["a", "b", "c", "d", "e"];
        for name in names {
            let k = arena.insert(name, 1);
            heap.enqueue_preset(&mut arena, k);
        }

        let mut order = Vec::new();
        while let Some(k) = heap.dequeue(&mut arena) {
            order.push(*arena.get(k).unwrap().data());
        }
        assert_eq!(order, names);
    }

    #[test]
    fn enqueue_overwrites_priority() {
        let (mut arena, mut heap) = setup(4);
        let k = arena.insert("x", 100);
        heap.enqueue(&mut arena, k, 7);
        assert_eq!(*arena.get(k).unwrap().priority(), 7);
    }

    #[test]
    fn update_priority_moves_leaf_to_root() {
        let (mut arena, mut heap) = setup(8);
        let mut keys = Vec::new();
        for p in [1u32, 2, 3, 4, 5] {
            let k = arena.insert("n", p);
            heap.enqueue_preset(&mut arena, k);
            keys.push(k);
        }

        // The priority-5 node is a leaf; make it the minimum.
        heap.update_priority(&mut arena, keys[4], 0).unwrap();
        assert_eq!(heap.first(), Some(keys[4]));
        assert_eq!(heap.dequeue(&mut arena), Some(keys[4]));
        assert!(heap.is_valid_queue(&arena));
    }

    #[test]
    fn update_priority_moves_root_downward() {
        let (mut arena, mut heap) = setup(8);
        let mut keys = Vec::new();
        for p in [1u32, 2, 3] {
            let k = arena.insert("n", p);
            heap.enqueue_preset(&mut arena, k);
            keys.push(k);
        }

        heap.update_priority(&mut arena, keys[0], 10).unwrap();
        assert_eq!(heap.first(), Some(keys[1]));
        assert!(heap.is_valid_queue(&arena));
    }

    #[test]
    fn update_priority_rejects_unbound_node() {
        let (mut arena, mut heap) = setup(4);
        let k = arena.insert("n", 1);
        assert_eq!(
            heap.update_priority(&mut arena, k, 2),
            Err(QueueError::NotEnqueued)
        );
    }

    #[test]
    fn remove_middle_node() {
        let (mut arena, mut heap) = setup(8);
        let a = arena.insert("a", 10);
        let b = arena.insert("b", 1);
        let c = arena.insert("c", 5);
        for k in [a, b, c] {
            heap.enqueue_preset(&mut arena, k);
        }

        heap.remove(&mut arena, c).unwrap();
        assert_eq!(heap.len(), 2);
        assert!(!heap.contains(&arena, c));
        assert_eq!(heap.dequeue(&mut arena), Some(b));
        assert_eq!(heap.dequeue(&mut arena), Some(a));
    }

    #[test]
    fn remove_last_node_truncates() {
        let (mut arena, mut heap) = setup(8);
        let a = arena.insert("a", 1);
        let b = arena.insert("b", 2);
        heap.enqueue_preset(&mut arena, a);
        heap.enqueue_preset(&mut arena, b);

        // b sits at the last array slot; removal must not disturb a.
        heap.remove(&mut arena, b).unwrap();
        assert_eq!(heap.first(), Some(a));
        assert!(heap.is_valid_queue(&arena));
    }

    #[test]
    fn remove_rejects_node_from_other_queue() {
        let (mut arena, mut heap) = setup(4);
        let mut other: IndexedBinaryHeap<&str, u32> = IndexedBinaryHeap::with_capacity(4);

        let k = arena.insert("n", 1);
        other.enqueue_preset(&mut arena, k);

        assert_eq!(heap.remove(&mut arena, k), Err(QueueError::NotEnqueued));
        assert!(other.contains(&arena, k));
    }

    #[test]
    fn contains_is_identity_not_bounds() {
        let (mut arena, mut heap) = setup(4);
        let a = arena.insert("a", 1);
        let b = arena.insert("b", 2);
        heap.enqueue_preset(&mut arena, a);
        heap.enqueue_preset(&mut arena, b);

        heap.dequeue(&mut arena); // a leaves; b now occupies slot 0
        assert!(!heap.contains(&arena, a));
        assert!(heap.contains(&arena, b));

        // A released key never matches, even though its slot is reused.
        heap.remove(&mut arena, b).unwrap();
        arena.remove(b);
        let c = arena.insert("c", 3);
        heap.enqueue_preset(&mut arena, c);
        assert!(!heap.contains(&arena, b));
    }

    #[test]
    fn dequeued_node_can_be_reenqueued() {
        let (mut arena, mut heap) = setup(4);
        let k = arena.insert("n", 5);
        heap.enqueue_preset(&mut arena, k);

        assert_eq!(heap.dequeue(&mut arena), Some(k));
        heap.enqueue(&mut arena, k, 1);
        assert_eq!(heap.first(), Some(k));
        assert_eq!(*arena.get(k).unwrap().priority(), 1);
    }

    #[test]
    fn node_moves_between_queues() {
        let mut arena: NodeArena<&str, u32> = NodeArena::with_capacity(4);
        let mut first: IndexedBinaryHeap<&str, u32> = IndexedBinaryHeap::with_capacity(4);
        let mut second: IndexedBinaryHeap<&str, u32> = IndexedBinaryHeap::with_capacity(4);

        let k = arena.insert("migrant", 3);
        first.enqueue_preset(&mut arena, k);
        assert_eq!(first.dequeue(&mut arena), Some(k));

        second.enqueue(&mut arena, k, 8);
        assert!(second.contains(&arena, k));
        assert!(!first.contains(&arena, k));
    }

    #[test]
    fn resize_preserves_live_nodes() {
        let (mut arena, mut heap) = setup(3);
        for p in [3u32, 1, 2] {
            let k = arena.insert("n", p);
            heap.enqueue_preset(&mut arena, k);
        }

        heap.resize(10).unwrap();
        assert_eq!(heap.max_size(), 10);
        assert_eq!(heap.len(), 3);

        let mut order = Vec::new();
        while let Some(k) = heap.dequeue(&mut arena) {
            order.push(*arena.get(k).unwrap().priority());
        }
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn resize_below_live_count_fails() {
        let (mut arena, mut heap) = setup(4);
        for p in [1u32, 2, 3] {
            let k = arena.insert("n", p);
            heap.enqueue_preset(&mut arena, k);
        }

        assert_eq!(heap.resize(2), Err(QueueError::CapacityTooSmall));
        assert_eq!(heap.resize(0), Err(QueueError::CapacityTooSmall));
        assert_eq!(heap.max_size(), 4);
    }

    #[test]
    fn clear_unbinds_everything() {
        let (mut arena, mut heap) = setup(4);
        let a = arena.insert("a", 1);
        let b = arena.insert("b", 2);
        heap.enqueue_preset(&mut arena, a);
        heap.enqueue_preset(&mut arena, b);

        heap.clear(&mut arena);
        assert!(heap.is_empty());
        assert!(!arena.get(a).unwrap().is_enqueued());
        assert!(!arena.get(b).unwrap().is_enqueued());

        // Cleared nodes are fresh again
        heap.enqueue_preset(&mut arena, b);
        assert_eq!(heap.first(), Some(b));
    }

    #[test]
    fn iter_walks_array_order() {
        let (mut arena, mut heap) = setup(8);
        for p in [4u32, 2, 6, 1] {
            let k = arena.insert("n", p);
            heap.enqueue_preset(&mut arena, k);
        }

        let keys: Vec<_> = heap.iter().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(keys[0], heap.first().unwrap());
        // Array order respects the invariant but is not sorted
        assert!(heap.is_valid_queue(&arena));
    }

    #[test]
    fn comparator_reverses_order() {
        let mut arena: NodeArena<(), u32> = NodeArena::with_capacity(4);
        let mut heap =
            IndexedBinaryHeap::with_comparator(4, |a: &u32, b: &u32| b.cmp(a));

        for p in [1u32, 3, 2] {
            let k = arena.insert((), p);
            heap.enqueue_preset(&mut arena, k);
        }

        let mut order = Vec::new();
        while let Some(k) = heap.dequeue(&mut arena) {
            order.push(*arena.get(k).unwrap().priority());
        }
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn stress_interleaved_operations() {
        let (mut arena, mut heap) = setup(512);
        let mut keys = Vec::new();

        for i in 0..512u32 {
            let k = arena.insert("n", (i * 7 + 13) % 512);
            heap.enqueue_preset(&mut arena, k);
            keys.push(k);
        }
        assert!(heap.is_valid_queue(&arena));

        // Remove every third node, update every fifth
        for (i, &k) in keys.iter().enumerate() {
            if i % 3 == 0 {
                heap.remove(&mut arena, k).unwrap();
            } else if i % 5 == 0 {
                heap.update_priority(&mut arena, k, (i as u32).wrapping_mul(31) % 512)
                    .unwrap();
            }
        }
        assert!(heap.is_valid_queue(&arena));

        let mut last = 0;
        while let Some(k) = heap.dequeue(&mut arena) {
            let p = *arena.get(k).unwrap().priority();
            assert!(p >= last, "heap order violated");
            last = p;
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "queue is full")]
    fn enqueue_past_capacity_panics_in_checked_builds() {
        let (mut arena, mut heap) = setup(3);
        for p in [1u32, 2, 3, 4] {
            let k = arena.insert("n", p);
            heap.enqueue_preset(&mut arena, k);
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "already enqueued")]
    fn double_enqueue_panics_in_checked_builds() {
        let (mut arena, mut heap) = setup(4);
        let k = arena.insert("n", 1);
        heap.enqueue_preset(&mut arena, k);
        heap.enqueue_preset(&mut arena, k);
    }
}
