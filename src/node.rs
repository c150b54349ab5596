//! Node handles and the arena that owns them
//!
//! A [`QueueNode`] bundles a caller payload with the bookkeeping the heap
//! engine maintains: the priority, the node's current position in the heap
//! array, and the insertion order that breaks priority ties. Nodes live in a
//! [`NodeArena`]; the engine's backing array only ever stores [`NodeKey`]s.
//!
//! Keys are generational. Once a node is released its key goes stale, and
//! every lookup through it misses instead of aliasing whatever node gets the
//! recycled slot. This is what makes `contains` on an old handle an identity
//! check rather than a mere bounds check.
//!
//! # Example
//!
//! ```rust
//! use indexed_priority_queue::{IndexedBinaryHeap, NodeArena};
//!
//! let mut arena: NodeArena<&str, u32> = NodeArena::with_capacity(8);
//! let mut heap = IndexedBinaryHeap::with_capacity(8);
//!
//! let walk = arena.insert("walk", 3);
//! let run = arena.insert("run", 1);
//!
//! heap.enqueue_preset(&mut arena, walk);
//! heap.enqueue_preset(&mut arena, run);
//!
//! assert_eq!(heap.dequeue(&mut arena), Some(run));
//! assert_eq!(arena.remove(run), Some(("run", 1)));
//!
//! // The key is stale now; lookups miss rather than hitting a recycled slot.
//! assert!(arena.get(run).is_none());
//! ```

use slotmap::{new_key_type, SlotMap};

#[cfg(any(debug_assertions, feature = "checked"))]
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Stable, generational handle to a node in a [`NodeArena`].
    pub struct NodeKey;
}

/// Heap position marking a node as not enqueued anywhere.
///
/// A sentinel instead of `Option<u32>` keeps the node one word smaller and
/// the hot-path position writes branch-free.
pub(crate) const UNQUEUED: u32 = u32::MAX;

/// Identifies one engine instance. Checked builds stamp it onto enqueued
/// nodes to catch double-enqueue and cross-queue misuse.
#[cfg(any(debug_assertions, feature = "checked"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QueueId(u64);

#[cfg(any(debug_assertions, feature = "checked"))]
impl QueueId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        QueueId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A caller item plus the fields the engine needs to find and order it.
///
/// The priority is readable but only the engine writes it (through
/// `enqueue`/`update_priority`); mutating a priority in place would corrupt
/// the heap without the engine noticing until the next checked-mode sweep.
/// The payload is the caller's to mutate freely via [`data_mut`].
///
/// [`data_mut`]: QueueNode::data_mut
#[derive(Debug)]
pub struct QueueNode<T, P> {
    data: T,
    priority: P,
    pos: u32,
    order: u64,
    #[cfg(any(debug_assertions, feature = "checked"))]
    owner: Option<QueueId>,
}

impl<T, P> QueueNode<T, P> {
    fn new(data: T, priority: P) -> Self {
        Self {
            data,
            priority,
            pos: UNQUEUED,
            order: 0,
            #[cfg(any(debug_assertions, feature = "checked"))]
            owner: None,
        }
    }

    /// The caller payload
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the caller payload
    #[inline]
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// The node's current priority
    #[inline]
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// The node's position in the heap array, or `None` if unbound
    #[inline]
    pub fn queue_index(&self) -> Option<usize> {
        if self.pos == UNQUEUED {
            None
        } else {
            Some(self.pos as usize)
        }
    }

    /// The order this node was enqueued in, relative to its queue.
    /// Meaningful only while the node is bound.
    #[inline]
    pub fn insertion_order(&self) -> u64 {
        self.order
    }

    /// Returns true if the node is currently bound to a queue
    #[inline]
    pub fn is_enqueued(&self) -> bool {
        self.pos != UNQUEUED
    }

    #[inline]
    pub(crate) fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: u32) {
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn set_priority(&mut self, priority: P) {
        self.priority = priority;
    }

    #[inline]
    pub(crate) fn set_order(&mut self, order: u64) {
        self.order = order;
    }

    #[cfg(any(debug_assertions, feature = "checked"))]
    #[inline]
    pub(crate) fn owner(&self) -> Option<QueueId> {
        self.owner
    }

    #[cfg(any(debug_assertions, feature = "checked"))]
    #[inline]
    pub(crate) fn set_owner(&mut self, owner: Option<QueueId>) {
        self.owner = owner;
    }
}

/// Caller-owned storage for [`QueueNode`]s.
///
/// The arena owns node lifetime; queues only coordinate keys into it. One
/// arena can back several queues, and a node dequeued from one queue can be
/// re-enqueued into another without touching the allocator.
#[derive(Debug)]
pub struct NodeArena<T, P> {
    nodes: SlotMap<NodeKey, QueueNode<T, P>>,
}

impl<T, P> NodeArena<T, P> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Creates an arena with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Adds an unbound node and returns its key.
    ///
    /// The priority given here is where the node will sort if enqueued via
    /// [`enqueue_preset`]; `enqueue` overwrites it.
    ///
    /// [`enqueue_preset`]: crate::IndexedBinaryHeap::enqueue_preset
    pub fn insert(&mut self, data: T, priority: P) -> NodeKey {
        self.nodes.insert(QueueNode::new(data, priority))
    }

    /// Releases a node's slot, returning its payload and priority.
    ///
    /// The node must be unbound; releasing a node still enqueued somewhere
    /// leaves that queue holding a dangling key.
    pub fn remove(&mut self, key: NodeKey) -> Option<(T, P)> {
        #[cfg(any(debug_assertions, feature = "checked"))]
        if let Some(node) = self.nodes.get(key) {
            assert!(
                !node.is_enqueued(),
                "released a node that is still enqueued"
            );
        }

        self.nodes.remove(key).map(|node| (node.data, node.priority))
    }

    /// Returns the node for `key`, or `None` for stale keys
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&QueueNode<T, P>> {
        self.nodes.get(key)
    }

    /// Mutable variant of [`get`](NodeArena::get)
    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut QueueNode<T, P>> {
        self.nodes.get_mut(key)
    }

    /// Returns true if `key` refers to a live node
    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes, bound or not
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node. Any queue still referencing this arena must be
    /// cleared first.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<T, P> Default for NodeArena<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
