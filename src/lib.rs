//! Stable indexed binary-heap priority queues
//!
//! This crate provides one heap engine with three faces, built for
//! latency-sensitive workloads (pathfinding, event simulation, schedulers)
//! where enqueue, dequeue, reprioritize, and arbitrary removal must all be
//! fast, deterministic, and allocation-free after construction.
//!
//! - [`IndexedBinaryHeap`]: the engine. Nodes live in a caller-owned
//!   [`NodeArena`] and embed their own heap position, so removal and
//!   priority updates skip the usual O(n) search and cost O(log n).
//!   Fixed capacity, no locking, no allocation on the hot path.
//! - [`BoundedPriorityQueue`]: the engine plus a private arena, giving
//!   plain `enqueue(item, priority)` ergonomics with a handle back for
//!   O(log n) updates and removals. Still fixed-capacity.
//! - [`SharedPriorityQueue`]: a mutex around the bounded queue that also
//!   hides capacity (automatic doubling) and handles (by-value lookup).
//!   The convenient choice when throughput is not the bottleneck.
//!
//! All three are **stable**: equal priorities dequeue in insertion order.
//!
//! # Quick start
//!
//! ```rust
//! use indexed_priority_queue::SharedPriorityQueue;
//!
//! let queue = SharedPriorityQueue::new();
//! queue.enqueue("compile", 2u32);
//! queue.enqueue("link", 3);
//! queue.enqueue("parse", 1);
//!
//! assert_eq!(queue.dequeue(), Ok("parse"));
//! assert_eq!(queue.dequeue(), Ok("compile"));
//! assert_eq!(queue.dequeue(), Ok("link"));
//! ```
//!
//! For the hot path, use the engine directly and keep the handles:
//!
//! ```rust
//! use indexed_priority_queue::{IndexedBinaryHeap, NodeArena};
//!
//! let mut arena = NodeArena::with_capacity(1024);
//! let mut open = IndexedBinaryHeap::with_capacity(1024);
//!
//! let a = arena.insert((4, 2), 10u64); // payload, priority
//! let b = arena.insert((1, 3), 4);
//!
//! open.enqueue_preset(&mut arena, a);
//! open.enqueue_preset(&mut arena, b);
//!
//! // A shorter route to `a` was found
//! open.update_priority(&mut arena, a, 3).unwrap();
//! assert_eq!(open.dequeue(&mut arena), Some(a));
//! ```
//!
//! # Checked builds
//!
//! Contract violations (enqueue into a full queue, enqueue a node twice,
//! priorities mutated behind the engine's back) panic when
//! `debug_assertions` are on or the `checked` feature is enabled; release
//! builds skip those checks for throughput and their behavior on misuse is
//! unspecified but memory-safe. Recoverable conditions are ordinary
//! [`Result`]s and [`Option`]s; see [`QueueError`].

pub mod bounded;
pub mod indexed;
pub mod node;
pub mod shared;
pub mod traits;

pub use bounded::BoundedPriorityQueue;
pub use indexed::IndexedBinaryHeap;
pub use node::{NodeArena, NodeKey, QueueNode};
pub use shared::SharedPriorityQueue;
pub use traits::{Compare, NaturalOrder, PriorityQueue, QueueError};
