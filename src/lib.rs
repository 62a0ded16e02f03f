//! Fibonacci heap frontier for shortest-path style searches
//!
//! This crate provides a Fibonacci heap keyed by signed integers that tracks
//! each element's identity, so a search can keep one entry per node and
//! tighten its distance in place instead of pushing duplicates.
//!
//! # Features
//!
//! - **Insert** and **find-min**: O(1)
//! - **Decrease key**: O(1) amortized, via cuts and cascading cuts
//! - **Extract-min**: O(log n) amortized, via degree-based consolidation
//! - **Upsert** ([`FibonacciHeap::update`]): inserts an unseen element or
//!   lowers a known element's key; never raises a key
//!
//! Nodes live in a slot-map arena and refer to each other by key, so the
//! circular sibling lists and parent links need no unsafe code.
//!
//! The heap is not synchronized. Share it across threads only behind a lock
//! held for each whole call.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_frontier::{FibonacciHeap, Update};
//!
//! let mut frontier = FibonacciHeap::new();
//! frontier.update("A", 5);
//! frontier.update("B", 3);
//! frontier.update("C", 8);
//! assert_eq!(frontier.first(), Some((&"B", 3)));
//!
//! assert_eq!(frontier.poll(), Some(("B", 3)));
//! assert_eq!(frontier.update("C", 1), Update::Decreased { previous: 8 });
//! assert_eq!(frontier.update("A", 9), Update::Unchanged { current: 5 });
//!
//! assert_eq!(frontier.poll(), Some(("C", 1)));
//! assert_eq!(frontier.poll(), Some(("A", 5)));
//! assert_eq!(frontier.poll(), None);
//! ```

mod arena;
pub mod degree;
pub mod fibonacci;
pub mod traits;
pub mod validate;

pub use fibonacci::FibonacciHeap;
pub use traits::{Frontier, HeapError, Key, Update};
pub use validate::InvariantViolation;
