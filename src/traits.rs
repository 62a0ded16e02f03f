//! Common types for the frontier heap
//!
//! This module provides:
//!
//! - [`Key`]: the priority type (a signed path length)
//! - [`HeapError`]: errors reported by key-decreasing operations
//! - [`Update`]: what an upsert did to the heap
//! - [`Frontier`]: the operations a search driver needs from its open set
//!
//! The [`Frontier`] trait lets shortest-path style consumers be written
//! against the interface rather than against [`FibonacciHeap`] directly.
//!
//! [`FibonacciHeap`]: crate::fibonacci::FibonacciHeap

use thiserror::Error;

/// Priority of an element: lower keys are extracted first.
///
/// Keys are finite signed integers. There is no sentinel for "unreachable";
/// such nodes are simply never inserted.
pub type Key = i64;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The new key is larger than the current key
    #[error("new key {requested} is larger than current key {current}")]
    PriorityNotDecreased {
        /// Key the element currently has
        current: Key,
        /// Key the caller asked for
        requested: Key,
    },
    /// The element is not in the heap (never inserted, or already polled)
    #[error("item is not tracked by the heap")]
    UnknownItem,
}

/// Outcome of [`Frontier::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The item was not tracked and has been inserted
    Inserted,
    /// The item was tracked and its key was lowered from `previous`
    Decreased {
        /// Key before the update
        previous: Key,
    },
    /// The item was tracked with a key no larger than the candidate
    Unchanged {
        /// Key the item keeps
        current: Key,
    },
}

impl Update {
    /// Returns true if the update inserted or tightened the item's key.
    pub fn changed(&self) -> bool {
        !matches!(self, Update::Unchanged { .. })
    }
}

/// Open set of a best-first search
///
/// A frontier tracks each discovered node with the best distance found so
/// far. Distances only ever improve: [`update`](Frontier::update) inserts
/// unseen nodes and lowers keys, but never raises one.
///
/// # Example
///
/// ```rust
/// use fibonacci_frontier::{FibonacciHeap, Frontier};
///
/// fn drain<F: Frontier<char>>(frontier: &mut F) -> Vec<(char, i64)> {
///     std::iter::from_fn(|| frontier.poll()).collect()
/// }
///
/// let mut frontier = FibonacciHeap::new();
/// frontier.update('a', 7);
/// frontier.update('b', 2);
/// frontier.update('a', 1);
///
/// assert_eq!(drain(&mut frontier), vec![('a', 1), ('b', 2)]);
/// ```
pub trait Frontier<T> {
    /// Returns true if no element is tracked
    fn is_empty(&self) -> bool;

    /// Returns the number of tracked elements
    fn len(&self) -> usize;

    /// Removes every element
    fn clear(&mut self);

    /// Returns the element with the smallest key without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn first(&self) -> Option<(&T, Key)>;

    /// Inserts `item` with `key`, or lowers its key if `key` is smaller
    ///
    /// A candidate key that is not smaller than the current one is ignored.
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn update(&mut self, item: T, key: Key) -> Update;

    /// Removes and returns the element with the smallest key
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn poll(&mut self) -> Option<(T, Key)>;
}
