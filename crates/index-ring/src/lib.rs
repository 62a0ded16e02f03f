//! Circular doubly-linked lists threaded through an arena.
//!
//! Nodes live in some external storage (a `Vec`, a slot map, ...) and are
//! addressed by small copyable keys. Each node embeds a [`RingLink`] holding
//! the keys of its neighbours, and [`RingOps`] rewires those links through the
//! [`RingStore`] trait. Because links are keys rather than references there is
//! no ownership cycle and every operation is safe code.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! A node is never "unlinked": a freshly created link is a ring of one, and
//! [`RingOps::remove`] leaves the removed node as a ring of one again. This is
//! the shape Fibonacci heaps want, where every node is always a member of
//! exactly one ring (the root list or some parent's child list).
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingLink, RingOps, RingStore};
//!
//! struct Links(Vec<RingLink<usize>>);
//!
//! impl RingStore<usize> for Links {
//!     fn link(&self, key: usize) -> &RingLink<usize> {
//!         &self.0[key]
//!     }
//!     fn link_mut(&mut self, key: usize) -> &mut RingLink<usize> {
//!         &mut self.0[key]
//!     }
//! }
//!
//! let mut links = Links((0..3).map(RingLink::singleton).collect());
//! let ops = RingOps::new();
//!
//! ops.insert_after(&mut links, 0, 1);
//! ops.insert_after(&mut links, 1, 2);
//!
//! assert_eq!(ops.iter(&links, 0).collect::<Vec<_>>(), vec![0, 1, 2]);
//! assert_eq!(ops.count(&links, 2), 3);
//!
//! assert!(!ops.remove(&mut links, 1));
//! assert_eq!(ops.iter(&links, 0).collect::<Vec<_>>(), vec![0, 2]);
//! assert!(ops.is_singleton(&links, 1));
//! ```

use core::fmt;

// =============================================================================
// RingLink
// =============================================================================

/// Neighbour keys of one node in a circular list.
///
/// A node that is alone in its ring refers to itself on both sides.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RingLink<K> {
    next: K,
    prev: K,
}

impl<K: Copy> RingLink<K> {
    /// Creates the link of a ring containing only `key`.
    #[inline]
    pub const fn singleton(key: K) -> Self {
        RingLink {
            next: key,
            prev: key,
        }
    }

    /// Key of the following node.
    #[inline]
    pub fn next(&self) -> K {
        self.next
    }

    /// Key of the preceding node.
    #[inline]
    pub fn prev(&self) -> K {
        self.prev
    }

    #[inline]
    pub fn set_next(&mut self, next: K) {
        self.next = next;
    }

    #[inline]
    pub fn set_prev(&mut self, prev: K) {
        self.prev = prev;
    }
}

impl<K: fmt::Debug> fmt::Debug for RingLink<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingLink")
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

// =============================================================================
// RingStore
// =============================================================================

/// Storage that can hand out the [`RingLink`] embedded in each node.
///
/// Implementations index their arena with `key`. Looking up a key that is not
/// stored is a logic error and implementations are expected to panic.
pub trait RingStore<K: Copy + Eq> {
    /// Borrow the link of `key`.
    fn link(&self, key: K) -> &RingLink<K>;

    /// Mutably borrow the link of `key`.
    fn link_mut(&mut self, key: K) -> &mut RingLink<K>;
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular doubly-linked lists.
///
/// All operations except [`count`](RingOps::count) and iteration are O(1).
///
/// The caller must keep the ring invariants: a key passed as "new" must be a
/// ring of one, and keys passed together must live in the same store.
/// Violations are caught by debug assertions.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Returns true if `key` is alone in its ring.
    #[inline]
    pub fn is_singleton<K, S>(&self, store: &S, key: K) -> bool
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        store.link(key).next() == key
    }

    /// Resets `key` to a ring of one without touching its old neighbours.
    ///
    /// Only use this on nodes whose former ring is being discarded wholesale.
    #[inline]
    pub fn make_circular<K, S>(&self, store: &mut S, key: K)
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        *store.link_mut(key) = RingLink::singleton(key);
    }

    /// Inserts `new` after `at` in `at`'s ring.
    ///
    /// `new` must be a ring of one.
    #[inline]
    pub fn insert_after<K, S>(&self, store: &mut S, at: K, new: K)
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        debug_assert!(self.is_singleton(store, new), "new is already linked");

        let next = store.link(at).next();

        store.link_mut(at).set_next(new);
        let link = store.link_mut(new);
        link.set_prev(at);
        link.set_next(next);
        store.link_mut(next).set_prev(new);
    }

    /// Inserts `new` before `at` in `at`'s ring.
    ///
    /// `new` must be a ring of one.
    #[inline]
    pub fn insert_before<K, S>(&self, store: &mut S, at: K, new: K)
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        debug_assert!(self.is_singleton(store, new), "new is already linked");

        let prev = store.link(at).prev();

        store.link_mut(at).set_prev(new);
        let link = store.link_mut(new);
        link.set_next(at);
        link.set_prev(prev);
        store.link_mut(prev).set_next(new);
    }

    /// Splices `key` out of its ring, leaving it a ring of one.
    ///
    /// Returns `true` if `key` was the only element (its old ring is now
    /// empty), `false` if other nodes remain.
    #[inline]
    pub fn remove<K, S>(&self, store: &mut S, key: K) -> bool
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        let link = *store.link(key);

        if link.next() == key {
            return true;
        }

        store.link_mut(link.prev()).set_next(link.next());
        store.link_mut(link.next()).set_prev(link.prev());
        self.make_circular(store, key);
        false
    }

    /// Splices two rings together.
    ///
    /// Returns an entry point into the merged ring, or `None` if both were
    /// empty. If either is `None`, returns the other.
    ///
    /// The rings of `a` and `b` must be distinct.
    #[inline]
    pub fn splice<K, S>(&self, store: &mut S, a: Option<K>, b: Option<K>) -> Option<K>
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                // Before:
                //   Ring A: ... <-> a_prev <-> a <-> ...
                //   Ring B: ... <-> b_prev <-> b <-> ...
                //
                // After:
                //   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
                let a_prev = store.link(a).prev();
                let b_prev = store.link(b).prev();

                store.link_mut(a_prev).set_next(b);
                store.link_mut(b).set_prev(a_prev);

                store.link_mut(b_prev).set_next(a);
                store.link_mut(a).set_prev(b_prev);

                Some(a)
            }
        }
    }

    /// Counts the number of elements in the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<K, S>(&self, store: &S, start: K) -> usize
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        self.iter(store, start).count()
    }

    /// Iterates the ring once, starting at `start` and following `next`.
    ///
    /// The store is borrowed immutably, so the ring cannot change underneath
    /// the iterator.
    pub fn iter<'a, K, S>(&self, store: &'a S, start: K) -> Iter<'a, K, S>
    where
        K: Copy + Eq,
        S: RingStore<K> + ?Sized,
    {
        Iter {
            store,
            start,
            next: Some(start),
        }
    }
}

/// Iterator over one revolution of a ring. See [`RingOps::iter`].
pub struct Iter<'a, K, S: ?Sized> {
    store: &'a S,
    start: K,
    next: Option<K>,
}

impl<K, S> Iterator for Iter<'_, K, S>
where
    K: Copy + Eq,
    S: RingStore<K> + ?Sized,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let current = self.next?;
        let following = self.store.link(current).next();
        self.next = (following != self.start).then_some(following);
        Some(current)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn members(store: &TestStore, start: usize) -> Vec<usize> {
        RingOps::new().iter(store, start).collect()
    }

    struct TestStore {
        links: Vec<RingLink<usize>>,
    }

    impl TestStore {
        fn new(n: usize) -> Self {
            TestStore {
                links: (0..n).map(RingLink::singleton).collect(),
            }
        }

        /// Builds the ring 0 <-> 1 <-> ... <-> n-1 <-> 0.
        fn chain(n: usize) -> Self {
            let mut store = TestStore::new(n);
            let ops = RingOps::new();
            for i in 1..n {
                ops.insert_after(&mut store, i - 1, i);
            }
            store
        }

        /// Checks `l.next.prev == l` and `l.prev.next == l` around the ring.
        fn assert_consistent(&self, start: usize) {
            let ops = RingOps::new();
            for key in ops.iter(self, start) {
                let link = self.links[key];
                assert_eq!(self.links[link.next()].prev(), key);
                assert_eq!(self.links[link.prev()].next(), key);
            }
        }
    }

    impl RingStore<usize> for TestStore {
        fn link(&self, key: usize) -> &RingLink<usize> {
            &self.links[key]
        }

        fn link_mut(&mut self, key: usize) -> &mut RingLink<usize> {
            &mut self.links[key]
        }
    }

    #[test]
    fn test_singleton() {
        let store = TestStore::new(1);
        let ops = RingOps::new();

        assert!(ops.is_singleton(&store, 0));
        assert_eq!(store.link(0).next(), 0);
        assert_eq!(store.link(0).prev(), 0);
        assert_eq!(ops.count(&store, 0), 1);
    }

    #[test]
    fn test_insert_after() {
        let mut store = TestStore::new(2);
        let ops = RingOps::new();

        ops.insert_after(&mut store, 0, 1);

        assert_eq!(store.link(0).next(), 1);
        assert_eq!(store.link(1).next(), 0);
        assert_eq!(store.link(0).prev(), 1);
        assert_eq!(store.link(1).prev(), 0);
    }

    #[test]
    fn test_insert_before() {
        let mut store = TestStore::chain(2);
        let ops = RingOps::new();
        store.links.push(RingLink::singleton(2));

        ops.insert_before(&mut store, 0, 2);

        // 0 -> 1 -> 2 -> 0
        assert_eq!(members(&store, 0), vec![0, 1, 2]);
        store.assert_consistent(0);
    }

    #[test]
    fn test_insert_three_nodes() {
        let store = TestStore::chain(3);
        let ops = RingOps::new();

        assert_eq!(members(&store, 0), vec![0, 1, 2]);
        assert_eq!(members(&store, 1), vec![1, 2, 0]);
        assert_eq!(store.link(0).prev(), 2);
        store.assert_consistent(0);
    }

    #[test]
    fn test_remove_single() {
        let mut store = TestStore::new(1);
        let ops = RingOps::new();

        assert!(ops.remove(&mut store, 0));
        assert!(ops.is_singleton(&store, 0));
    }

    #[test]
    fn test_remove_from_two() {
        let mut store = TestStore::chain(2);
        let ops = RingOps::new();

        assert!(!ops.remove(&mut store, 0));
        assert!(ops.is_singleton(&store, 0));
        assert!(ops.is_singleton(&store, 1));
    }

    #[test]
    fn test_remove_middle() {
        let mut store = TestStore::chain(3);
        let ops = RingOps::new();

        assert!(!ops.remove(&mut store, 1));
        assert!(ops.is_singleton(&store, 1));
        assert_eq!(members(&store, 0), vec![0, 2]);
        store.assert_consistent(0);
    }

    #[test]
    fn test_splice_empty() {
        let mut store = TestStore::new(1);
        let ops = RingOps::new();

        assert_eq!(ops.splice::<usize, _>(&mut store, None, None), None);
        assert_eq!(ops.splice(&mut store, Some(0), None), Some(0));
        assert_eq!(ops.splice(&mut store, None, Some(0)), Some(0));
        assert!(ops.is_singleton(&store, 0));
    }

    #[test]
    fn test_splice_two_pairs() {
        let mut store = TestStore::new(4);
        let ops = RingOps::new();

        ops.insert_after(&mut store, 0, 1);
        ops.insert_after(&mut store, 2, 3);

        assert_eq!(ops.splice(&mut store, Some(0), Some(2)), Some(0));
        assert_eq!(ops.count(&store, 0), 4);
        assert_eq!(members(&store, 2), vec![2, 3, 0, 1]);
        store.assert_consistent(0);
    }

    #[test]
    fn test_make_circular_discards_neighbours_view() {
        let mut store = TestStore::chain(3);
        let ops = RingOps::new();

        ops.make_circular(&mut store, 0);
        assert!(ops.is_singleton(&store, 0));
    }

    proptest! {
        #[test]
        fn prop_remove_keeps_ring_consistent(
            n in 2usize..40,
            removals in prop::collection::vec(0usize..40, 0..20),
        ) {
            let mut store = TestStore::chain(n);
            let ops = RingOps::new();
            let mut alive: Vec<usize> = (0..n).collect();

            for r in removals {
                if alive.len() <= 1 {
                    break;
                }
                let victim = alive.remove(r % alive.len());
                prop_assert!(!ops.remove(&mut store, victim));
                prop_assert!(ops.is_singleton(&store, victim));
                store.assert_consistent(alive[0]);
                prop_assert_eq!(members(&store, alive[0]), alive.clone());
            }
        }
    }
}
