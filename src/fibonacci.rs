//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and find-min
//! - O(1) amortized decrease_key
//! - O(log n) amortized extract-min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, as are the children of every node. The heap
//! maintains the minimum root.
//!
//! Nothing is reorganised on insert or decrease_key: new and cut nodes are
//! simply dropped into the root list. Extract-min pays for that laziness by
//! consolidating the roots so that no two share a degree.
//!
//! On top of the raw heap sits an identity index from element to node, which
//! turns the heap into a search frontier: [`FibonacciHeap::update`] inserts an
//! unseen element or lowers the key of a known one.

use crate::arena::{HeapNode, NodeArena, NodeKey};
use crate::degree;
use crate::traits::{Frontier, HeapError, Key, Update};
use index_ring::RingOps;
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

const RING: RingOps = RingOps::new();

/// Degree slots kept inline during consolidation; enough for ~10¹³ elements.
///
/// Must be an array length `smallvec` implements `Array` for.
const INLINE_SLOTS: usize = 64;

/// Fibonacci Heap keyed by [`Key`], tracking each element's identity
///
/// Each element `T` appears at most once. Use [`update`](Self::update) to
/// insert or relax an element and [`poll`](Self::poll) to take the closest.
///
/// # Example
///
/// ```rust
/// use fibonacci_frontier::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.update("a", 5);
/// heap.update("b", 3);
/// heap.update("a", 1);
/// assert_eq!(heap.first(), Some((&"a", 1)));
/// assert_eq!(heap.poll(), Some(("a", 1)));
/// assert_eq!(heap.poll(), Some(("b", 3)));
/// assert!(heap.is_empty());
/// ```
pub struct FibonacciHeap<T> {
    pub(crate) nodes: NodeArena<T>,
    pub(crate) min: Option<NodeKey>,
    pub(crate) len: usize,
    pub(crate) index: FxHashMap<T, NodeKey>,
}

impl<T: Eq + Hash + Clone> FibonacciHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            min: None,
            len: 0,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns true if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.min = None;
        self.len = 0;
    }

    /// Returns the element with the smallest key without removing it.
    pub fn first(&self) -> Option<(&T, Key)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.data, node.key)
        })
    }

    /// Returns true if `item` is currently in the heap.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Returns the current key of `item`, if it is in the heap.
    pub fn key_of(&self, item: &T) -> Option<Key> {
        self.index.get(item).map(|&node| self.nodes[node].key)
    }

    /// Inserts `item` if unseen, otherwise lowers its key to `key` if that is
    /// an improvement.
    ///
    /// A candidate key that is equal to or larger than the current key is
    /// ignored; this never worsens a key.
    pub fn update(&mut self, item: T, key: Key) -> Update {
        match self.index.get(&item) {
            None => {
                let node = self.insert(item.clone(), key);
                self.index.insert(item, node);
                Update::Inserted
            }
            Some(&node) => {
                let current = self.nodes[node].key;
                if key < current {
                    self.lower_key(node, key);
                    Update::Decreased { previous: current }
                } else {
                    Update::Unchanged { current }
                }
            }
        }
    }

    /// Removes and returns the element with the smallest key.
    pub fn poll(&mut self) -> Option<(T, Key)> {
        let node = self.extract_min()?;
        self.index.remove(&node.data);
        Some((node.data, node.key))
    }

    /// Sets the key of a tracked `item` to `key`, which must not be larger
    /// than its current key.
    ///
    /// Unlike [`update`](Self::update) a larger key is reported as an error.
    /// The heap is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`HeapError::UnknownItem`] if `item` is not in the heap
    /// - [`HeapError::PriorityNotDecreased`] if `key` is larger than the
    ///   current key
    pub fn decrease_key(&mut self, item: &T, key: Key) -> Result<(), HeapError> {
        let node = *self.index.get(item).ok_or(HeapError::UnknownItem)?;
        let current = self.nodes[node].key;
        if key > current {
            return Err(HeapError::PriorityNotDecreased {
                current,
                requested: key,
            });
        }
        self.lower_key(node, key);
        Ok(())
    }
}

impl<T> FibonacciHeap<T> {
    /// Allocates a node for `data` and adds it to the root list.
    fn insert(&mut self, data: T, key: Key) -> NodeKey {
        let node = self.nodes.allocate(data, key);
        self.link_into_roots(node);
        self.len += 1;
        node
    }

    /// Adds a detached node to the root list next to the minimum, updating
    /// the minimum if the node's key is smaller.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already linked into a root or child list.
    fn link_into_roots(&mut self, node: NodeKey) {
        assert!(
            self.min != Some(node)
                && self.nodes[node].parent.is_none()
                && RING.is_singleton(&self.nodes, node),
            "node is already linked into a heap list"
        );

        match self.min {
            Some(min) => {
                RING.insert_after(&mut self.nodes, min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }
    }

    /// Lowers the key of `node` to `key`, restoring heap order by cutting.
    ///
    /// `key` must not exceed the current key; callers check this.
    fn lower_key(&mut self, node: NodeKey, key: Key) {
        debug_assert!(key <= self.nodes[node].key);
        self.nodes[node].key = key;

        if let Some(parent) = self.nodes[node].parent {
            if key < self.nodes[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if key < self.nodes[min].key {
                self.min = Some(node);
            }
        }
    }

    /// Removes `node` from the child list of `parent` and makes it an
    /// unmarked root.
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let sibling = self.nodes[node].ring.next();
        RING.remove(&mut self.nodes, node);

        let p = &mut self.nodes[parent];
        p.degree = degree::saturating_decrement(p.degree);
        if p.degree == 0 {
            p.child = None;
        } else if p.child == Some(node) {
            p.child = Some(sibling);
        }

        let n = &mut self.nodes[node];
        n.parent = None;
        n.mark = false;

        // The heap is non-empty here, so the node lands next to the minimum.
        if let Some(min) = self.min {
            RING.insert_after(&mut self.nodes, min, node);
        }

        trace!(
            key = self.nodes[node].key,
            parent_key = self.nodes[parent].key,
            "cut node to root list"
        );
    }

    /// Walks up from `node`, which just lost a child: unmarked ancestors are
    /// marked and stop the walk, marked ones are cut as well.
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].mark {
                self.nodes[node].mark = true;
                return;
            }
            trace!(key = self.nodes[node].key, "cascading cut");
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Removes the minimum node from the heap and returns it.
    fn extract_min(&mut self) -> Option<HeapNode<T>> {
        let z = self.min?;

        // Every child becomes a root; the child ring joins the root ring whole.
        if let Some(child) = self.nodes[z].child.take() {
            let mut current = child;
            loop {
                let node = &mut self.nodes[current];
                node.parent = None;
                node.mark = false;
                current = node.ring.next();
                if current == child {
                    break;
                }
            }
            RING.splice(&mut self.nodes, Some(z), Some(child));
            self.nodes[z].degree = 0;
        }

        let right = self.nodes[z].ring.next();
        if RING.remove(&mut self.nodes, z) {
            self.min = None;
        } else {
            self.min = Some(right);
            self.consolidate();
        }

        self.len -= 1;
        self.nodes.free(z)
    }

    /// Links roots of equal degree until every root degree is distinct, then
    /// rebuilds the root list and finds the new minimum.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        let mut slots: SmallVec<[Option<NodeKey>; INLINE_SLOTS]> =
            smallvec![None; degree::slot_bound(self.len)];

        // Links shrink the root list while we walk it, so the number of
        // roots at entry is fixed up front.
        let roots_before = RING.count(&self.nodes, start);
        let mut remaining = roots_before;
        let mut current = start;

        while remaining > 0 {
            let next = self.nodes[current].ring.next();
            let mut x = current;
            let mut d = usize::from(self.nodes[x].degree);

            loop {
                if d >= slots.len() {
                    slots.resize(d + 1, None);
                }
                let Some(mut y) = slots[d].take() else {
                    break;
                };
                if self.nodes[x].key > self.nodes[y].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }

            slots[d] = Some(x);
            current = next;
            remaining -= 1;
        }

        // Only slot entries are still roots; rebuild the list in degree order.
        self.min = None;
        let mut roots_after = 0;
        for root in slots.into_iter().flatten() {
            RING.make_circular(&mut self.nodes, root);
            match self.min {
                None => self.min = Some(root),
                Some(min) => {
                    RING.insert_before(&mut self.nodes, min, root);
                    if self.nodes[root].key < self.nodes[min].key {
                        self.min = Some(root);
                    }
                }
            }
            roots_after += 1;
        }

        debug!(
            len = self.len,
            roots_before, roots_after, "consolidated root list"
        );
    }

    /// Makes root `y` a child of root `x`.
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        RING.remove(&mut self.nodes, y);

        match self.nodes[x].child {
            Some(child) => RING.insert_after(&mut self.nodes, child, y),
            None => self.nodes[x].child = Some(y),
        }

        let child = &mut self.nodes[y];
        child.parent = Some(x);
        child.mark = false;

        let parent = &mut self.nodes[x];
        parent.degree = degree::checked_increment(parent.degree);

        trace!(
            parent_key = self.nodes[x].key,
            child_key = self.nodes[y].key,
            degree = self.nodes[x].degree,
            "linked roots"
        );
    }
}

impl<T: Eq + Hash + Clone> Default for FibonacciHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Frontier<T> for FibonacciHeap<T> {
    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn clear(&mut self) {
        FibonacciHeap::clear(self)
    }

    fn first(&self) -> Option<(&T, Key)> {
        FibonacciHeap::first(self)
    }

    fn update(&mut self, item: T, key: Key) -> Update {
        FibonacciHeap::update(self, item, key)
    }

    fn poll(&mut self) -> Option<(T, Key)> {
        FibonacciHeap::poll(self)
    }
}

impl<T: Eq + Hash + Clone> Extend<(T, Key)> for FibonacciHeap<T> {
    fn extend<I: IntoIterator<Item = (T, Key)>>(&mut self, iter: I) {
        for (item, key) in iter {
            self.update(item, key);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<(T, Key)> for FibonacciHeap<T> {
    fn from_iter<I: IntoIterator<Item = (T, Key)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Lists every key, walking each ring in turn with an explicit stack.
///
/// The order follows the internal tree layout and is only meant for
/// debugging.
impl<T> fmt::Display for FibonacciHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FibonacciHeap=[")?;

        let mut stack: Vec<NodeKey> = self.min.into_iter().collect();
        let mut first = true;
        while let Some(start) = stack.pop() {
            for node in RING.iter(&self.nodes, start) {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                write!(f, "{}", self.nodes[node].key)?;
                if let Some(child) = self.nodes[node].child {
                    stack.push(child);
                }
            }
        }

        f.write_str("]")
    }
}

impl<T> fmt::Debug for FibonacciHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min_key", &self.min.map(|min| self.nodes[min].key))
            .finish_non_exhaustive()
    }
}
