//! Arena storage for heap nodes
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeKey`]. The
//! parent, child and sibling fields are plain keys: they can be looked up but
//! confer no ownership, so the cyclic sibling rings need no `Rc` or raw
//! pointers. The arena is the sole owner of every node.
//!
//! Slot map keys are generational, so a key kept past its node's removal
//! fails lookups instead of aliasing a newer node.

use crate::degree::Degree;
use crate::traits::Key;
use index_ring::{RingLink, RingStore};
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Arena key of a heap node
    pub(crate) struct NodeKey;
}

/// A node of one heap-ordered tree.
pub(crate) struct HeapNode<T> {
    pub(crate) data: T,
    pub(crate) key: Key,
    /// Number of children; equals the length of the child ring
    pub(crate) degree: Degree,
    /// Lost a child since it last became a child of another node
    pub(crate) mark: bool,
    pub(crate) parent: Option<NodeKey>,
    /// Any member of the child ring, `None` iff `degree == 0`
    pub(crate) child: Option<NodeKey>,
    /// Sibling links: `prev` is the left sibling, `next` the right one
    pub(crate) ring: RingLink<NodeKey>,
}

/// Slot-map backed node storage.
pub(crate) struct NodeArena<T> {
    nodes: SlotMap<NodeKey, HeapNode<T>>,
}

impl<T> NodeArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Stores a fresh root-shaped node: no parent, no children, alone in
    /// its own ring.
    pub(crate) fn allocate(&mut self, data: T, key: Key) -> NodeKey {
        self.nodes.insert_with_key(|node| HeapNode {
            data,
            key,
            degree: 0,
            mark: false,
            parent: None,
            child: None,
            ring: RingLink::singleton(node),
        })
    }

    /// Removes a node, handing ownership of its payload back.
    pub(crate) fn free(&mut self, node: NodeKey) -> Option<HeapNode<T>> {
        self.nodes.remove(node)
    }

    pub(crate) fn get(&self, node: NodeKey) -> Option<&HeapNode<T>> {
        self.nodes.get(node)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &HeapNode<T>)> {
        self.nodes.iter()
    }
}

impl<T> Index<NodeKey> for NodeArena<T> {
    type Output = HeapNode<T>;

    #[inline]
    fn index(&self, node: NodeKey) -> &HeapNode<T> {
        &self.nodes[node]
    }
}

impl<T> IndexMut<NodeKey> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, node: NodeKey) -> &mut HeapNode<T> {
        &mut self.nodes[node]
    }
}

impl<T> RingStore<NodeKey> for NodeArena<T> {
    #[inline]
    fn link(&self, node: NodeKey) -> &RingLink<NodeKey> {
        &self.nodes[node].ring
    }

    #[inline]
    fn link_mut(&mut self, node: NodeKey) -> &mut RingLink<NodeKey> {
        &mut self.nodes[node].ring
    }
}
