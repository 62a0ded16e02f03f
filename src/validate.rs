//! Structural validation of a [`FibonacciHeap`]
//!
//! [`FibonacciHeap::validate`] walks every tree and checks the invariants the
//! heap relies on between public operations:
//!
//! - heap order: no child has a smaller key than its parent
//! - every root and child list is a well-formed circular list
//! - each node's degree equals the length of its child list
//! - roots are unmarked, children point back at their parent
//! - the minimum is the smallest root
//! - the element count, the arena and the identity index agree, and every
//!   indexed node is reachable from the minimum
//!
//! The walk is O(n) and allocates; it is meant for tests and debugging.

use crate::arena::NodeKey;
use crate::fibonacci::FibonacciHeap;
use crate::traits::Key;
use rustc_hash::FxHashSet;
use std::hash::Hash;
use thiserror::Error;

/// The first broken invariant found by [`FibonacciHeap::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("heap order violated: child key {child} is below parent key {parent}")]
    HeapOrder { parent: Key, child: Key },
    #[error("a link points at a node that is not stored")]
    MissingNode,
    #[error("sibling links are inconsistent at node with key {key}")]
    BrokenRing { key: Key },
    #[error("node with key {key} is reachable twice")]
    Revisited { key: Key },
    #[error("node with key {key} records degree {recorded} but has {actual} children")]
    DegreeMismatch {
        key: Key,
        recorded: usize,
        actual: usize,
    },
    #[error("node with key {key} has degree 0 but a child pointer")]
    DanglingChild { key: Key },
    #[error("root with key {key} is marked")]
    MarkedRoot { key: Key },
    #[error("node with key {key} does not point back at its parent")]
    WrongParent { key: Key },
    #[error("minimum points at a node that is not a root")]
    MinimumNotRoot,
    #[error("minimum has key {recorded} but the smallest root key is {actual}")]
    StaleMinimum { recorded: Key, actual: Key },
    #[error("heap reports {recorded} elements but {reachable} nodes are reachable and {stored} are stored")]
    LengthMismatch {
        recorded: usize,
        reachable: usize,
        stored: usize,
    },
    #[error("identity index has {indexed} entries for {len} elements")]
    IndexSize { indexed: usize, len: usize },
    #[error("identity index entry does not lead to its element's node")]
    IndexEntry,
}

impl<T: Eq + Hash + Clone> FibonacciHeap<T> {
    /// Checks every structural invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen: FxHashSet<NodeKey> = FxHashSet::default();

        if let Some(min) = self.min {
            let min_node = self.nodes.get(min).ok_or(InvariantViolation::MissingNode)?;
            if min_node.parent.is_some() {
                return Err(InvariantViolation::MinimumNotRoot);
            }

            let roots = self.check_ring(min, None, &mut seen)?;
            let smallest = roots
                .iter()
                .map(|&root| self.nodes[root].key)
                .min()
                .unwrap_or(min_node.key);
            if smallest != min_node.key {
                return Err(InvariantViolation::StaleMinimum {
                    recorded: min_node.key,
                    actual: smallest,
                });
            }

            let mut stack = roots;
            while let Some(node) = stack.pop() {
                let n = &self.nodes[node];
                let children = match n.child {
                    Some(child) => self.check_ring(child, Some(node), &mut seen)?,
                    None => Vec::new(),
                };
                if n.degree == 0 && n.child.is_some() {
                    return Err(InvariantViolation::DanglingChild { key: n.key });
                }
                if usize::from(n.degree) != children.len() {
                    return Err(InvariantViolation::DegreeMismatch {
                        key: n.key,
                        recorded: usize::from(n.degree),
                        actual: children.len(),
                    });
                }
                stack.extend(children);
            }
        }

        if seen.len() != self.len || self.nodes.len() != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                reachable: seen.len(),
                stored: self.nodes.len(),
            });
        }
        if self.index.len() != self.len {
            return Err(InvariantViolation::IndexSize {
                indexed: self.index.len(),
                len: self.len,
            });
        }
        for (item, &node) in &self.index {
            let entry_ok = seen.contains(&node)
                && self.nodes.get(node).is_some_and(|n| n.data == *item);
            if !entry_ok {
                return Err(InvariantViolation::IndexEntry);
            }
        }

        Ok(())
    }

    /// Walks the ring containing `start`, checking link symmetry and each
    /// member's relation to `parent`. Returns the members in ring order.
    fn check_ring(
        &self,
        start: NodeKey,
        parent: Option<NodeKey>,
        seen: &mut FxHashSet<NodeKey>,
    ) -> Result<Vec<NodeKey>, InvariantViolation> {
        let mut members = Vec::new();
        let mut current = start;

        loop {
            let node = self
                .nodes
                .get(current)
                .ok_or(InvariantViolation::MissingNode)?;
            if !seen.insert(current) {
                return Err(InvariantViolation::Revisited { key: node.key });
            }

            let next = node.ring.next();
            let prev = node.ring.prev();
            let linked_back = self
                .nodes
                .get(next)
                .is_some_and(|n| n.ring.prev() == current)
                && self
                    .nodes
                    .get(prev)
                    .is_some_and(|n| n.ring.next() == current);
            if !linked_back {
                return Err(InvariantViolation::BrokenRing { key: node.key });
            }

            if node.parent != parent {
                return Err(InvariantViolation::WrongParent { key: node.key });
            }
            match parent {
                None if node.mark => {
                    return Err(InvariantViolation::MarkedRoot { key: node.key });
                }
                Some(p) if node.key < self.nodes[p].key => {
                    return Err(InvariantViolation::HeapOrder {
                        parent: self.nodes[p].key,
                        child: node.key,
                    });
                }
                _ => {}
            }

            members.push(current);
            current = next;
            if current == start {
                return Ok(members);
            }
        }
    }
}
