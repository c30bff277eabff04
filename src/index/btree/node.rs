//! Node - capacity, descent, local insertion, split and promotion.
//!
//! A [`Node`] only stores its head gap; its elements and gaps are reached
//! by walking the chain. Whether a node is a leaf is derived from its gaps
//! and never stored.
//!
//! # Insertion
//! ```text
//! insert(value)          insert_promoted(element)
//!        │                        │
//!        └──────► insert_local ◄──┘
//!                      │
//!               internal_insert ── count <= order ──► done
//!                      │
//!                    split
//!          ┌───────────┴────────────┐
//!   elements above the         promoted element
//!   promotion index ──►              │
//!   new sibling                  promote ──► parent.insert_promoted
//!                                    │         (may split again)
//!                          no parent: new root,
//!                          RootAdopter::adopt_new_root
//! ```

use crate::common::config::promotion_index;
use crate::common::{ElementId, GapId, NodeId};

use super::arena::Arena;
use super::gap::Child;
use super::tree::RootAdopter;

/// A capacity-bounded container of ordered elements.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Maximum number of elements held between top-level operations.
    order: usize,

    /// Back-reference used only to route promoted values upwards.
    pub(super) parent: Option<NodeId>,

    /// Head of the `Gap - Element - ... - Gap` chain, `None` while empty.
    pub(super) first_gap: Option<GapId>,
}

impl Node {
    pub(super) fn new(order: usize) -> Self {
        Self {
            order,
            parent: None,
            first_gap: None,
        }
    }

    #[inline]
    pub(super) fn order(&self) -> usize {
        self.order
    }
}

/// Iterator over the elements of one node, ascending.
pub(super) struct Elements<'a, T> {
    arena: &'a Arena<T>,
    next: Option<ElementId>,
}

impl<T> Iterator for Elements<'_, T> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self.arena.next(current);
        Some(current)
    }
}

/// Iterator over the gaps of one node, left to right.
pub(super) struct Gaps<'a, T> {
    arena: &'a Arena<T>,
    next: Option<GapId>,
}

impl<T> Iterator for Gaps<'_, T> {
    type Item = GapId;

    fn next(&mut self) -> Option<GapId> {
        let current = self.next?;
        self.next = self.arena.next_gap(current);
        Some(current)
    }
}

// ============================================================================
// Chain traversal
// ============================================================================

impl<T> Arena<T> {
    #[inline]
    pub(super) fn first_element(&self, node: NodeId) -> Option<ElementId> {
        self.node(node).first_gap.and_then(|g| self.gap(g).upper)
    }

    pub(super) fn elements(&self, node: NodeId) -> Elements<'_, T> {
        Elements {
            arena: self,
            next: self.first_element(node),
        }
    }

    pub(super) fn gaps(&self, node: NodeId) -> Gaps<'_, T> {
        Gaps {
            arena: self,
            next: self.node(node).first_gap,
        }
    }

    /// Number of elements in `node`.
    pub(super) fn count(&self, node: NodeId) -> usize {
        self.elements(node).count()
    }

    /// The element at 0-based position `index` of `node`.
    ///
    /// # Panics
    /// Panics if the node holds `index` elements or fewer.
    pub(super) fn element_at(&self, node: NodeId, index: usize) -> ElementId {
        match self.elements(node).nth(index) {
            Some(element) => element,
            None => panic!("{} has no element at index {}", node, index),
        }
    }

    /// Whether every gap of `node` is childless.
    pub(super) fn is_leaf(&self, node: NodeId) -> bool {
        self.gaps(node).all(|g| self.gap(g).child().is_leaf())
    }

    /// Child nodes of `node`, left to right.
    pub(super) fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.gaps(node)
            .filter_map(|g| self.gap(g).child().node())
            .collect()
    }
}

// ============================================================================
// Search
// ============================================================================

impl<T: Ord> Arena<T> {
    /// The element of `node` equal to `value`, if any.
    pub(super) fn element_containing(&self, node: NodeId, value: &T) -> Option<ElementId> {
        self.elements(node)
            .find(|&e| self.element(e).value() == value)
    }

    /// The first gap of `node` whose bounds bracket `value`.
    ///
    /// Returns `None` when `node` is empty or already holds `value`.
    pub(super) fn gap_lookup(&self, node: NodeId, value: &T) -> Option<GapId> {
        self.gaps(node).find(|&g| self.gap_brackets(g, value))
    }

    /// Descend from `node` to the node where `value` lives or would be
    /// inserted.
    pub(super) fn find(&self, node: NodeId, value: &T) -> NodeId {
        let mut current = node;
        loop {
            if self.element_containing(current, value).is_some() {
                return current;
            }
            match self.gap_lookup(current, value).map(|g| self.gap(g).child()) {
                Some(Child::Internal(child)) => {
                    log::trace!("descend {} -> {}", current, child);
                    current = child;
                }
                Some(Child::Leaf) | None => return current,
            }
        }
    }

    /// Descend from `node` looking for the element equal to `value`.
    pub(super) fn search(&self, node: NodeId, value: &T) -> Option<ElementId> {
        let mut current = node;
        loop {
            if let Some(element) = self.element_containing(current, value) {
                return Some(element);
            }
            match self.gap_lookup(current, value).map(|g| self.gap(g).child()) {
                Some(Child::Internal(child)) => current = child,
                Some(Child::Leaf) | None => return None,
            }
        }
    }
}

// ============================================================================
// Insert, split, promote
// ============================================================================

impl<T: Ord> Arena<T> {
    /// Insert `value` into `node`, which must be the node returned by
    /// [`find`](Arena::find) and must not already hold `value`.
    ///
    /// Splits propagate upwards as needed; a split of the root reports
    /// the new root through `adopter`.
    pub(super) fn insert(
        &mut self,
        node: NodeId,
        value: T,
        adopter: &mut dyn RootAdopter,
    ) -> ElementId {
        let element = self.new_element(value);
        self.insert_local(node, element);
        self.internal_insert(node, adopter);
        element
    }

    /// Insert an element that already carries its two adjacent subtrees.
    ///
    /// `element` must be detached: both of its gaps are its own boundary
    /// gaps (see [`lift_out`](Arena::lift_out)). The subtrees are
    /// re-parented under `node`.
    fn insert_promoted(&mut self, node: NodeId, element: ElementId, adopter: &mut dyn RootAdopter) {
        self.insert_local(node, element);
        self.internal_insert(node, adopter);
    }

    /// Splice a detached element into `node`'s chain, ignoring capacity.
    ///
    /// The bracketing gap is replaced by the element's own two gaps and
    /// freed. Its child, if any, must already hang under one of them.
    fn insert_local(&mut self, node: NodeId, element: ElementId) {
        let (prev_gap, next_gap) = {
            let e = self.element(element);
            (e.prev_gap, e.next_gap)
        };

        match self.node(node).first_gap {
            None => {
                self.gap_mut(prev_gap).lower = None;
                self.gap_mut(next_gap).upper = None;
                self.node_mut(node).first_gap = Some(prev_gap);
            }
            Some(head) => {
                let target = match self.gap_lookup(node, self.element(element).value()) {
                    Some(gap) => gap,
                    None => panic!("{} has no gap bracketing {}", node, element),
                };
                let (lower, upper) = {
                    let g = self.gap(target);
                    (g.lower, g.upper)
                };

                if let Some(lower) = lower {
                    self.element_mut(lower).next_gap = prev_gap;
                }
                if let Some(upper) = upper {
                    self.element_mut(upper).prev_gap = next_gap;
                }
                self.gap_mut(prev_gap).lower = lower;
                self.gap_mut(next_gap).upper = upper;

                if target == head {
                    self.node_mut(node).first_gap = Some(prev_gap);
                }
                self.free_gap(target);
            }
        }

        self.set_gap_owner(prev_gap, node);
        self.set_gap_owner(next_gap, node);
    }

    /// Restore the capacity invariant of `node` after a local insertion.
    fn internal_insert(&mut self, node: NodeId, adopter: &mut dyn RootAdopter) {
        let count = self.count(node);
        let order = self.node(node).order();
        if count <= order {
            return;
        }

        let index = promotion_index(count);
        let promoted = self.element_at(node, index);
        log::debug!(
            "split {} holding {} elements (order {}), promoting index {}",
            node,
            count,
            order,
            index
        );

        // Everything above the promoted element moves to the sibling; the
        // gaps between those elements die with the split.
        let mut stale = Vec::new();
        let mut moving = Vec::new();
        let mut gap = self.element(promoted).next_gap;
        loop {
            stale.push(gap);
            match self.gap(gap).upper {
                Some(element) => {
                    moving.push(element);
                    gap = self.element(element).next_gap;
                }
                None => break,
            }
        }

        let sibling = self.alloc_node(order);
        for element in moving {
            self.lift_out(element);
            self.insert_promoted(sibling, element, adopter);
        }

        // Close this node just below the promoted element. Its lower gap
        // (and the subtree under it) stays here as the last gap.
        let predecessor = match self.previous(promoted) {
            Some(predecessor) => predecessor,
            None => panic!("{} promoted its first element", node),
        };
        self.sever_toward_next(predecessor);
        self.terminate_upper_boundary(promoted);
        self.terminate_lower_boundary(promoted);

        for gap in stale {
            self.free_gap(gap);
        }

        self.promote(node, promoted, node, sibling, adopter);
    }

    /// Push `element` into the parent of `node`, between `smaller` and
    /// `larger`. Creates a new root when `node` has no parent.
    fn promote(
        &mut self,
        node: NodeId,
        element: ElementId,
        smaller: NodeId,
        larger: NodeId,
        adopter: &mut dyn RootAdopter,
    ) {
        let parent = match self.node(node).parent {
            Some(parent) => parent,
            None => {
                let order = self.node(node).order();
                let root = self.alloc_node(order);
                log::debug!("root {} split, growing new root {}", node, root);
                adopter.adopt_new_root(root);
                self.node_mut(node).parent = Some(root);
                root
            }
        };

        let (prev_gap, next_gap) = {
            let e = self.element(element);
            (e.prev_gap, e.next_gap)
        };
        self.set_gap_owner(prev_gap, parent);
        self.set_gap_owner(next_gap, parent);
        self.set_gap_child(prev_gap, Child::Internal(smaller));
        self.set_gap_child(next_gap, Child::Internal(larger));

        self.insert_promoted(parent, element, adopter);
    }
}
