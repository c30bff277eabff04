//! Element - one stored value and the two gaps around it.
//!
//! Inside a node, elements form an ascending chain through their gaps:
//! an element's successor is the upper bound of its `next_gap`, its
//! predecessor the lower bound of its `prev_gap`. Neighbouring elements
//! share the gap between them.

use std::fmt;

use crate::common::{ElementId, GapId};

use super::arena::Arena;
use super::gap::Gap;

/// A value stored in the tree.
///
/// Returned by [`BTree::search`](crate::BTree::search). Equality compares
/// values only, never identity.
///
/// # Example
/// ```
/// use gaptree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// tree.insert(42).unwrap();
///
/// let element = tree.search(&42).unwrap();
/// assert_eq!(*element.value(), 42);
/// ```
pub struct Element<T> {
    id: ElementId,
    value: T,

    /// Gap just below this element.
    pub(super) prev_gap: GapId,

    /// Gap just above this element.
    pub(super) next_gap: GapId,
}

impl<T> Element<T> {
    /// The stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Stable identity of this element within its tree.
    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl<T: PartialEq> PartialEq for Element<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Element<T> {}

impl<T: fmt::Debug> fmt::Debug for Element<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Element<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> Arena<T> {
    /// Wrap `value` in a new element with fresh boundary gaps on both sides.
    pub(super) fn new_element(&mut self, value: T) -> ElementId {
        let id = self.next_element_id();
        let prev_gap = self.alloc_gap(Gap::before(id));
        let next_gap = self.alloc_gap(Gap::after(id));

        self.push_element(Element {
            id,
            value,
            prev_gap,
            next_gap,
        })
    }

    /// The element above `element` in its node, if any.
    #[inline]
    pub(super) fn next(&self, element: ElementId) -> Option<ElementId> {
        self.gap(self.element(element).next_gap).upper
    }

    /// The element below `element` in its node, if any.
    #[inline]
    pub(super) fn previous(&self, element: ElementId) -> Option<ElementId> {
        self.gap(self.element(element).prev_gap).lower
    }

    /// Cut the chain above `element`.
    ///
    /// The gap above stays in place, child included; it simply becomes the
    /// last gap of the node.
    pub(super) fn sever_toward_next(&mut self, element: ElementId) {
        let gap = self.element(element).next_gap;
        self.gap_mut(gap).upper = None;
    }

    /// Replace the gap above `element` with a fresh, childless boundary gap.
    ///
    /// The old gap is left untouched for whoever still links to it.
    pub(super) fn terminate_upper_boundary(&mut self, element: ElementId) {
        let gap = self.alloc_gap(Gap::after(element));
        self.element_mut(element).next_gap = gap;
    }

    /// Replace the gap below `element` with a fresh, childless boundary gap.
    pub(super) fn terminate_lower_boundary(&mut self, element: ElementId) {
        let gap = self.alloc_gap(Gap::before(element));
        self.element_mut(element).prev_gap = gap;
    }

    /// Detach `element` onto fresh boundary gaps carrying the same two
    /// subtrees it had on either side.
    ///
    /// The result is ready for [`insert_promoted`](Arena::insert_promoted)
    /// into another node. The old gaps are not freed: the neighbouring
    /// elements may still be linked to them.
    pub(super) fn lift_out(&mut self, element: ElementId) {
        let (below, above) = {
            let e = self.element(element);
            (self.gap(e.prev_gap).child(), self.gap(e.next_gap).child())
        };

        self.terminate_lower_boundary(element);
        self.terminate_upper_boundary(element);

        let (prev_gap, next_gap) = {
            let e = self.element(element);
            (e.prev_gap, e.next_gap)
        };
        self.set_gap_child(prev_gap, below);
        self.set_gap_child(next_gap, above);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::gap::Child;

    /// Link `elements` into one ascending chain, sharing the gaps between
    /// neighbours the way a node does.
    fn chain(arena: &mut Arena<u32>, values: &[u32]) -> Vec<ElementId> {
        let ids: Vec<ElementId> = values.iter().map(|&v| arena.new_element(v)).collect();
        for pair in ids.windows(2) {
            let shared = arena.element(pair[0]).next_gap;
            arena.gap_mut(shared).upper = Some(pair[1]);
            arena.element_mut(pair[1]).prev_gap = shared;
        }
        ids
    }

    #[test]
    fn test_new_element_has_boundary_gaps() {
        let mut arena: Arena<u32> = Arena::new();
        let e = arena.new_element(7);

        assert_eq!(*arena.element(e).value(), 7);
        assert_eq!(arena.next(e), None);
        assert_eq!(arena.previous(e), None);

        let prev = arena.gap(arena.element(e).prev_gap);
        assert_eq!(prev.upper, Some(e));
        assert_eq!(prev.child(), Child::Leaf);
    }

    #[test]
    fn test_equality_is_by_value() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.new_element(5);
        let b = arena.new_element(5);
        let c = arena.new_element(6);

        assert_ne!(a, b);
        assert_eq!(arena.element(a), arena.element(b));
        assert_ne!(arena.element(a), arena.element(c));
    }

    #[test]
    fn test_next_and_previous() {
        let mut arena: Arena<u32> = Arena::new();
        let ids = chain(&mut arena, &[1, 2, 3]);

        assert_eq!(arena.next(ids[0]), Some(ids[1]));
        assert_eq!(arena.next(ids[1]), Some(ids[2]));
        assert_eq!(arena.next(ids[2]), None);
        assert_eq!(arena.previous(ids[2]), Some(ids[1]));
        assert_eq!(arena.previous(ids[0]), None);
    }

    #[test]
    fn test_sever_toward_next_keeps_child() {
        let mut arena: Arena<u32> = Arena::new();
        let child = arena.alloc_node(3);
        let ids = chain(&mut arena, &[1, 2]);

        let shared = arena.element(ids[0]).next_gap;
        arena.set_gap_child(shared, Child::Internal(child));

        arena.sever_toward_next(ids[0]);

        assert_eq!(arena.next(ids[0]), None);
        assert_eq!(arena.gap(shared).child(), Child::Internal(child));
        // The element above still points down at the old gap.
        assert_eq!(arena.previous(ids[1]), Some(ids[0]));
    }

    #[test]
    fn test_terminate_upper_boundary() {
        let mut arena: Arena<u32> = Arena::new();
        let ids = chain(&mut arena, &[1, 2]);
        let old = arena.element(ids[0]).next_gap;

        arena.terminate_upper_boundary(ids[0]);

        let new = arena.element(ids[0]).next_gap;
        assert_ne!(new, old);
        assert_eq!(arena.next(ids[0]), None);
        assert_eq!(arena.gap(new).child(), Child::Leaf);
        // The old gap still links the upper neighbour back.
        assert_eq!(arena.gap(old).upper, Some(ids[1]));
    }

    #[test]
    fn test_lift_out_carries_subtrees() {
        let mut arena: Arena<u32> = Arena::new();
        let left = arena.alloc_node(3);
        let right = arena.alloc_node(3);
        let owner = arena.alloc_node(3);
        let ids = chain(&mut arena, &[1, 2, 3]);

        let below = arena.element(ids[1]).prev_gap;
        let above = arena.element(ids[1]).next_gap;
        arena.set_gap_owner(below, owner);
        arena.set_gap_owner(above, owner);
        arena.set_gap_child(below, Child::Internal(left));
        arena.set_gap_child(above, Child::Internal(right));

        arena.lift_out(ids[1]);

        let e = arena.element(ids[1]);
        assert_ne!(e.prev_gap, below);
        assert_ne!(e.next_gap, above);
        assert_eq!(arena.gap(e.prev_gap).child(), Child::Internal(left));
        assert_eq!(arena.gap(e.next_gap).child(), Child::Internal(right));
        assert_eq!(arena.next(ids[1]), None);
        assert_eq!(arena.previous(ids[1]), None);

        // Fresh gaps have no owner yet, so the subtrees are parentless
        // until the element lands in its new node.
        assert_eq!(arena.node(left).parent, None);
        assert_eq!(arena.node(right).parent, None);
    }
}
