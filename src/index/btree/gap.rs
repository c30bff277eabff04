//! Gap - the interval between two neighbouring elements of a node.
//!
//! A [`Gap`] knows its bounding elements (absent at the ends of a node) and
//! the subtree covering the values strictly between them. Whenever a gap's
//! child or owner changes, the child's `parent` back-reference is refreshed
//! through [`Arena::set_gap_child`] / [`Arena::set_gap_owner`].

use crate::common::{ElementId, GapId, NodeId};

use super::arena::Arena;

/// What hangs below a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Child {
    /// No subtree: the gap belongs to a leaf.
    Leaf,
    /// The node holding every value between the gap's bounds.
    Internal(NodeId),
}

impl Child {
    /// The child node, if any.
    #[inline]
    pub(crate) fn node(self) -> Option<NodeId> {
        match self {
            Child::Leaf => None,
            Child::Internal(node) => Some(node),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(self) -> bool {
        self == Child::Leaf
    }
}

/// The open interval `(lower, upper)` inside one node.
#[derive(Debug, Clone)]
pub(crate) struct Gap {
    /// Element just below the gap, `None` before the first element.
    pub(super) lower: Option<ElementId>,

    /// Element just above the gap, `None` after the last element.
    pub(super) upper: Option<ElementId>,

    child: Child,

    /// Node whose chain this gap is linked into.
    owner: Option<NodeId>,
}

impl Gap {
    /// Create a gap with the given bounds, no child and no owner.
    pub(super) fn new(lower: Option<ElementId>, upper: Option<ElementId>) -> Self {
        Self {
            lower,
            upper,
            child: Child::Leaf,
            owner: None,
        }
    }

    /// Boundary gap directly below `element`.
    #[inline]
    pub(super) fn before(element: ElementId) -> Self {
        Self::new(None, Some(element))
    }

    /// Boundary gap directly above `element`.
    #[inline]
    pub(super) fn after(element: ElementId) -> Self {
        Self::new(Some(element), None)
    }

    #[inline]
    pub(super) fn child(&self) -> Child {
        self.child
    }

    #[inline]
    pub(super) fn owner(&self) -> Option<NodeId> {
        self.owner
    }
}

// ============================================================================
// Back-reference synchronization
// ============================================================================

impl<T> Arena<T> {
    /// Point `gap` at `child`.
    ///
    /// An internal child is re-parented under the gap's current owner (or
    /// left parentless if the gap has no owner yet).
    pub(super) fn set_gap_child(&mut self, gap: GapId, child: Child) {
        let owner = {
            let g = self.gap_mut(gap);
            g.child = child;
            g.owner
        };
        if let Child::Internal(node) = child {
            self.node_mut(node).parent = owner;
        }
    }

    /// Move `gap` into `owner`'s chain, re-parenting its child there.
    pub(super) fn set_gap_owner(&mut self, gap: GapId, owner: NodeId) {
        let child = {
            let g = self.gap_mut(gap);
            g.owner = Some(owner);
            g.child
        };
        if let Child::Internal(node) = child {
            self.node_mut(node).parent = Some(owner);
        }
    }

    /// The gap following `gap` in its node's chain.
    #[inline]
    pub(super) fn next_gap(&self, gap: GapId) -> Option<GapId> {
        self.gap(gap).upper.map(|e| self.element(e).next_gap)
    }
}

impl<T: Ord> Arena<T> {
    /// Whether `value` lies strictly between the bounds of `gap`.
    ///
    /// A gap with neither bound never brackets anything; it only exists
    /// transiently while a node is empty.
    pub(super) fn gap_brackets(&self, gap: GapId, value: &T) -> bool {
        let g = self.gap(gap);
        let lower = g.lower.map(|e| self.element(e).value());
        let upper = g.upper.map(|e| self.element(e).value());

        match (lower, upper) {
            (None, Some(upper)) => upper > value,
            (Some(lower), None) => lower < value,
            (Some(lower), Some(upper)) => lower < value && value < upper,
            (None, None) => false,
        }
    }
}
