//! Arena - owned storage for every node, element and gap of one tree.
//!
//! The tree's pointer graph (gap → child, node → parent, gap ↔ element) is
//! expressed through handles into this arena instead of references.
//!
//! # Lifetimes of slots
//! - Nodes are never freed: a split only ever adds nodes.
//! - Elements are never freed: a value keeps its slot when it moves.
//! - Gaps are discarded constantly (every local insertion replaces one gap
//!   with two), so their slots go back onto a free list.

use crate::common::{ElementId, GapId, NodeId};

use super::element::Element;
use super::gap::Gap;
use super::node::Node;

/// Backing storage for a tree.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    nodes: Vec<Node>,

    elements: Vec<Element<T>>,

    /// `None` marks a freed slot.
    gaps: Vec<Option<Gap>>,

    /// Freed gap slots, reused LIFO.
    free_gaps: Vec<GapId>,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            elements: Vec::new(),
            gaps: Vec::new(),
            free_gaps: Vec::new(),
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Allocate an empty, parentless node.
    pub(super) fn alloc_node(&mut self, order: usize) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(order));
        id
    }

    #[inline]
    pub(super) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes ever allocated (all of them are live).
    #[inline]
    pub(super) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Elements
    // ========================================================================

    /// Push an element whose gaps were allocated by the caller.
    pub(super) fn push_element(&mut self, element: Element<T>) -> ElementId {
        let id = element.id();
        debug_assert_eq!(id.0, self.elements.len(), "element ids are dense");
        self.elements.push(element);
        id
    }

    /// The id the next pushed element will receive.
    #[inline]
    pub(super) fn next_element_id(&self) -> ElementId {
        ElementId::new(self.elements.len())
    }

    #[inline]
    pub(super) fn element(&self, id: ElementId) -> &Element<T> {
        &self.elements[id.0]
    }

    #[inline]
    pub(super) fn element_mut(&mut self, id: ElementId) -> &mut Element<T> {
        &mut self.elements[id.0]
    }

    // ========================================================================
    // Gaps
    // ========================================================================

    /// Store a gap, reusing a freed slot when one is available.
    pub(super) fn alloc_gap(&mut self, gap: Gap) -> GapId {
        match self.free_gaps.pop() {
            Some(id) => {
                self.gaps[id.0] = Some(gap);
                id
            }
            None => {
                let id = GapId::new(self.gaps.len());
                self.gaps.push(Some(gap));
                id
            }
        }
    }

    /// Release a gap that no chain links to anymore.
    ///
    /// Freeing does not touch the gap's child: the subtree is expected to
    /// hang under some other gap by now.
    pub(super) fn free_gap(&mut self, id: GapId) {
        let slot = &mut self.gaps[id.0];
        assert!(slot.is_some(), "{} freed twice", id);
        *slot = None;
        self.free_gaps.push(id);
    }

    /// Look up a gap without panicking on a freed slot.
    #[inline]
    pub(super) fn get_gap(&self, id: GapId) -> Option<&Gap> {
        self.gaps.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// # Panics
    /// Panics if the gap was freed; a freed gap reachable from a chain is
    /// a broken invariant.
    #[inline]
    pub(super) fn gap(&self, id: GapId) -> &Gap {
        match self.gaps[id.0] {
            Some(ref gap) => gap,
            None => panic!("{} used after it was freed", id),
        }
    }

    #[inline]
    pub(super) fn gap_mut(&mut self, id: GapId) -> &mut Gap {
        match self.gaps[id.0] {
            Some(ref mut gap) => gap,
            None => panic!("{} used after it was freed", id),
        }
    }

    /// Number of gap slots currently in use.
    pub(super) fn live_gap_count(&self) -> usize {
        self.gaps.len() - self.free_gaps.len()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_node() {
        let mut arena: Arena<u32> = Arena::new();
        assert_eq!(arena.alloc_node(3), NodeId::new(0));
        assert_eq!(arena.alloc_node(3), NodeId::new(1));
        assert_eq!(arena.node_count(), 2);
        assert!(arena.node(NodeId::new(1)).parent.is_none());
    }

    #[test]
    fn test_gap_slots_are_recycled() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc_gap(Gap::new(None, None));
        let b = arena.alloc_gap(Gap::new(None, None));
        assert_eq!(arena.live_gap_count(), 2);

        arena.free_gap(a);
        assert_eq!(arena.live_gap_count(), 1);
        assert!(arena.get_gap(a).is_none());
        assert!(arena.get_gap(b).is_some());

        // LIFO reuse
        let c = arena.alloc_gap(Gap::new(None, None));
        assert_eq!(c, a);
        assert_eq!(arena.live_gap_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_double_free_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let gap = arena.alloc_gap(Gap::new(None, None));
        arena.free_gap(gap);
        arena.free_gap(gap);
    }

    #[test]
    #[should_panic]
    fn test_freed_gap_access_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let gap = arena.alloc_gap(Gap::new(None, None));
        arena.free_gap(gap);
        let _ = arena.gap(gap);
    }

    #[test]
    fn test_get_gap_out_of_range() {
        let arena: Arena<u32> = Arena::new();
        assert!(arena.get_gap(GapId::new(99)).is_none());
    }
}
