//! Element identifier type.

use std::fmt;

/// Identifies an element (one stored value) in the tree's arena.
///
/// Elements are never freed: a value keeps its slot when it moves between
/// nodes during a split, so an `ElementId` is a stable identity for the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

impl ElementId {
    /// Create a new ElementId.
    #[inline]
    pub fn new(id: usize) -> Self {
        ElementId(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.0)
    }
}
