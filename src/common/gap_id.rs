//! Gap identifier type.

use std::fmt;

/// Identifies a gap in the tree's arena.
///
/// Unlike nodes and elements, gaps are discarded as the structure changes,
/// and their slots are recycled. A `GapId` is only meaningful while the gap
/// is linked into some node's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GapId(pub usize);

impl GapId {
    /// Create a new GapId.
    #[inline]
    pub fn new(id: usize) -> Self {
        GapId(id)
    }
}

impl fmt::Display for GapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gap({})", self.0)
    }
}
