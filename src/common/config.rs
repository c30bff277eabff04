//! Configuration constants for gaptree.

/// Smallest order a tree may be built with.
///
/// With order 1 a node splits as soon as it holds two elements, and the
/// promotion index of a two-element node has no predecessor to keep.
pub const MIN_ORDER: usize = 2;

/// Order used by [`BTree::with_default_order`](crate::BTree::with_default_order)
/// and by `collect()`.
pub const DEFAULT_ORDER: usize = 4;

/// Index (0-based) of the element promoted out of an overflowing node.
///
/// Computes `round(count / 2) - 1` with round-half-up, which is the
/// median for odd counts and the left median for even counts:
///
/// | count | index |
/// |-------|-------|
/// | 3     | 1     |
/// | 4     | 1     |
/// | 5     | 2     |
/// | 6     | 2     |
/// | 7     | 3     |
///
/// # Panics
/// Panics if `count < 2`; only an overflowing node is ever split.
#[inline]
pub fn promotion_index(count: usize) -> usize {
    assert!(count >= 2, "cannot split a node holding {} elements", count);
    (count + 1) / 2 - 1
}
