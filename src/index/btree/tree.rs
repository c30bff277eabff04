//! BTree - the public face of the index.

use std::sync::atomic::Ordering;

use crate::common::config::{DEFAULT_ORDER, MIN_ORDER};
use crate::common::{Error, NodeId, Result};

use super::arena::Arena;
use super::element::Element;
use super::stats::TreeStats;

/// Receives the new root when a split reaches the top of the tree.
///
/// This is the only way node-level code talks back to the tree that owns
/// it. It fires at most once per top-level insert, and only when the old
/// root itself split.
pub trait RootAdopter {
    fn adopt_new_root(&mut self, node: NodeId);
}

/// The tree's root slot.
#[derive(Debug)]
struct Root {
    node: NodeId,

    /// Number of levels, 1 for a lone (possibly empty) leaf.
    height: usize,
}

impl RootAdopter for Root {
    fn adopt_new_root(&mut self, node: NodeId) {
        log::debug!(
            "adopting {} as root (was {}), height {} -> {}",
            node,
            self.node,
            self.height,
            self.height + 1
        );
        self.node = node;
        self.height += 1;
    }
}

/// An in-memory B-tree of unique, ordered values.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                      BTree<T>                        │
/// │  ┌────────────┐   ┌───────────────────────────────┐  │
/// │  │ root: Root │──▶│          Arena<T>             │  │
/// │  │ (adopter)  │◀──│ nodes │ elements │ gaps+free  │  │
/// │  └────────────┘   └───────────────────────────────┘  │
/// │  ┌────────────┐                                      │
/// │  │ TreeStats  │  atomic counters                     │
/// │  └────────────┘                                      │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// Every node holds at most `order` elements between calls. Inserting
/// into a full node splits it around the element at
/// [`promotion_index`](crate::common::config::promotion_index) and pushes
/// that element into the parent, recursively; a root split grows the tree
/// by one level.
///
/// # Thread Safety
/// Not synchronized. Inserts take `&mut self`; a search observes a tree
/// that is never mid-split.
///
/// # Example
/// ```
/// use gaptree::{BTree, Error};
///
/// let mut tree = BTree::new(2)?;
/// for v in [10, 20, 30] {
///     tree.insert(v)?;
/// }
///
/// assert_eq!(tree.node_values(tree.root()), vec![&20]);
/// assert_eq!(*tree.search(&20).unwrap().value(), 20);
/// assert!(tree.search(&15).is_none());
/// assert_eq!(tree.insert(20), Err(Error::DuplicateKey));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug)]
pub struct BTree<T> {
    arena: Arena<T>,
    root: Root,
    order: usize,
    len: usize,
    stats: TreeStats,
}

impl<T: Ord> BTree<T> {
    /// Create an empty tree whose nodes hold at most `order` values.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order` is below [`MIN_ORDER`]
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder(order));
        }
        Ok(Self::with_order_unchecked(order))
    }

    /// Create an empty tree of [`DEFAULT_ORDER`].
    pub fn with_default_order() -> Self {
        Self::with_order_unchecked(DEFAULT_ORDER)
    }

    fn with_order_unchecked(order: usize) -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc_node(order);

        Self {
            arena,
            root: Root {
                node: root,
                height: 1,
            },
            order,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Insert and search
    // ========================================================================

    /// Insert `value`.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if an equal value is already stored; the
    ///   tree is unchanged
    pub fn insert(&mut self, value: T) -> Result<()> {
        let target = self.arena.find(self.root.node, &value);

        if self.arena.element_containing(target, &value).is_some() {
            log::warn!("rejecting duplicate insert into {}", target);
            self.stats
                .duplicates_rejected
                .fetch_add(1, Ordering::Relaxed);
            return Err(Error::DuplicateKey);
        }

        log::trace!("insert into {}", target);
        let nodes_before = self.arena.node_count();
        let height_before = self.root.height;

        self.arena.insert(target, value, &mut self.root);
        self.len += 1;

        // Each split allocates exactly one sibling; a root split also
        // allocates the new root.
        let grown = (self.root.height - height_before) as u64;
        let created = (self.arena.node_count() - nodes_before) as u64;
        self.stats.inserts.fetch_add(1, Ordering::Relaxed);
        self.stats.splits.fetch_add(created - grown, Ordering::Relaxed);
        self.stats.root_splits.fetch_add(grown, Ordering::Relaxed);

        Ok(())
    }

    /// Find the stored element equal to `key`.
    ///
    /// Returns `None` (not found) when no equal value was ever inserted.
    pub fn search(&self, key: &T) -> Option<&Element<T>> {
        let found = self.arena.search(self.root.node, key);
        self.stats.record_search(found.is_some());
        found.map(|e| self.arena.element(e))
    }

    /// Whether a value equal to `key` is stored.
    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    /// Check every structural invariant of the tree.
    ///
    /// # Errors
    /// - `Error::Corrupted` describing the first violation found
    pub fn validate(&self) -> Result<()> {
        self.arena
            .validate(self.root.node, self.root.height, self.len)
    }
}

impl<T> BTree<T> {
    // ========================================================================
    // Public API: Shape and inspection
    // ========================================================================

    /// Number of values stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of values per node.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of levels; 1 while the root is a leaf.
    pub fn height(&self) -> usize {
        self.root.height
    }

    /// The current root node.
    pub fn root(&self) -> NodeId {
        self.root.node
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    /// Operation counters.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    pub(super) fn arena(&self) -> &Arena<T> {
        &self.arena
    }

    /// Values held directly by `node`, ascending.
    ///
    /// # Panics
    /// Panics if `node` does not belong to this tree.
    pub fn node_values(&self, node: NodeId) -> Vec<&T> {
        self.arena
            .elements(node)
            .map(|e| self.arena.element(e).value())
            .collect()
    }

    /// Children of `node`, left to right; empty for a leaf.
    ///
    /// # Panics
    /// Panics if `node` does not belong to this tree.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arena.children(node)
    }

    /// Parent of `node`; `None` only for the root.
    ///
    /// # Panics
    /// Panics if `node` does not belong to this tree.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.node(node).parent
    }

    /// Whether `node` has no children.
    ///
    /// # Panics
    /// Panics if `node` does not belong to this tree.
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.arena.is_leaf(node)
    }
}

impl<T: Ord> Default for BTree<T> {
    fn default() -> Self {
        Self::with_default_order()
    }
}

impl<T: Ord> Extend<T> for BTree<T> {
    /// Insert every value; values already present are skipped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            // DuplicateKey is the only possible error
            let _ = self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BTree<T> {
    /// Build a tree of [`DEFAULT_ORDER`], skipping duplicates.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::with_default_order();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(tree: &BTree<T>, node: NodeId) -> Vec<T> {
        tree.node_values(node).into_iter().copied().collect()
    }

    #[test]
    fn test_new_tree() {
        let tree: BTree<u32> = BTree::new(3).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.order(), 3);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.parent(tree.root()).is_none());
        assert!(tree.is_leaf(tree.root()));
        assert!(tree.search(&1).is_none());
    }

    #[test]
    fn test_invalid_order() {
        assert_eq!(BTree::<u32>::new(0).unwrap_err(), Error::InvalidOrder(0));
        assert_eq!(BTree::<u32>::new(1).unwrap_err(), Error::InvalidOrder(1));
        assert!(BTree::<u32>::new(MIN_ORDER).is_ok());
    }

    #[test]
    fn test_default_order() {
        let tree: BTree<u32> = BTree::default();
        assert_eq!(tree.order(), DEFAULT_ORDER);
    }

    #[test]
    fn test_root_adoption() {
        let mut tree = BTree::new(2).unwrap();
        let first_root = tree.root();

        tree.insert(10).unwrap();
        tree.insert(20).unwrap();
        assert_eq!(tree.root(), first_root);

        tree.insert(30).unwrap();
        assert_ne!(tree.root(), first_root);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.parent(first_root), Some(tree.root()));
        assert_eq!(values(&tree, tree.root()), vec![20]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut tree = BTree::new(2).unwrap();
        for v in [10, 20, 30] {
            tree.insert(v).unwrap();
        }

        // 20 lives in the root, 10 in a leaf.
        assert_eq!(tree.insert(20), Err(Error::DuplicateKey));
        assert_eq!(tree.insert(10), Err(Error::DuplicateKey));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.stats().snapshot().duplicates_rejected, 2);
        tree.validate().unwrap();
    }

    #[test]
    fn test_search_returns_stored_element() {
        let mut tree = BTree::new(3).unwrap();
        for v in [5, 1, 9, 3, 7] {
            tree.insert(v).unwrap();
        }

        let element = tree.search(&9).unwrap();
        assert_eq!(*element.value(), 9);
        // Same slot every time.
        assert_eq!(tree.search(&9).unwrap().id(), element.id());

        assert!(tree.contains(&3));
        assert!(!tree.contains(&4));
    }

    #[test]
    fn test_stats_count_splits() {
        let mut tree = BTree::new(2).unwrap();
        for v in [10, 20, 30, 40, 50, 60, 70] {
            tree.insert(v).unwrap();
        }

        let snapshot = tree.stats().snapshot();
        assert_eq!(snapshot.inserts, 7);
        // leaf splits at 30, 50, 70; internal split at 70
        assert_eq!(snapshot.splits, 4);
        assert_eq!(snapshot.root_splits, 2);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_from_iter_skips_duplicates() {
        let tree: BTree<u32> = vec![3, 1, 2, 3, 1].into_iter().collect();
        assert_eq!(tree.len(), 3);
        for v in 1..=3 {
            assert!(tree.contains(&v));
        }
    }

    #[test]
    fn test_extend() {
        let mut tree = BTree::new(3).unwrap();
        tree.extend(0..50u32);
        tree.extend(25..75u32);
        assert_eq!(tree.len(), 75);
        tree.validate().unwrap();
    }

    #[test]
    fn test_string_values() {
        let mut tree = BTree::new(2).unwrap();
        for word in ["pear", "apple", "fig", "kiwi", "banana"] {
            tree.insert(word.to_string()).unwrap();
        }

        assert!(tree.contains(&"fig".to_string()));
        assert!(!tree.contains(&"grape".to_string()));
        tree.validate().unwrap();
    }
}
