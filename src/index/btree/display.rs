//! Human-readable dump of a tree, for debugging.
//!
//! One line per node in pre-order:
//! ```text
//! 20 - self = Node(2), parent = NULL
//! 10 - self = Node(0), parent = Node(2)
//! 30 - self = Node(1), parent = Node(2)
//! ```

use std::fmt;

use crate::common::NodeId;

use super::arena::Arena;
use super::tree::BTree;

impl<T: fmt::Display> Arena<T> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId) -> fmt::Result {
        for element in self.elements(node) {
            write!(f, "{} - ", self.element(element))?;
        }
        match self.node(node).parent {
            Some(parent) => writeln!(f, "self = {}, parent = {}", node, parent)?,
            None => writeln!(f, "self = {}, parent = NULL", node)?,
        }

        for child in self.children(node) {
            self.write_node(f, child)?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for BTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.arena().write_node(f, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_empty() {
        let tree: BTree<u32> = BTree::new(3).unwrap();
        assert_eq!(tree.to_string(), "self = Node(0), parent = NULL\n");
    }

    #[test]
    fn test_display_single_node() {
        let mut tree = BTree::new(3).unwrap();
        for v in [2, 1, 3] {
            tree.insert(v).unwrap();
        }
        assert_eq!(tree.to_string(), "1 - 2 - 3 - self = Node(0), parent = NULL\n");
    }

    #[test]
    fn test_display_after_root_split() {
        let mut tree = BTree::new(2).unwrap();
        for v in [10, 20, 30] {
            tree.insert(v).unwrap();
        }

        let expected = "20 - self = Node(2), parent = NULL\n\
                        10 - self = Node(0), parent = Node(2)\n\
                        30 - self = Node(1), parent = Node(2)\n";
        assert_eq!(tree.to_string(), expected);
    }
}
