//! Structural validation of a whole tree.
//!
//! Walks the tree from the root and checks, for every node:
//! - the `Gap - Element - ... - Gap` chain is wired consistently in both
//!   directions and every gap is owned by the node
//! - the element count does not exceed the node's order
//! - values are strictly ascending and lie strictly inside the bounds of
//!   the gap the node hangs under
//! - children are either all present (internal node) or all absent (leaf),
//!   and every child points back at the node
//! - every leaf sits at depth `height`
//!
//! and, for the tree as a whole, that every node is reachable exactly once,
//! that only the root is parentless, that the element count matches `len`,
//! and that no gap slot is leaked.

use crate::common::{Error, GapId, NodeId, Result};

use super::arena::Arena;

fn corrupted(message: String) -> Error {
    Error::Corrupted(message)
}

/// Accumulated state of one validation pass.
struct Walk {
    visited: Vec<bool>,
    elements: usize,
    gaps: usize,
    height: usize,
}

impl<T: Ord> Arena<T> {
    pub(super) fn validate(&self, root: NodeId, height: usize, len: usize) -> Result<()> {
        if root.0 >= self.node_count() {
            return Err(corrupted(format!("root {} is not allocated", root)));
        }
        if let Some(parent) = self.node(root).parent {
            return Err(corrupted(format!("root {} has parent {}", root, parent)));
        }

        let mut walk = Walk {
            visited: vec![false; self.node_count()],
            elements: 0,
            gaps: 0,
            height,
        };
        self.check_node(root, None, None, 1, &mut walk)?;

        if let Some(orphan) = walk.visited.iter().position(|&seen| !seen) {
            return Err(corrupted(format!(
                "{} is unreachable from root {}",
                NodeId::new(orphan),
                root
            )));
        }
        if walk.elements != len {
            return Err(corrupted(format!(
                "tree holds {} elements but len is {}",
                walk.elements, len
            )));
        }
        if walk.gaps != self.live_gap_count() {
            return Err(corrupted(format!(
                "{} gaps are linked but {} slots are in use",
                walk.gaps,
                self.live_gap_count()
            )));
        }
        Ok(())
    }

    fn check_node(
        &self,
        node: NodeId,
        lower: Option<&T>,
        upper: Option<&T>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        if node.0 >= self.node_count() {
            return Err(corrupted(format!("{} is not allocated", node)));
        }
        if walk.visited[node.0] {
            return Err(corrupted(format!("{} is reachable twice", node)));
        }
        walk.visited[node.0] = true;

        let n = self.node(node);
        let Some(first_gap) = n.first_gap else {
            // Only the root of an empty tree may be empty.
            if n.parent.is_some() {
                return Err(corrupted(format!("non-root {} is empty", node)));
            }
            return Ok(());
        };

        // Walk the chain, collecting gaps and values.
        let mut gaps: Vec<GapId> = Vec::new();
        let mut values: Vec<&T> = Vec::new();
        let mut below = None;
        let mut gap_id = first_gap;
        loop {
            let gap = self
                .get_gap(gap_id)
                .ok_or_else(|| corrupted(format!("{} links freed {}", node, gap_id)))?;
            if gap.lower != below {
                return Err(corrupted(format!(
                    "{} in {} has lower bound {:?}, expected {:?}",
                    gap_id, node, gap.lower, below
                )));
            }
            if gap.owner() != Some(node) {
                return Err(corrupted(format!(
                    "{} in {} is owned by {:?}",
                    gap_id,
                    node,
                    gap.owner()
                )));
            }
            gaps.push(gap_id);

            let Some(element_id) = gap.upper else {
                break;
            };
            let element = self.element(element_id);
            if element.prev_gap != gap_id {
                return Err(corrupted(format!(
                    "{} in {} does not link back to {}",
                    element_id, node, gap_id
                )));
            }
            values.push(element.value());
            if values.len() > n.order() {
                return Err(corrupted(format!(
                    "{} holds more than {} elements",
                    node,
                    n.order()
                )));
            }
            below = Some(element_id);
            gap_id = element.next_gap;
        }

        if values.is_empty() {
            return Err(corrupted(format!("{} has gaps but no elements", node)));
        }
        if values.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(corrupted(format!("{} is not strictly ascending", node)));
        }
        let (first, last) = (values[0], values[values.len() - 1]);
        if lower.is_some_and(|lower| first <= lower) || upper.is_some_and(|upper| last >= upper) {
            return Err(corrupted(format!(
                "{} holds values outside the bounds of its parent gap",
                node
            )));
        }

        walk.elements += values.len();
        walk.gaps += gaps.len();

        let children: Vec<Option<NodeId>> =
            gaps.iter().map(|&g| self.gap(g).child().node()).collect();

        if children.iter().all(Option::is_none) {
            if depth != walk.height {
                return Err(corrupted(format!(
                    "leaf {} at depth {}, expected {}",
                    node, depth, walk.height
                )));
            }
            return Ok(());
        }
        if children.iter().any(Option::is_none) {
            return Err(corrupted(format!("{} mixes leaf and internal gaps", node)));
        }

        for (i, child) in children.into_iter().flatten().enumerate() {
            if self.node_count() <= child.0 {
                return Err(corrupted(format!("{} points at missing {}", node, child)));
            }
            if self.node(child).parent != Some(node) {
                return Err(corrupted(format!(
                    "{} hangs under {} but its parent is {:?}",
                    child,
                    node,
                    self.node(child).parent
                )));
            }
            let child_lower = if i == 0 { lower } else { Some(values[i - 1]) };
            let child_upper = if i == values.len() { upper } else { Some(values[i]) };
            self.check_node(child, child_lower, child_upper, depth + 1, walk)?;
        }
        Ok(())
    }
}
