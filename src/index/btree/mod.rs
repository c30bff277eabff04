//! B-tree index implementation.
//!
//! # Structure
//! Every node is an alternating chain `Gap - Element - Gap - ... - Gap`.
//! An element holds one value; a gap is the open interval between its two
//! neighbouring elements and may point at the child node covering that
//! interval:
//! ```text
//!            ┌───────────────────────────────┐
//!  Node(4):  │ Gap ─ [20] ─ Gap ─ [40] ─ Gap │
//!            └──┬────────────┬───────────┬───┘
//!               ▼            ▼           ▼
//!            Node(0)      Node(1)     Node(3)
//!           (.., 20)     (20, 40)    (40, ..)
//! ```
//!
//! All nodes, elements and gaps live in one [`Arena`](arena::Arena) and
//! refer to each other through [`NodeId`](crate::NodeId),
//! [`ElementId`](crate::ElementId) and [`GapId`](crate::GapId) handles.
//!
//! # Components
//! - [`BTree`] - The public tree: insert, search, inspection
//! - [`Element`] - A stored value, returned by searches
//! - [`RootAdopter`] - Callback through which a root split installs a new root
//! - [`TreeStats`] / [`StatsSnapshot`] - Operation counters

mod arena;
mod display;
mod element;
mod gap;
mod node;
mod stats;
mod tree;
mod validate;

pub use element::Element;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::{BTree, RootAdopter};
