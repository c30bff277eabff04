//! gaptree - an in-memory, order-parameterized B-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            gaptree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Tree (index/btree/tree.rs)                  │   │
//! │  │     insert → find target → node insert → adopt root      │   │
//! │  │     search → descend through gaps                        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node (index/btree/node.rs)                  │   │
//! │  │  gap lookup │ local insert │ split │ promote to parent   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │       Element + Gap (index/btree/element.rs, gap.rs)     │   │
//! │  │   value with its two gaps │ interval with optional child │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Arena (index/btree/arena.rs)                │   │
//! │  │     nodes │ elements │ gaps + free list, by handle       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, ElementId, GapId, config)
//! - [`error`] - Error type and Result alias
//! - [`index`] - The B-tree itself
//!
//! # Quick Start
//! ```
//! use gaptree::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for v in [1, 2, 3, 4] {
//!     tree.insert(v).unwrap();
//! }
//!
//! // The fourth insert split the root around 2.
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.node_values(tree.root()), vec![&2]);
//!
//! assert!(tree.search(&3).is_some());
//! assert!(tree.search(&5).is_none());
//! ```

pub mod common;
pub mod error;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{ElementId, GapId, NodeId};
pub use error::{Error, Result};

pub use index::btree::{BTree, Element, RootAdopter, StatsSnapshot, TreeStats};
