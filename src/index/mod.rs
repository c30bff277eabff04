//! Index structures.
//!
//! - [`btree`] - In-memory B-tree built from gap-linked nodes
pub mod btree;
