//! Common types and utilities shared across gaptree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Arena handles (NodeId, ElementId, GapId)

pub mod config;
mod element_id;
mod gap_id;
mod node_id;

pub use crate::error::{Error, Result};
pub use element_id::ElementId;
pub use gap_id::GapId;
pub use node_id::NodeId;
