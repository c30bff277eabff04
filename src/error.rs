//! Error types for gaptree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the index.
///
/// A failed lookup is not an error: [`BTree::search`](crate::BTree::search)
/// returns `None` for a key that was never inserted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The tree order is below [`MIN_ORDER`](crate::common::config::MIN_ORDER).
    ///
    /// An order-1 node would split on its second element and never hold
    /// a usable median.
    #[error("Invalid tree order {0}: must be at least 2")]
    InvalidOrder(usize),

    /// The inserted value compares equal to a value already in the tree.
    ///
    /// The tree stores a set, so the insert is rejected and the tree is left
    /// untouched.
    #[error("Duplicate key")]
    DuplicateKey,

    /// A structural invariant does not hold.
    ///
    /// Only produced by [`BTree::validate`](crate::BTree::validate). This
    /// indicates a bug in the split/promote code, never a caller error.
    #[error("Corrupted tree: {0}")]
    Corrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOrder(1);
        assert_eq!(format!("{}", err), "Invalid tree order 1: must be at least 2");

        let err = Error::DuplicateKey;
        assert_eq!(format!("{}", err), "Duplicate key");

        let err = Error::Corrupted("Node(3) holds 5 elements".into());
        assert_eq!(format!("{}", err), "Corrupted tree: Node(3) holds 5 elements");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Err(Error::DuplicateKey)
        }

        assert_eq!(might_fail(), Err(Error::DuplicateKey));
    }
}
