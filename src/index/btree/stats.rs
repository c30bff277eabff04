//! Tree statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained by a [`BTree`](crate::BTree).
///
/// Searches take `&self`, so every counter is atomic. `Ordering::Relaxed`
/// is enough: the counters are independent and only ever read as a
/// snapshot.
///
/// # Example
/// ```
/// use gaptree::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for v in [10, 20, 30] {
///     tree.insert(v).unwrap();
/// }
/// assert!(tree.search(&20).is_some());
///
/// let snapshot = tree.stats().snapshot();
/// assert_eq!(snapshot.inserts, 3);
/// assert_eq!(snapshot.splits, 1);
/// assert_eq!(snapshot.root_splits, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Values successfully inserted.
    pub inserts: AtomicU64,

    /// Inserts rejected because the value was already present.
    pub duplicates_rejected: AtomicU64,

    /// Calls to `search` / `contains`.
    pub searches: AtomicU64,

    /// Searches that found their key.
    pub search_hits: AtomicU64,

    /// Node splits, including root splits.
    pub splits: AtomicU64,

    /// Splits that grew the tree by one level.
    pub root_splits: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            duplicates_rejected: AtomicU64::new(0),
            searches: AtomicU64::new(0),
            search_hits: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
        }
    }

    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            duplicates_rejected: self.duplicates_rejected.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            search_hits: self.search_hits.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.duplicates_rejected.store(0, Ordering::Relaxed);
        self.searches.store(0, Ordering::Relaxed);
        self.search_hits.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
    }

    pub(super) fn record_search(&self, hit: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.search_hits.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub duplicates_rejected: u64,
    pub searches: u64,
    pub search_hits: u64,
    pub splits: u64,
    pub root_splits: u64,
}

impl StatsSnapshot {
    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.search_hits as f64 / self.searches as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, duplicates: {}, splits: {}, root_splits: {}, searches: {}, hit_rate: {:.2}% }}",
            self.inserts,
            self.duplicates_rejected,
            self.splits,
            self.root_splits,
            self.searches,
            self.hit_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_search() {
        let stats = TreeStats::new();
        for hit in [true, true, true, false] {
            stats.record_search(hit);
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.searches, 4);
        assert_eq!(snapshot.search_hits, 3);
        assert_eq!(snapshot.hit_rate(), 0.75);
    }

    #[test]
    fn test_stats_reset() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(100, Ordering::Relaxed);
        stats.splits.fetch_add(7, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(80, Ordering::Relaxed);
        stats.splits.fetch_add(5, Ordering::Relaxed);
        stats.record_search(true);
        stats.record_search(false);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("inserts: 80"));
        assert!(display.contains("splits: 5"));
        assert!(display.contains("50.00%"));
    }
}
