//! Transaction counters.
//!
//! Counters are bumped while the store lock is held, so a snapshot taken
//! while no operation is in flight is exact.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of a store's transaction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Single-key transactions whose writes were applied
    pub transactions_committed: u64,
    /// Single-key transactions whose callback failed
    pub transactions_aborted: u64,
    /// Mutual transactions whose writes were applied
    pub mutual_transactions_committed: u64,
    /// Mutual transactions whose callback failed
    pub mutual_transactions_aborted: u64,
    /// Callbacks that held the lock past the slow threshold
    pub slow_callbacks: u64,
}

impl StoreMetrics {
    /// Committed transactions of both kinds.
    pub fn total_committed(&self) -> u64 {
        self.transactions_committed + self.mutual_transactions_committed
    }

    /// Aborted transactions of both kinds.
    pub fn total_aborted(&self) -> u64 {
        self.transactions_aborted + self.mutual_transactions_aborted
    }

    /// Commit success rate (0.0 - 1.0); 1.0 when nothing has run.
    pub fn commit_rate(&self) -> f64 {
        let total = self.total_committed() + self.total_aborted();
        if total == 0 {
            1.0
        } else {
            self.total_committed() as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    committed: AtomicU64,
    aborted: AtomicU64,
    mutual_committed: AtomicU64,
    mutual_aborted: AtomicU64,
    slow_callbacks: AtomicU64,
}

impl Counters {
    pub(crate) fn record_commit(&self) {
        self.committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_abort(&self) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_mutual_commit(&self) {
        self.mutual_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_mutual_abort(&self) {
        self.mutual_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_slow_callback(&self) {
        self.slow_callbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            transactions_committed: self.committed.load(Ordering::Relaxed),
            transactions_aborted: self.aborted.load(Ordering::Relaxed),
            mutual_transactions_committed: self.mutual_committed.load(Ordering::Relaxed),
            mutual_transactions_aborted: self.mutual_aborted.load(Ordering::Relaxed),
            slow_callbacks: self.slow_callbacks.load(Ordering::Relaxed),
        }
    }
}
