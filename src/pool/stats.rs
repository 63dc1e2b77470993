//! Pool statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the pool.
///
/// All fields are atomic for lock-free, thread-safe updates.
///
/// # Memory Ordering
/// `Ordering::Relaxed` throughout: counters only need atomicity, not
/// synchronization with one another, and statistics are read as an
/// eventually-consistent snapshot.
///
/// # Example
/// ```
/// use bytepool::PoolStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = PoolStats::new();
/// stats.reuses.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.reuses.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct PoolStats {
    /// Acquires served from a free list.
    pub reuses: AtomicU64,

    /// Acquires that had to allocate a fresh buffer.
    pub allocations: AtomicU64,

    /// Releases that put the buffer back into a free list.
    pub recycles: AtomicU64,

    /// Releases dropped because capacity exceeded the retention ceiling.
    pub drops_oversized: AtomicU64,

    /// Releases dropped because capacity dwarfed the payload.
    pub drops_underused: AtomicU64,

    /// Releases dropped because the target free list was full.
    pub drops_full: AtomicU64,

    /// Completed calibration passes.
    pub calibrations: AtomicU64,
}

impl PoolStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            reuses: AtomicU64::new(0),
            allocations: AtomicU64::new(0),
            recycles: AtomicU64::new(0),
            drops_oversized: AtomicU64::new(0),
            drops_underused: AtomicU64::new(0),
            drops_full: AtomicU64::new(0),
            calibrations: AtomicU64::new(0),
        }
    }

    /// Fraction of acquires served without allocating (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let reuses = self.reuses.load(Ordering::Relaxed);
        let allocations = self.allocations.load(Ordering::Relaxed);
        let total = reuses + allocations;

        if total == 0 {
            0.0
        } else {
            reuses as f64 / total as f64
        }
    }

    /// Get a non-atomic copy of the current statistics for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reuses: self.reuses.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
            recycles: self.recycles.load(Ordering::Relaxed),
            drops_oversized: self.drops_oversized.load(Ordering::Relaxed),
            drops_underused: self.drops_underused.load(Ordering::Relaxed),
            drops_full: self.drops_full.load(Ordering::Relaxed),
            calibrations: self.calibrations.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.reuses.store(0, Ordering::Relaxed);
        self.allocations.store(0, Ordering::Relaxed);
        self.recycles.store(0, Ordering::Relaxed);
        self.drops_oversized.store(0, Ordering::Relaxed);
        self.drops_underused.store(0, Ordering::Relaxed);
        self.drops_full.store(0, Ordering::Relaxed);
        self.calibrations.store(0, Ordering::Relaxed);
    }
}

impl Default for PoolStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of pool statistics.
///
/// Unlike [`PoolStats`], this is not atomic and can be safely printed,
/// serialized, compared, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub reuses: u64,
    pub allocations: u64,
    pub recycles: u64,
    pub drops_oversized: u64,
    pub drops_underused: u64,
    pub drops_full: u64,
    pub calibrations: u64,
}

impl StatsSnapshot {
    /// Fraction of acquires served without allocating (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.reuses + self.allocations;
        if total == 0 {
            0.0
        } else {
            self.reuses as f64 / total as f64
        }
    }

    /// Total releases the pool declined to keep.
    pub fn drops(&self) -> u64 {
        self.drops_oversized + self.drops_underused + self.drops_full
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ reuses: {}, allocations: {}, recycles: {}, drops: {}, calibrations: {}, hit_rate: {:.2}% }}",
            self.reuses,
            self.allocations,
            self.recycles,
            self.drops(),
            self.calibrations,
            self.hit_rate() * 100.0
        )
    }
}
