//! The adaptive pool - acquire/release plus the calibration pass.
//!
//! A [`Pool`] recycles [`ByteBuffer`]s through per-size-class free lists
//! and keeps a lock-free histogram of the sizes callers actually release.
//! Once any class has seen enough traffic, a single-winner calibration pass
//! re-derives two numbers from the histogram:
//!
//! - `default_size`: the capacity fresh buffers start with, so the typical
//!   payload fits without reallocation
//! - `max_size`: the largest capacity worth keeping, so one oversized spike
//!   cannot pin memory

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use tracing::debug;

use crate::buffer::ByteBuffer;
use crate::common::config::{
    CALIBRATE_CALLS_THRESHOLD, DEFAULT_SIZE_SPREAD_DENOM, DEFAULT_SIZE_SPREAD_NUMER,
    MAX_PERCENTILE_DENOM, MAX_PERCENTILE_NUMER, MAX_SIZE, MIN_SIZE, STEPS,
};
use crate::common::{class_of, class_size, ClassIndex};
use crate::pool::shard::Shard;
use crate::pool::stats::PoolStats;

/// A self-calibrating pool of reusable byte buffers.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                           Pool                              │
/// │  ┌──────────────────┐   ┌─────────────────────────────────┐ │
/// │  │ calls[STEPS]     │   │        shards[STEPS]            │ │
/// │  │ release histogram│   │ [Shard0] [Shard1] [Shard2] ...  │ │
/// │  └────────┬─────────┘   └─────────────────────────────────┘ │
/// │           │ threshold crossed                               │
/// │  ┌────────▼─────────┐   ┌──────────────┐  ┌──────────────┐  │
/// │  │   calibrate()    │──▶│ default_size │  │   max_size   │  │
/// │  │ (single winner)  │   │   Atomic     │  │   Atomic     │  │
/// │  └──────────────────┘   └──────────────┘  └──────────────┘  │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// - `calls`: atomic counters — incremented without locks on every release
/// - `default_size` / `max_size`: atomic loads/stores — mutated only by
///   calibration
/// - `calibrating`: single CAS guard — losers return immediately, a missed
///   calibration just widens the next measurement window
/// - `shards`: per-class `Mutex<Vec<_>>` — one push/pop per critical section
/// - buffers themselves are moved by value, never shared
///
/// # Usage
/// ```
/// use bytepool::Pool;
///
/// let pool = Pool::new();
///
/// let mut buf = pool.acquire();
/// buf.append(b"serialized payload");
/// // ... hand the bytes somewhere ...
/// pool.release(buf);
/// ```
///
/// Distinct pools may be used for distinct types of byte buffers (say,
/// small control messages vs. large payloads); keeping the populations
/// apart keeps each histogram, and therefore each calibration, honest.
pub struct Pool {
    /// Per-class release counts since the last calibration.
    calls: [AtomicU64; STEPS],

    /// Single-writer guard: only one calibration pass runs at a time.
    calibrating: AtomicBool,

    /// Capacity given to fresh buffers when every shard misses.
    default_size: AtomicUsize,

    /// Largest capacity the pool agrees to retain.
    max_size: AtomicUsize,

    /// Per-class free lists.
    shards: [Shard; STEPS],

    /// Performance statistics.
    stats: PoolStats,
}

impl Pool {
    /// Create a pool with the untrained defaults: fresh buffers start at
    /// [`MIN_SIZE`] and anything inside the size spectrum is retained.
    /// Both numbers move on the first calibration.
    pub fn new() -> Self {
        Self {
            calls: std::array::from_fn(|_| AtomicU64::new(0)),
            calibrating: AtomicBool::new(false),
            default_size: AtomicUsize::new(MIN_SIZE),
            max_size: AtomicUsize::new(MAX_SIZE),
            shards: std::array::from_fn(|_| Shard::new()),
            stats: PoolStats::new(),
        }
    }

    // ========================================================================
    // Public API: acquire and release
    // ========================================================================

    /// Acquire an empty buffer.
    ///
    /// Scans the free lists starting at the class of the current default
    /// size (the best-known fit), then the larger classes, then the smaller
    /// ones. On a complete miss, allocates a fresh buffer with the default
    /// capacity. The returned buffer always has logical length zero.
    ///
    /// Never fails; allocation exhaustion is the runtime's fatal condition,
    /// not the pool's.
    pub fn acquire(&self) -> ByteBuffer {
        let start = class_of(self.default_size()).0;
        for idx in (start..STEPS).chain((0..start).rev()) {
            if let Some(mut buf) = self.shards[idx].pop() {
                buf.reset();
                self.stats.reuses.fetch_add(1, Ordering::Relaxed);
                return buf;
            }
        }

        self.stats.allocations.fetch_add(1, Ordering::Relaxed);
        ByteBuffer::with_capacity(self.default_size())
    }

    /// Return a buffer to the pool.
    ///
    /// The release is recorded in the histogram under the class of the
    /// buffer's *logical length*: the size the workload actually
    /// needed. Whether the buffer is kept is then decided from its
    /// *capacity*: oversized buffers (above the calibrated ceiling) and
    /// buffers whose payload used less than a quarter of their reserved
    /// space are dropped. Zero-length releases are exempt from the
    /// under-use check, since a reset buffer legitimately reports empty
    /// while holding useful capacity.
    ///
    /// Ownership moves into the pool; the buffer cannot be touched by the
    /// caller afterwards.
    pub fn release(&self, mut buf: ByteBuffer) {
        let idx = class_of(buf.len());
        if self.calls[idx.0].fetch_add(1, Ordering::Relaxed) + 1 > CALIBRATE_CALLS_THRESHOLD {
            self.calibrate();
        }

        let cap = buf.capacity();
        if cap > self.max_size() {
            // One oversized spike must not pin memory for the pool's lifetime.
            self.stats.drops_oversized.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let len = buf.len();
        if len > 0 && cap >> 2 > len {
            self.stats.drops_underused.fetch_add(1, Ordering::Relaxed);
            return;
        }

        buf.reset();
        if self.shards[class_of(cap).0].push(buf) {
            self.stats.recycles.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.drops_full.fetch_add(1, Ordering::Relaxed);
        }
    }

    // ========================================================================
    // Public API: inspection
    // ========================================================================

    /// Capacity currently assigned to freshly allocated buffers.
    #[inline]
    pub fn default_size(&self) -> usize {
        self.default_size.load(Ordering::Relaxed)
    }

    /// Largest buffer capacity the pool currently retains.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size.load(Ordering::Relaxed)
    }

    /// Number of buffers currently held across all free lists.
    pub fn retained_count(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    /// Get pool statistics.
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    // ========================================================================
    // Internal: calibration
    // ========================================================================

    /// Recompute `default_size` and `max_size` from the release histogram.
    ///
    /// Exactly one thread runs a pass at a time; a thread that loses the
    /// guard returns immediately and the triggering release proceeds as
    /// usual. The pass:
    ///
    /// 1. snapshots and zeroes every class counter
    /// 2. sorts classes by call count, descending (stable, so ties keep
    ///    ascending class order)
    /// 3. takes the busiest class's size as the new `default_size`
    /// 4. raises `max_size` while walking the sorted classes until the
    ///    accumulated calls cover `MAX_PERCENTILE` of the total volume,
    ///    so a rare huge buffer cannot lift the ceiling but a frequent one can
    /// 5. raises `default_size` to the largest class within
    ///    `DEFAULT_SIZE_SPREAD` of the winner's count, so near-tied
    ///    adjacent classes cannot make it oscillate between passes
    fn calibrate(&self) {
        if self
            .calibrating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let mut call_sizes: Vec<CallSize> = Vec::with_capacity(STEPS);
        let mut calls_sum: u64 = 0;
        for i in 0..STEPS {
            let calls = self.calls[i].swap(0, Ordering::Relaxed);
            calls_sum += calls;
            call_sizes.push(CallSize {
                calls,
                size: class_size(ClassIndex(i)),
            });
        }
        call_sizes.sort_by(|a, b| b.calls.cmp(&a.calls));

        let mut default_size = call_sizes[0].size;
        let mut max_size = default_size;

        // All u64: worst-case volume is STEPS * threshold plus concurrent
        // slack, nowhere near overflow even multiplied by the numerator.
        let max_sum = calls_sum * MAX_PERCENTILE_NUMER / MAX_PERCENTILE_DENOM;
        let mut covered: u64 = 0;
        for cs in &call_sizes {
            if covered > max_sum {
                break;
            }
            covered += cs.calls;
            if cs.size > max_size {
                max_size = cs.size;
            }
        }

        let top_calls = call_sizes[0].calls;
        let spread = top_calls * DEFAULT_SIZE_SPREAD_NUMER / DEFAULT_SIZE_SPREAD_DENOM;
        for cs in &call_sizes[1..] {
            if cs.calls + spread < top_calls {
                // Sorted descending: nothing further qualifies either.
                break;
            }
            if cs.size > default_size {
                default_size = cs.size;
            }
        }

        self.default_size.store(default_size, Ordering::Relaxed);
        self.max_size.store(max_size, Ordering::Relaxed);

        self.stats.calibrations.fetch_add(1, Ordering::Relaxed);
        debug!(default_size, max_size, releases = calls_sum, "pool recalibrated");

        self.calibrating.store(false, Ordering::Release);
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the calibration working set: a class's size paired with the
/// release count captured for it.
struct CallSize {
    calls: u64,
    size: usize,
}
