//! The adaptive pool and its calibration machinery.
//!
//! # Components
//! - [`Pool`] - acquire/release plus the self-calibration pass
//! - [`PoolStats`] / [`StatsSnapshot`] - performance statistics
//! - [`default_pool`], [`acquire`], [`release`] - the process-wide instance
//!
//! Most callers use the free functions against the default pool. Construct
//! independent [`Pool`]s when distinct buffer populations (small control
//! messages vs. large payloads) would otherwise contaminate each other's
//! size histogram.

mod pool;
mod shard;
mod stats;

pub use pool::Pool;
pub use stats::{PoolStats, StatsSnapshot};

use std::sync::OnceLock;

use crate::buffer::ByteBuffer;

static DEFAULT_POOL: OnceLock<Pool> = OnceLock::new();

/// Get the process-wide default pool.
///
/// A convenience, not the only way in: every method here is available on an
/// explicitly constructed [`Pool`], which is what tests and size-segregated
/// callers should use.
pub fn default_pool() -> &'static Pool {
    DEFAULT_POOL.get_or_init(Pool::new)
}

/// Acquire an empty byte buffer from the default pool.
///
/// The buffer may be returned via [`release`], which reduces the number of
/// allocations needed for buffer management.
pub fn acquire() -> ByteBuffer {
    default_pool().acquire()
}

/// Return a byte buffer to the default pool.
///
/// Ownership moves into the pool; acquire a fresh buffer for the next use.
pub fn release(buf: ByteBuffer) {
    default_pool().release(buf)
}
