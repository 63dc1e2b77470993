//! Configuration constants for bytepool.

/// log2 of the smallest managed buffer size.
///
/// Together with [`STEPS`] this fixes the spectrum of sizes the pool
/// tracks. 64 bytes is small enough to catch tiny control messages while
/// keeping the class count manageable.
pub const MIN_BIT_SIZE: u32 = 6;

/// Number of geometrically-spaced size classes.
///
/// Class `i` covers logical lengths in `(MIN_SIZE << (i - 1), MIN_SIZE << i]`
/// (class 0 additionally covers `0..=MIN_SIZE`). Lengths past the top of the
/// spectrum saturate into the last class.
pub const STEPS: usize = 20;

/// Smallest managed buffer size in bytes (64).
pub const MIN_SIZE: usize = 1 << MIN_BIT_SIZE;

/// Largest managed buffer size in bytes (32 MiB).
///
/// With 64-byte classes doubling 20 times the spectrum tops out at
/// `64 << 19` = 33,554,432 bytes.
pub const MAX_SIZE: usize = MIN_SIZE << (STEPS - 1);

/// Number of releases observed in a single size class that triggers a
/// calibration pass.
///
/// The trigger fires when a class counter *exceeds* this value, i.e. on the
/// 42,001st release of that class since the previous calibration.
pub const CALIBRATE_CALLS_THRESHOLD: u64 = 42_000;

/// Fixed-point numerator of the retention percentile (0.95).
///
/// Calibration walks size classes in descending call-frequency order and
/// keeps raising the retention ceiling until the walked classes cover this
/// fraction of the total release volume. Integer arithmetic here is a
/// correctness requirement: calibration runs on the release hot path under
/// concurrent writers, and the accumulated call count must not overflow.
pub const MAX_PERCENTILE_NUMER: u64 = 95;

/// Fixed-point denominator of the retention percentile.
pub const MAX_PERCENTILE_DENOM: u64 = 100;

/// Fixed-point numerator of the default-size adjustment spread (0.05).
///
/// A class whose call count is within this fraction of the busiest class
/// counts as tied with it, and the larger of the tied sizes wins the
/// default. Without the spread, two adjacent near-equal classes make the
/// default size oscillate between calibrations.
pub const DEFAULT_SIZE_SPREAD_NUMER: u64 = 5;

/// Fixed-point denominator of the default-size adjustment spread.
pub const DEFAULT_SIZE_SPREAD_DENOM: u64 = 100;

/// Maximum number of buffers retained per size class.
///
/// There is no garbage collector to shed idle pooled buffers, so each
/// class's free list carries a hard bound instead; releases past the bound
/// drop the buffer.
pub const SHARD_CAPACITY: usize = 64;
