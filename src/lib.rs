//! bytepool - a self-calibrating pool of reusable byte buffers.
//!
//! Workloads that serialize a payload per request allocate the same
//! short-lived, variable-size buffers over and over. This crate recycles
//! those buffers instead, and it samples the sizes callers actually use so
//! that fresh buffers start large enough to avoid reallocation but not so
//! large that memory is wasted.
//!
//! # Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           bytepool                             │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │                     Pool (pool/)                         │  │
//! │  │   acquire ──▶ per-class free lists ──▶ ByteBuffer        │  │
//! │  │   release ──▶ size histogram ──▶ calibration pass        │  │
//! │  │              (default_size / max_size adapt)             │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! │                              ↓                                 │
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │                  ByteBuffer (buffer/)                    │  │
//! │  │        append / set / reset over a Vec<u8>               │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! │                              ↓                                 │
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │                   Primitives (common/)                   │  │
//! │  │       size-class mapping math + configuration            │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (ClassIndex, size-class math, config)
//! - [`buffer`] - The ByteBuffer handed to callers
//! - [`pool`] - The adaptive pool and its calibration pass
//!
//! # Quick Start
//! ```
//! // The process-wide default pool:
//! let mut buf = bytepool::acquire();
//! buf.append_str("per-request payload");
//! // ... send buf.as_slice() somewhere ...
//! bytepool::release(buf);
//!
//! // Or an isolated pool for a distinct buffer population:
//! use bytepool::Pool;
//!
//! let pool = Pool::new();
//! let mut buf = pool.acquire();
//! buf.append(b"large payload");
//! pool.release(buf);
//! ```

pub mod buffer;
pub mod common;
pub mod pool;

// Re-export commonly used items at crate root for convenience
pub use buffer::ByteBuffer;
pub use common::config::{MAX_SIZE, MIN_SIZE, STEPS};
pub use pool::{acquire, default_pool, release, Pool, PoolStats, StatsSnapshot};
