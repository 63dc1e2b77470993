//! The byte buffer handed out by the pool.
//!
//! [`ByteBuffer`] is a thin owned wrapper over `Vec<u8>`; the interesting
//! behavior lives in [`pool`](crate::pool), which decides how large these
//! buffers start out and which ones are worth keeping.

mod byte_buffer;

pub use byte_buffer::ByteBuffer;
