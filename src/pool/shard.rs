//! Per-size-class free list.

use parking_lot::Mutex;

use crate::buffer::ByteBuffer;
use crate::common::config::SHARD_CAPACITY;

/// A bounded free list holding the reusable buffers of one size class.
///
/// A LIFO stack so the most recently released (cache-warm) buffer is the
/// first one handed out again. Insert and remove are single push/pop
/// operations under the lock, so the critical section stays short no matter
/// how contended the pool is.
pub(crate) struct Shard {
    slots: Mutex<Vec<ByteBuffer>>,
}

impl Shard {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Pop the most recently released buffer, if any.
    pub(crate) fn pop(&self) -> Option<ByteBuffer> {
        self.slots.lock().pop()
    }

    /// Push a buffer, unless the shard is already at capacity.
    ///
    /// Returns `false` when full; the caller drops the buffer instead.
    pub(crate) fn push(&self, buf: ByteBuffer) -> bool {
        let mut slots = self.slots.lock();
        if slots.len() >= SHARD_CAPACITY {
            return false;
        }
        slots.push(buf);
        true
    }

    /// Number of buffers currently held.
    pub(crate) fn len(&self) -> usize {
        self.slots.lock().len()
    }
}
