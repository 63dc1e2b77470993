//! ByteBuffer - the growable byte sequence recycled by the pool.

use std::io;

/// A growable byte buffer for append-heavy workloads.
///
/// A `ByteBuffer` is exclusively owned by whichever holder currently has
/// it: the pool keeps released buffers, and [`Pool::acquire`] moves one out
/// to the caller. Ownership moves back on [`Pool::release`], so a buffer can
/// never be observed by two parties at once.
///
/// Growth follows `Vec`'s amortized doubling; no operation ever shrinks
/// capacity. That is what makes recycling worthwhile: a buffer that grew to
/// fit one payload starts out pre-sized for the next one.
///
/// # Example
/// ```
/// use bytepool::ByteBuffer;
///
/// let mut buf = ByteBuffer::with_capacity(64);
/// buf.append(b"hello ");
/// buf.append_str("world");
/// assert_eq!(buf.as_slice(), b"hello world");
///
/// buf.reset();
/// assert!(buf.is_empty());
/// assert!(buf.capacity() >= 64);
/// ```
///
/// [`Pool::acquire`]: crate::pool::Pool::acquire
/// [`Pool::release`]: crate::pool::Pool::release
#[derive(Debug)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Create an empty buffer with no reserved capacity.
    #[inline]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty buffer with at least `capacity` bytes reserved.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes of logical content.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no logical content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes physically reserved. Always at least [`len`](Self::len).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// View the logical content.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Append bytes to the logical content, growing capacity if exhausted.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a string's bytes to the logical content.
    #[inline]
    pub fn append_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Replace the logical content with `bytes`, reusing existing capacity
    /// when it is sufficient.
    pub fn set(&mut self, bytes: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(bytes);
    }

    /// Replace the logical content with a string's bytes.
    pub fn set_str(&mut self, s: &str) {
        self.set(s.as_bytes());
    }

    /// Set logical length to zero. Capacity is untouched, which is what
    /// lets the pool hand the buffer out again empty but pre-sized.
    #[inline]
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Consume the buffer, returning the underlying bytes.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for ByteBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// `write` appends, so a `ByteBuffer` drops into any code that serializes
/// through [`io::Write`].
impl io::Write for ByteBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_is_empty() {
        let buf = ByteBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn test_with_capacity_reserves() {
        let buf = ByteBuffer::with_capacity(1024);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 1024);
    }

    #[test]
    fn test_append_grows() {
        let mut buf = ByteBuffer::new();
        buf.append(b"foo");
        buf.append(b"bar");
        assert_eq!(buf.as_slice(), b"foobar");
        assert_eq!(buf.len(), 6);
        assert!(buf.capacity() >= 6);
    }

    #[test]
    fn test_append_str() {
        let mut buf = ByteBuffer::new();
        buf.append_str("num ");
        buf.append_str("42");
        assert_eq!(buf.as_slice(), b"num 42");
    }

    #[test]
    fn test_set_reuses_capacity() {
        let mut buf = ByteBuffer::with_capacity(256);
        buf.append(&[0xAB; 200]);
        let cap = buf.capacity();

        buf.set(b"short");
        assert_eq!(buf.as_slice(), b"short");
        assert_eq!(buf.capacity(), cap);

        buf.set_str("shorter still");
        assert_eq!(buf.as_slice(), b"shorter still");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut buf = ByteBuffer::new();
        buf.append(&[7u8; 500]);
        let cap = buf.capacity();

        buf.reset();

        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_io_write_appends() {
        let mut buf = ByteBuffer::new();
        buf.write_all(b"foo").unwrap();
        write!(buf, "bar{}", 7).unwrap();
        buf.flush().unwrap();
        assert_eq!(buf.as_slice(), b"foobar7");
    }

    #[test]
    fn test_from_vec_and_into_vec() {
        let buf = ByteBuffer::from(vec![1u8, 2, 3]);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut buf = ByteBuffer::new();
        for chunk in 0..64 {
            buf.append(&[chunk as u8; 33]);
            assert!(buf.len() <= buf.capacity());
        }
    }
}
