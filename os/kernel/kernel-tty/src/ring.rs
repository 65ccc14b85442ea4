//! # Output Ring Buffer
//!
//! Fixed-capacity circular byte store between the formatter and the sinks.
//! Writes never block and never fail: when the buffer is full, the oldest
//! unread byte is discarded to make room.
//!
//! `head` and `tail` are free-running counters; they are reduced with a
//! bitmask only when indexing storage, so `head - tail` (wrapping) is the
//! number of valid bytes and can reach the full capacity `N`.

pub struct RingBuffer<const N: usize> {
    storage: [u8; N],
    /// Total bytes ever written.
    head: usize,
    /// Total bytes ever consumed or discarded.
    tail: usize,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "ring buffer capacity must be a power of two");
        N - 1
    };

    #[must_use]
    pub const fn new() -> Self {
        // Force evaluation of the capacity check for every instantiation.
        let _ = Self::MASK;
        Self {
            storage: [0; N],
            head: 0,
            tail: 0,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of unread bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.head.wrapping_sub(self.tail)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Append `bytes`, overwriting the oldest unread data when full.
    ///
    /// Always returns `bytes.len()`.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        for &b in bytes {
            self.push(b);
        }
        bytes.len()
    }

    /// Append one byte, discarding the oldest if the buffer is full.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if self.is_full() {
            self.tail = self.tail.wrapping_add(1);
        }
        self.storage[self.head & Self::MASK] = byte;
        self.head = self.head.wrapping_add(1);
    }

    /// Remove and return the oldest byte.
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let b = self.storage[self.tail & Self::MASK];
        self.tail = self.tail.wrapping_add(1);
        Some(b)
    }

    /// Drain up to `dest.len()` bytes into `dest`, oldest first.
    ///
    /// Returns the number of bytes copied.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        let count = dest.len().min(self.len());
        for slot in &mut dest[..count] {
            *slot = self.storage[self.tail & Self::MASK];
            self.tail = self.tail.wrapping_add(1);
        }
        count
    }

    /// Discard all unread bytes.
    pub const fn clear(&mut self) {
        self.tail = self.head;
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_last_n_bytes_in_order() {
        let mut ring = RingBuffer::<16>::new();
        for b in 0..20u8 {
            assert_eq!(ring.write(&[b]), 1);
        }
        assert_eq!(ring.len(), 16);
        assert!(ring.is_full());

        let mut out = [0u8; 16];
        assert_eq!(ring.read(&mut out), 16);
        assert_eq!(out, core::array::from_fn::<u8, 16, _>(|i| 4 + u8::try_from(i).unwrap()));
        assert_eq!(ring.len(), 0);
        assert!(ring.is_empty());
    }

    #[test]
    fn read_is_bounded_by_available_and_destination() {
        let mut ring = RingBuffer::<8>::new();
        ring.write(b"abc");

        let mut small = [0u8; 2];
        assert_eq!(ring.read(&mut small), 2);
        assert_eq!(&small, b"ab");

        let mut large = [0u8; 8];
        assert_eq!(ring.read(&mut large), 1);
        assert_eq!(large[0], b'c');
        assert_eq!(ring.read(&mut large), 0);
    }

    #[test]
    fn write_larger_than_capacity_reports_full_length() {
        let mut ring = RingBuffer::<4>::new();
        assert_eq!(ring.write(b"0123456789"), 10);

        let mut out = [0u8; 4];
        assert_eq!(ring.read(&mut out), 4);
        assert_eq!(&out, b"6789");
    }

    #[test]
    fn indices_wrap_across_storage_boundary() {
        let mut ring = RingBuffer::<4>::new();
        let mut out = [0u8; 3];
        for round in 0..10u8 {
            ring.write(&[round, round + 1, round + 2]);
            assert_eq!(ring.read(&mut out), 3);
            assert_eq!(out, [round, round + 1, round + 2]);
        }
    }

    #[test]
    fn push_pop_and_clear() {
        let mut ring = RingBuffer::<2>::new();
        ring.push(1);
        ring.push(2);
        ring.push(3);
        assert_eq!(ring.pop(), Some(2));
        ring.clear();
        assert_eq!(ring.pop(), None);
        assert_eq!(ring.capacity(), 2);
    }
}
