//! Fixed-capacity scratch buffer for formatted lines.

use core::fmt;

/// Stack buffer of `N` bytes holding at most `N - 1` bytes of text.
///
/// The final slot always holds a terminating NUL. Pushing past the
/// capacity silently truncates.
pub struct LineBuffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Visible capacity, excluding the NUL slot.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len >= self.capacity()
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// Append one byte; returns `false` if the buffer was full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        self.bytes[self.len] = 0;
        true
    }

    /// Append as much of `bytes` as fits; returns the number taken.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        let take = bytes.len().min(self.remaining());
        self.bytes[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
        if N > 0 {
            self.bytes[self.len] = 0;
        }
        take
    }

    pub fn push_str(&mut self, s: &str) -> usize {
        self.push_bytes(s.as_bytes())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Contents including the terminating NUL, if `N > 0`.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..(self.len + 1).min(N)]
    }

    pub fn clear(&mut self) {
        self.len = 0;
        if N > 0 {
            self.bytes[0] = 0;
        }
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for LineBuffer<N> {
    /// Never fails; output beyond the capacity is dropped.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for LineBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}
