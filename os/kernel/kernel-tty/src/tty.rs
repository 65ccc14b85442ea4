//! # TTY Pipeline
//!
//! Couples the [`RingBuffer`] with the [`Multiplexer`]: every write lands in
//! the ring and is flushed to all sinks right away.

use crate::color::ColorPair;
use crate::config::{FLUSH_CHUNK_SIZE, MAX_SINKS, TTY_BUFFER_SIZE};
use crate::mux::{FlushReport, Multiplexer, SinkId, TtyError};
use crate::ring::RingBuffer;
use crate::sink::OutputSink;

pub struct Tty<'a, const N: usize = TTY_BUFFER_SIZE, const S: usize = MAX_SINKS> {
    ring: RingBuffer<N>,
    sinks: Multiplexer<'a, S>,
}

impl<'a, const N: usize, const S: usize> Tty<'a, N, S> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: RingBuffer::new(),
            sinks: Multiplexer::new(),
        }
    }

    /// Add an output sink.
    ///
    /// # Errors
    /// [`TtyError::SinkTableFull`] if all sink slots are taken.
    pub fn register(&mut self, sink: &'a mut dyn OutputSink) -> Result<SinkId, TtyError> {
        self.sinks.register(sink)
    }

    /// Remove an output sink.
    ///
    /// # Errors
    /// [`TtyError::UnknownSink`] if `id` is not registered.
    pub fn unregister(&mut self, id: SinkId) -> Result<&'a mut dyn OutputSink, TtyError> {
        self.sinks.unregister(id)
    }

    #[must_use]
    pub const fn sinks(&self) -> &Multiplexer<'a, S> {
        &self.sinks
    }

    /// Unread bytes in the ring buffer.
    #[must_use]
    pub const fn available(&self) -> usize {
        self.ring.len()
    }

    /// Queue `bytes` and flush them to every sink in `colors`.
    ///
    /// Returns `bytes.len()`; if `bytes` exceeds the ring capacity, only
    /// its tail reaches the sinks.
    pub fn write(&mut self, bytes: &[u8], colors: ColorPair) -> usize {
        let written = self.ring.write(bytes);
        self.flush_with(colors);
        written
    }

    /// Write a single byte in the default colors.
    pub fn putc(&mut self, byte: u8) -> usize {
        self.write(&[byte], ColorPair::DEFAULT)
    }

    /// Drain up to `dest.len()` unread bytes without sending them to sinks.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        self.ring.read(dest)
    }

    /// Flush everything pending in the default colors.
    pub fn flush(&mut self) -> FlushReport {
        self.flush_with(ColorPair::DEFAULT)
    }

    /// Drain the ring in chunks and fan each chunk out to all sinks.
    pub fn flush_with(&mut self, colors: ColorPair) -> FlushReport {
        let mut report = FlushReport::default();
        let mut chunk = [0u8; FLUSH_CHUNK_SIZE];
        loop {
            let n = self.ring.read(&mut chunk);
            if n == 0 {
                break;
            }
            report.merge(self.sinks.flush_to_sinks(&chunk[..n], colors));
        }
        report
    }
}

impl<const N: usize, const S: usize> Default for Tty<'_, N, S> {
    fn default() -> Self {
        Self::new()
    }
}
