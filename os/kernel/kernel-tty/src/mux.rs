//! # Backend Multiplexer
//!
//! Pure fan-out: every chunk handed to [`Multiplexer::flush_to_sinks`] is
//! offered to each registered sink in registration order. A failing sink
//! is counted and skipped; the remaining sinks still receive the chunk.

use crate::color::ColorPair;
use crate::config::MAX_SINKS;
use crate::sink::OutputSink;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TtyError {
    #[error("no free sink slot")]
    SinkTableFull,
    #[error("no sink registered under this id")]
    UnknownSink,
}

/// Handle of a registered sink.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SinkId(usize);

impl SinkId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Outcome of one fan-out.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FlushReport {
    /// Sink writes that succeeded.
    pub delivered: usize,
    /// Sink writes that returned an error.
    pub failed: usize,
}

impl FlushReport {
    pub const fn merge(&mut self, other: Self) {
        self.delivered += other.delivered;
        self.failed += other.failed;
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

pub struct Multiplexer<'a, const S: usize = MAX_SINKS> {
    slots: [Option<&'a mut dyn OutputSink>; S],
    failures: [u32; S],
}

impl<'a, const S: usize> Multiplexer<'a, S> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; S],
            failures: [0; S],
        }
    }

    /// Add a sink to the first free slot.
    ///
    /// # Errors
    /// [`TtyError::SinkTableFull`] if all slots are taken.
    pub fn register(&mut self, sink: &'a mut dyn OutputSink) -> Result<SinkId, TtyError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(TtyError::SinkTableFull)?;
        self.slots[index] = Some(sink);
        self.failures[index] = 0;
        Ok(SinkId(index))
    }

    /// Remove a sink and hand it back to the caller.
    ///
    /// # Errors
    /// [`TtyError::UnknownSink`] if `id` does not name a registered sink.
    pub fn unregister(&mut self, id: SinkId) -> Result<&'a mut dyn OutputSink, TtyError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(TtyError::UnknownSink)
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Failed writes recorded for a sink since it was registered.
    #[must_use]
    pub fn failures(&self, id: SinkId) -> Option<u32> {
        match self.slots.get(id.0) {
            Some(Some(_)) => Some(self.failures[id.0]),
            _ => None,
        }
    }

    /// Offer `bytes` to every registered sink.
    pub fn flush_to_sinks(&mut self, bytes: &[u8], colors: ColorPair) -> FlushReport {
        let mut report = FlushReport::default();
        if bytes.is_empty() {
            return report;
        }

        for (slot, failures) in self.slots.iter_mut().zip(self.failures.iter_mut()) {
            let Some(sink) = slot else {
                continue;
            };
            if sink.write(bytes, colors).is_ok() {
                report.delivered += 1;
            } else {
                *failures = failures.saturating_add(1);
                report.failed += 1;
            }
        }
        report
    }
}

impl<const S: usize> Default for Multiplexer<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}
