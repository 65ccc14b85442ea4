//! # Output Sinks

use crate::color::ColorPair;

/// Per-sink delivery failure. Reported to the multiplexer, never propagated
/// to the producer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The device did not become ready within its retry budget.
    #[error("sink timed out")]
    TimedOut,
    /// The device is not present or not initialized.
    #[error("sink unavailable")]
    Unavailable,
}

/// A destination for kernel text output.
///
/// Sinks are independent: one sink failing does not affect delivery to
/// the others. Sinks that have no notion of color ignore `colors`.
pub trait OutputSink: Send {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Deliver one chunk of bytes.
    ///
    /// # Errors
    /// A [`SinkError`] if the chunk could not be delivered in full.
    fn write(&mut self, bytes: &[u8], colors: ColorPair) -> Result<(), SinkError>;
}
