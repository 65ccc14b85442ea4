//! `log` facade backend that routes records through `printk`.

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::buffer::LineBuffer;
use crate::global::Console;
use crate::level::Level;
use crate::printk::{LineSink, PRINTK_BODY_CAPACITY, emit};

/// Renders `target: message` lines tagged with the record's syslog level.
///
/// Records arriving while the console is busy are dropped.
pub struct PrintkLogger<T: LineSink + Send + 'static> {
    console: &'static Console<T>,
    max_level: LevelFilter,
}

impl<T: LineSink + Send + 'static> PrintkLogger<T> {
    #[must_use]
    pub const fn new(console: &'static Console<T>, max_level: LevelFilter) -> Self {
        Self { console, max_level }
    }

    /// Install as the global `log` backend.
    ///
    /// # Errors
    /// Fails if another logger was installed first.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

impl<T: LineSink + Send + 'static> Log for PrintkLogger<T> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut body = LineBuffer::<PRINTK_BODY_CAPACITY>::new();
        let _ = writeln!(body, "{}: {}", record.target(), record.args());

        let level = Level::from(record.level()).as_raw();
        self.console.try_with(|out| emit(out, level, body.as_bytes()));
    }

    fn flush(&self) {}
}
