//! # Kernel printk
//!
//! Leveled, formatted kernel messages on top of [`kernel_tty`].
//!
//! ```text
//! printk!(out, "<3>disk %s failed: %d\n", name, err)
//!   ├─ split_level_prefix   "<3>" → level 3, otherwise DEFAULT_LEVEL
//!   ├─ format_into          2 KiB body, truncating
//!   ├─ emit                 "[ERR] " + body, colors for level 3
//!   └─ LineSink::write_line Tty → console, serial, ...
//! ```
//!
//! Arguments are typed ([`Arg`]), so a mismatched
//! conversion renders a marker rather than reading garbage.
//!
//! ## Levels
//!
//! | Level | Tag        | Foreground  |
//! |-------|------------|-------------|
//! | 0     | `[EMERG]`  | light red   |
//! | 1     | `[ALERT]`  | light red   |
//! | 2     | `[CRIT]`   | light red   |
//! | 3     | `[ERR]`    | light red   |
//! | 4     | `[WARN]`   | yellow      |
//! | 5     | `[NOTICE]` | light green |
//! | 6     | `[INFO]`   | light grey  |
//! | 7     | `[DEBUG]`  | light cyan  |
//!
//! Any other level prints like level 6.
//!
//! ## The `log` Facade
//!
//! [`PrintkLogger`] forwards `log` records into the same pipeline, mapping
//! `Error`, `Warn` and `Info` to levels 3, 4 and 6 and both `Debug` and
//! `Trace` to level 7.
//!
//! ## Example
//!
//! ```
//! use kernel_printk::{LineSink, printk};
//! use kernel_tty::ColorPair;
//!
//! struct Collect(Vec<u8>);
//!
//! impl LineSink for Collect {
//!     fn write_line(&mut self, line: &[u8], _colors: ColorPair) -> usize {
//!         self.0.extend_from_slice(line);
//!         line.len()
//!     }
//! }
//!
//! let mut out = Collect(Vec::new());
//! printk!(&mut out, "<4>%u%% full\n", 93u32);
//! assert_eq!(out.0, b"[WARN] 93% full\n");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod arg;
pub mod buffer;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
mod printk;

pub use arg::Arg;
pub use buffer::LineBuffer;
pub use format::format_into;
pub use global::Console;
pub use level::{Level, level_colors, level_tag, split_level_prefix};
pub use logger::PrintkLogger;
pub use printk::{
    DEFAULT_LEVEL, LineSink, PRINTK_BODY_CAPACITY, PRINTK_LINE_CAPACITY, emit, printk,
    printk_with_level,
};

/// Format and emit through a [`LineSink`], converting each argument with
/// [`Arg::from`].
#[macro_export]
macro_rules! printk {
    ($out:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::printk($out, $fmt, &[$($crate::Arg::from($arg)),*])
    };
}
