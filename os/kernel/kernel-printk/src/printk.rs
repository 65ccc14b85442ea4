//! # printk
//!
//! Formats a message, prefixes it with its level tag and hands the finished
//! line to a [`LineSink`] in the level's colors.
//!
//! The body is formatted into a [`PRINTK_BODY_CAPACITY`] scratch buffer and
//! the tagged line assembled in a [`PRINTK_LINE_CAPACITY`] buffer; both live
//! on the stack, and both truncate rather than fail.

use kernel_tty::{ColorPair, Tty};

use crate::arg::Arg;
use crate::buffer::LineBuffer;
use crate::format::format_into;
use crate::level::{Level, level_colors, level_tag, split_level_prefix};

/// Scratch size for the formatted body; one byte is reserved.
pub const PRINTK_BODY_CAPACITY: usize = 2048;

/// Scratch size for tag plus body; one byte is reserved.
pub const PRINTK_LINE_CAPACITY: usize = 2300;

/// Level used when the format string carries no `<N>` prefix.
pub const DEFAULT_LEVEL: u32 = Level::Info.as_raw();

const _: () = {
    // The longest tag plus a full body must fit the line buffer.
    assert!(PRINTK_LINE_CAPACITY - 1 >= PRINTK_BODY_CAPACITY - 1 + Level::Notice.tag().len());
};

/// Destination of finished lines.
pub trait LineSink {
    /// Emit one line; returns the number of bytes accepted.
    fn write_line(&mut self, line: &[u8], colors: ColorPair) -> usize;
}

impl<const N: usize, const S: usize> LineSink for Tty<'_, N, S> {
    fn write_line(&mut self, line: &[u8], colors: ColorPair) -> usize {
        self.write(line, colors)
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, line: &[u8], colors: ColorPair) -> usize {
        (**self).write_line(line, colors)
    }
}

/// Format and emit at [`DEFAULT_LEVEL`] unless `fmt` starts with `<N>`.
///
/// Returns the length of the emitted line, tag included.
pub fn printk<W: LineSink + ?Sized>(out: &mut W, fmt: &str, args: &[Arg<'_>]) -> usize {
    printk_with_level(out, DEFAULT_LEVEL, fmt, args)
}

/// Like [`printk`] with an explicit default level.
///
/// A `<N>` prefix on `fmt` still takes precedence over `level`.
pub fn printk_with_level<W: LineSink + ?Sized>(
    out: &mut W,
    level: u32,
    fmt: &str,
    args: &[Arg<'_>],
) -> usize {
    let (prefix, fmt) = split_level_prefix(fmt);
    let level = prefix.unwrap_or(level);

    let mut body = LineBuffer::<PRINTK_BODY_CAPACITY>::new();
    format_into(&mut body, fmt, args);
    emit(out, level, body.as_bytes())
}

/// Tag an already formatted `body` and emit it.
pub fn emit<W: LineSink + ?Sized>(out: &mut W, level: u32, body: &[u8]) -> usize {
    let mut line = LineBuffer::<PRINTK_LINE_CAPACITY>::new();
    line.push_str(level_tag(level));
    line.push_bytes(body);

    out.write_line(line.as_bytes(), level_colors(level));
    line.len()
}
