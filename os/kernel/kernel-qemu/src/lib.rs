//! # QEMU Debug Console
//!
//! QEMU's `-debugcon` device captures every byte written to I/O port
//! `0x402` and forwards it to the host:
//!
//! ```bash
//! qemu-system-x86_64 -kernel kernel.bin -debugcon stdio
//! qemu-system-x86_64 -kernel kernel.bin -debugcon file:debug.log
//! ```
//!
//! This crate exposes the port two ways:
//!
//! * [`DebugconSink`], an [`OutputSink`] the TTY multiplexer can fan out to
//!   alongside the screen and serial line.
//! * [`qemu_trace!`], unbuffered `format_args!` output for code that runs
//!   before the TTY exists (or after it has been wedged by a panic).
//!
//! ## Features
//!
//! With the default `enabled` feature off, both become no-ops and no port
//! I/O is compiled in. On real hardware the port is normally unused, so
//! leaving it on is harmless but wasteful.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

use kernel_tty::{ColorPair, OutputSink, SinkError};

/// I/O port watched by QEMU's debug console.
pub const QEMU_DEBUG_PORT: u16 = 0x402;

/// Fan-out target writing raw bytes to the debug console. Colors are
/// ignored.
#[derive(Debug, Default, Copy, Clone)]
pub struct DebugconSink;

impl DebugconSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputSink for DebugconSink {
    fn name(&self) -> &'static str {
        "debugcon"
    }

    fn write(&mut self, bytes: &[u8], _colors: ColorPair) -> Result<(), SinkError> {
        for &b in bytes {
            qemu_fmt::dbg_putc(b);
        }
        Ok(())
    }
}

#[cfg(feature = "enabled")]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt::{self, Write};

    use super::QEMU_DEBUG_PORT;

    #[allow(clippy::inline_always)]
    #[inline(always)]
    pub fn dbg_putc(c: u8) {
        // SAFETY: the debug port has no side effects beyond QEMU logging.
        unsafe { outb(QEMU_DEBUG_PORT, c) }
    }

    #[allow(clippy::inline_always)]
    #[inline(always)]
    unsafe fn outb(port: u16, val: u8) {
        unsafe {
            core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") val,
            options(nomem, nostack, preserves_flags)
            );
        }
    }

    struct PortWriter;

    impl Write for PortWriter {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                dbg_putc(b);
            }
            Ok(())
        }
    }

    #[doc(hidden)]
    pub fn qemu_write(args: fmt::Arguments<'_>) {
        // Best effort; the port cannot report failure.
        let _ = fmt::write(&mut PortWriter, args);
    }
}

#[cfg(not(feature = "enabled"))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt;

    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub const fn dbg_putc(_c: u8) {}

    #[doc(hidden)]
    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub fn qemu_write(_: fmt::Arguments<'_>) {}
}

/// `print!`-style output straight to the debug console.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
