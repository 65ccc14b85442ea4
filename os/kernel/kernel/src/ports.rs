//! # x86 I/O Port Access
//!
//! Byte-wide `in`/`out` on the legacy I/O port space, plus [`PortUart`],
//! which binds a 16550 register block at a base port to
//! [`kernel_tty::UartPort`].
//!
//! ```text
//! 0x03D4-0x03D5   VGA CRT controller (index, data)
//! 0x03F8-0x03FF   Serial Port #1 (COM1)
//! 0x0402          QEMU debug console
//! ```

use kernel_tty::{UartPort, UartRegister};

/// Write one byte to an I/O port (x86).
///
/// # Safety
/// You must uphold **all** of the following:
/// - **Privilege:** Execute at CPL0 **or** have I/O permission (IOPL/IO bitmap)
///   that allows access to `port`. Otherwise the CPU raises `#GP`.
/// - **Correct port:** `port` must belong to the intended device and be in a
///   valid state for this write.
/// - **Concurrency:** Coordinate with anything else touching the same device
///   so multi-step register protocols are not interleaved.
#[inline]
pub unsafe fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!("out dx, al", in("dx") port, in("al") val, options(nomem, nostack, preserves_flags));
    }
}

/// Read one byte from an I/O port (x86).
///
/// # Safety
/// Same requirements as [`outb`]; additionally, reading some registers has
/// side effects (e.g. the UART receive buffer), so `port` must be one the
/// caller means to consume.
#[inline]
pub unsafe fn inb(port: u16) -> u8 {
    let mut v: u8;
    unsafe {
        core::arch::asm!("in al, dx", in("dx") port, out("al") v, options(nomem, nostack, preserves_flags));
    }
    v
}

/// A 16550 register block addressed through I/O ports.
pub struct PortUart {
    base: u16,
}

impl PortUart {
    /// # Safety
    /// `base` must be the first port of a UART (or of nothing at all);
    /// register access through the returned value is not otherwise checked.
    pub const unsafe fn new(base: u16) -> Self {
        Self { base }
    }

    const fn port(&self, reg: UartRegister) -> u16 {
        self.base + reg.offset()
    }
}

impl UartPort for PortUart {
    fn read(&mut self, reg: UartRegister) -> u8 {
        // SAFETY: `new` requires a UART base; we run at CPL0.
        unsafe { inb(self.port(reg)) }
    }

    fn write(&mut self, reg: UartRegister, value: u8) {
        // SAFETY: see `read`.
        unsafe { outb(self.port(reg), value) }
    }
}
