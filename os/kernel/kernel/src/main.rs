//! # Kernel Entry Point
//!
//! Boot sequence:
//!
//! 1. [`_start_kernel`] switches to the boot stack and jumps to [`kernel_entry`].
//! 2. The Boot Info Block is scanned once for a framebuffer tag and the
//!    display mode is decided.
//! 3. COM1 is initialized and the sinks are attached to the TTY: serial
//!    always, the VGA text console only in text mode, the QEMU debug
//!    console when the `qemu` feature is on.
//! 4. The TTY is installed in the global [`Console`] and the `log` facade
//!    is pointed at it.
//!
//! The kernel then halts.

#![no_std]
#![no_main]
#![allow(unsafe_code)]

mod ports;
mod tracing;
mod vga;

use core::fmt::Write;
use kernel_info::{BootDisplay, BootInfoBlock, DisplayMode, ScanError, detect_display};
use kernel_printk::{
    Arg, Console, DEFAULT_LEVEL, Level, LineBuffer, PRINTK_BODY_CAPACITY, PrintkLogger, emit,
};
use kernel_qemu::qemu_trace;
use kernel_tty::config::COM1_BASE;
use kernel_tty::{ColorPair, OutputSink, TextConsole, Tty, Uart16550};
use log::LevelFilter;

use crate::ports::PortUart;
use crate::vga::{VGA_TEXT_BUFFER, VgaTextBuffer};

/// The kernel's output pipeline, installed once by [`kernel_main`].
static CONSOLE: Console<Tty<'static>> = Console::new();

static LOGGER: PrintkLogger<Tty<'static>> = PrintkLogger::new(&CONSOLE, LevelFilter::Debug);

// SAFETY: COM1 is the standard first serial port.
static mut SERIAL: Uart16550<PortUart> = Uart16550::new(unsafe { PortUart::new(COM1_BASE) });

// SAFETY: the text buffer is identity-mapped and this is its only owner.
static mut VGA: TextConsole<VgaTextBuffer> =
    TextConsole::new(unsafe { VgaTextBuffer::new(VGA_TEXT_BUFFER) });

#[cfg(feature = "qemu")]
static mut DEBUGCON: kernel_qemu::DebugconSink = kernel_qemu::DebugconSink::new();

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    qemu_trace!("kernel panic: {}\n", info);

    // Skipped if the panic happened while the console was in use.
    CONSOLE.try_with(|tty| {
        let mut body = LineBuffer::<PRINTK_BODY_CAPACITY>::new();
        let _ = writeln!(body, "kernel panic: {info}");
        emit(tty, Level::Emergency.as_raw(), body.as_bytes())
    });

    halt()
}

/// Stack size.
const BOOT_STACK_SIZE: usize = 64 * 1024;

/// 16-byte aligned stack
#[repr(align(16))]
struct Aligned<const N: usize>([u8; N]);

#[unsafe(link_section = ".bss.boot")]
#[unsafe(no_mangle)]
static mut BOOT_STACK: Aligned<BOOT_STACK_SIZE> = Aligned([0; BOOT_STACK_SIZE]);

/// The kernel entry point
///
/// # Loader Interaction
/// Entered in 64-bit long mode with the low memory identity-mapped. The
/// loader jumping here passes the Boot Info Block address in `RDI` (SysV),
/// or 0 if it has none.
///
/// # Naked function & Stack
/// This is a naked function in order to set up the stack ourselves. Without
/// the `naked` attribute (and the [`naked_asm`](core::arch::naked_asm) instruction), Rust
/// compiler would apply its own assumptions based on the C ABI and would attempt to
/// unwind the stack on the call into [`kernel_entry`]. Since we're clearing out the stack
/// here, this would cause UB.
#[unsafe(no_mangle)]
#[unsafe(naked)]
pub extern "C" fn _start_kernel(_boot_info_addr: u64) {
    core::arch::naked_asm!(
        "cli",

        // Keep the boot info address across the stack switch.
        "mov r12, rdi",

        // Build our own kernel stack and establish a valid call frame for kernel_entry
        "lea rax, [rip + {stack_sym}]",
        "add rax, {stack_size}",
        // Align down to 16
        "and rax, -16",
        "mov rsp, rax",
        // Emulate a CALL by pushing a dummy return address (so RSP % 16 == 8 at entry)
        "push 0",
        "xor rbp, rbp",

        "mov rdi, r12",
        "jmp {rust_entry}",
        stack_sym = sym BOOT_STACK,
        stack_size = const BOOT_STACK_SIZE,
        rust_entry = sym kernel_entry,
    );
}

/// Kernel entry running on the boot stack.
#[unsafe(no_mangle)]
extern "C" fn kernel_entry(boot_info_addr: u64) -> ! {
    qemu_trace!("Kernel reporting to QEMU!\n");
    kernel_main(boot_info_addr)
}

fn kernel_main(boot_info_addr: u64) -> ! {
    let display = if boot_info_addr == 0 {
        BootDisplay::absent()
    } else {
        // SAFETY: a non-zero address from the loader is a readable block.
        match unsafe { boot_info_block(boot_info_addr) } {
            Ok(block) => detect_display(&block),
            Err(err) => BootDisplay::text_fallback(err),
        }
    };

    // SAFETY: called exactly once, before anything else touches the sinks.
    let tty = unsafe { attach_sinks(display.mode) };
    if CONSOLE.install(tty).is_err() {
        qemu_trace!("console busy during boot\n");
    }

    if let Err(err) = LOGGER.init() {
        qemu_trace!("log facade unavailable: {err}\n");
    }

    CONSOLE.printk(
        DEFAULT_LEVEL,
        "Kernel booted, boot info at %p\n",
        &[Arg::Ptr(usize::try_from(boot_info_addr).unwrap_or_default())],
    );
    tracing::trace_boot_display(&display);

    halt()
}

/// View the Boot Info Block at `addr`, sized by its own `total_size`.
///
/// # Safety
/// `addr` must be the non-zero, identity-mapped address of a Boot Info
/// Block that stays untouched for the returned lifetime.
unsafe fn boot_info_block(addr: u64) -> Result<BootInfoBlock<'static>, ScanError> {
    let addr = usize::try_from(addr).map_err(|_| ScanError::BlockOverrun)?;

    let base = addr as *const u8;
    // SAFETY: the first field of the block is its u32 size.
    let total_size = unsafe { base.cast::<u32>().read_unaligned() };
    let len = usize::try_from(total_size).map_err(|_| ScanError::BlockOverrun)?;

    // SAFETY: the loader guarantees `total_size` readable bytes.
    let bytes = unsafe { core::slice::from_raw_parts(base, len) };
    BootInfoBlock::new(bytes)
}

/// Initialize the output devices for `mode` and attach them to a fresh TTY.
///
/// # Safety
/// Must be called at most once; it hands out the only references to the
/// sink statics.
unsafe fn attach_sinks(mode: DisplayMode) -> Tty<'static> {
    let mut tty = Tty::new();

    // SAFETY: first and only reference, per this function's contract.
    let serial = unsafe { &mut *(&raw mut SERIAL) };
    serial.init();
    attach(&mut tty, serial);

    // In graphics mode there is no text memory to draw into.
    if mode == DisplayMode::Text {
        // SAFETY: as above.
        let vga = unsafe { &mut *(&raw mut VGA) };
        vga.clear(ColorPair::DEFAULT);
        attach(&mut tty, vga);
    }

    #[cfg(feature = "qemu")]
    // SAFETY: as above.
    attach(&mut tty, unsafe { &mut *(&raw mut DEBUGCON) });

    tty
}

fn attach(tty: &mut Tty<'static>, sink: &'static mut dyn OutputSink) {
    let name = sink.name();
    if let Err(err) = tty.register(sink) {
        qemu_trace!("{name} sink not attached: {err}\n");
    }
}

fn halt() -> ! {
    loop {
        // SAFETY: interrupts are never enabled, so this parks the CPU.
        unsafe { core::arch::asm!("hlt", options(nomem, nostack, preserves_flags)) };
    }
}
