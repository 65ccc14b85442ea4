//! # TTY Configuration
//!
//! Compile-time sizing for the output pipeline.

/// Capacity of the output ring buffer in bytes. Must be a power of two.
pub const TTY_BUFFER_SIZE: usize = 4096;

/// Bytes moved from the ring buffer to the sinks per fan-out call.
pub const FLUSH_CHUNK_SIZE: usize = 256;

/// Number of sink slots in the multiplexer.
pub const MAX_SINKS: usize = 4;

/// Line status polls before a serial transmit gives up.
pub const SERIAL_TX_SPIN_LIMIT: u32 = 100_000;

/// Line status polls before a serial receive gives up.
pub const SERIAL_RX_SPIN_LIMIT: u32 = 1_000_000;

/// I/O base of the first serial port.
pub const COM1_BASE: u16 = 0x3F8;

/// Baud rate divisor against the 115200 Hz UART clock (9600 baud).
pub const SERIAL_BAUD_DIVISOR: u16 = 12;

/// Cells a tab advances the text console.
pub const TAB_WIDTH: usize = 4;

const _: () = {
    assert!(TTY_BUFFER_SIZE.is_power_of_two());
    assert!(FLUSH_CHUNK_SIZE > 0 && FLUSH_CHUNK_SIZE <= TTY_BUFFER_SIZE);
    assert!(MAX_SINKS > 0);
    assert!(SERIAL_BAUD_DIVISOR > 0);
};
