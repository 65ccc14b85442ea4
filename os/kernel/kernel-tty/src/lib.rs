//! # Kernel TTY Output Pipeline
//!
//! Everything the kernel prints travels through this crate:
//!
//! ```text
//! producer (printk, log)
//!     ↓ Tty::write
//! RingBuffer<N>            lossy, never blocks
//!     ↓ Tty::flush_with    FLUSH_CHUNK_SIZE bytes at a time
//! Multiplexer              fan-out, one outcome per sink
//!     ↓            ↓              ↓
//! TextConsole   Uart16550     (any OutputSink)
//! ```
//!
//! ## Overflow Policy
//!
//! The ring buffer favors the producer: a write that does not fit discards
//! the oldest unread bytes. There is no overflow counter.
//!
//! ## Sinks
//!
//! A sink is anything implementing [`OutputSink`]. Sinks are fault-isolated:
//! a sink returning [`SinkError`] is counted by the [`Multiplexer`] and
//! skipped, and the remaining sinks still see the chunk. The bundled sinks
//! reach their hardware through narrow traits ([`UartPort`], [`CellGrid`])
//! so they can be exercised on the host.
//!
//! ## Concurrency
//!
//! Nothing here locks. A [`Tty`] is a plain value owned by its caller;
//! sharing it with interrupt context requires the caller to serialize
//! access.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod console;
pub mod mux;
pub mod ring;
pub mod serial;
pub mod sink;
pub mod tty;

pub use color::{Attribute, Cell, Color, ColorPair};
pub use console::{CellGrid, TextConsole};
pub use mux::{FlushReport, Multiplexer, SinkId, TtyError};
pub use ring::RingBuffer;
pub use serial::{LineStatus, SerialError, Uart16550, UartPort, UartRegister};
pub use sink::{OutputSink, SinkError};
pub use tty::Tty;
