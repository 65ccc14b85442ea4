//! # 16550 UART Sink
//!
//! Polled driver for a 16550-compatible serial port. Register access goes
//! through [`UartPort`] so the driver runs against real I/O ports in the
//! kernel and against a mock in tests.
//!
//! Waiting for the transmitter is bounded: after
//! [`SERIAL_TX_SPIN_LIMIT`] polls of the line status register a write gives
//! up with [`SerialError::TransmitTimeout`] instead of hanging the kernel on
//! a dead port.

use crate::color::ColorPair;
use crate::config::{SERIAL_BAUD_DIVISOR, SERIAL_RX_SPIN_LIMIT, SERIAL_TX_SPIN_LIMIT};
use crate::sink::{OutputSink, SinkError};
use bitfield_struct::bitfield;
use core::hint::spin_loop;

/// Register offsets from the port base.
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UartRegister {
    /// THR on write, RBR on read; divisor low byte while DLAB is set.
    Data = 0,
    /// IER; divisor high byte while DLAB is set.
    InterruptEnable = 1,
    /// FCR (write only).
    FifoControl = 2,
    LineControl = 3,
    ModemControl = 4,
    LineStatus = 5,
}

impl UartRegister {
    #[must_use]
    pub const fn offset(self) -> u16 {
        self as u16
    }
}

/// Raw register access for one UART.
pub trait UartPort: Send {
    fn read(&mut self, reg: UartRegister) -> u8;
    fn write(&mut self, reg: UartRegister, value: u8);
}

/// Line Status Register.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct LineStatus {
    /// Bit 0: a received byte is waiting in RBR.
    pub data_ready: bool,
    pub overrun_error: bool,
    pub parity_error: bool,
    pub framing_error: bool,
    pub break_interrupt: bool,
    /// Bit 5: THR is empty; the next byte may be written.
    pub transmit_holding_empty: bool,
    /// Bit 6: THR and the shift register are both empty.
    pub transmitter_empty: bool,
    pub fifo_error: bool,
}

/// Line Control Register.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct LineControl {
    /// Bits 0–1: word length minus five.
    #[bits(2)]
    pub word_length: u8,
    /// Bit 2: two stop bits when set.
    pub extra_stop_bit: bool,
    pub parity_enable: bool,
    pub even_parity: bool,
    pub stick_parity: bool,
    pub break_control: bool,
    /// Bit 7: DLAB, exposes the baud divisor at offsets 0 and 1.
    pub divisor_latch_access: bool,
}

impl LineControl {
    /// 8 data bits, no parity, one stop bit.
    pub const EIGHT_N_ONE: Self = Self::new().with_word_length(3);
}

/// FIFO enabled and cleared, 14-byte receive trigger.
const FIFO_ENABLE_CLEAR_14: u8 = 0xC7;

/// DTR, RTS and OUT2.
const MODEM_DTR_RTS_OUT2: u8 = 0x0B;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerialError {
    #[error("serial transmitter did not become ready")]
    TransmitTimeout,
    #[error("no serial input arrived")]
    ReceiveTimeout,
}

impl From<SerialError> for SinkError {
    fn from(_: SerialError) -> Self {
        Self::TimedOut
    }
}

pub struct Uart16550<P: UartPort> {
    port: P,
    tx_spin_limit: u32,
    rx_spin_limit: u32,
}

impl<P: UartPort> Uart16550<P> {
    #[must_use]
    pub const fn new(port: P) -> Self {
        Self::with_spin_limits(port, SERIAL_TX_SPIN_LIMIT, SERIAL_RX_SPIN_LIMIT)
    }

    #[must_use]
    pub const fn with_spin_limits(port: P, tx_spin_limit: u32, rx_spin_limit: u32) -> Self {
        Self {
            port,
            tx_spin_limit,
            rx_spin_limit,
        }
    }

    /// Program the port for polled 8N1 operation at [`SERIAL_BAUD_DIVISOR`].
    pub fn init(&mut self) {
        let [divisor_lo, divisor_hi] = SERIAL_BAUD_DIVISOR.to_le_bytes();

        self.port.write(UartRegister::InterruptEnable, 0x00);
        self.port.write(
            UartRegister::LineControl,
            LineControl::new().with_divisor_latch_access(true).into_bits(),
        );
        self.port.write(UartRegister::Data, divisor_lo);
        self.port.write(UartRegister::InterruptEnable, divisor_hi);
        self.port
            .write(UartRegister::LineControl, LineControl::EIGHT_N_ONE.into_bits());
        self.port
            .write(UartRegister::FifoControl, FIFO_ENABLE_CLEAR_14);
        self.port
            .write(UartRegister::ModemControl, MODEM_DTR_RTS_OUT2);
    }

    #[must_use]
    pub fn line_status(&mut self) -> LineStatus {
        LineStatus::from_bits(self.port.read(UartRegister::LineStatus))
    }

    /// Send one byte, polling the transmitter at most `tx_spin_limit` times.
    ///
    /// # Errors
    /// [`SerialError::TransmitTimeout`] if the transmitter never drained.
    pub fn putc(&mut self, byte: u8) -> Result<(), SerialError> {
        for _ in 0..self.tx_spin_limit {
            if self.line_status().transmit_holding_empty() {
                self.port.write(UartRegister::Data, byte);
                return Ok(());
            }
            spin_loop();
        }
        Err(SerialError::TransmitTimeout)
    }

    /// Send `bytes`, expanding `\n` to `\r\n`.
    ///
    /// # Errors
    /// Stops at the first byte that times out.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        for &b in bytes {
            if b == b'\n' {
                self.putc(b'\r')?;
            }
            self.putc(b)?;
        }
        Ok(())
    }

    /// Read a byte if one is waiting.
    pub fn try_read_char(&mut self) -> Option<u8> {
        if self.line_status().data_ready() {
            Some(self.port.read(UartRegister::Data))
        } else {
            None
        }
    }

    /// Wait for one input byte, polling at most `rx_spin_limit` times.
    ///
    /// # Errors
    /// [`SerialError::ReceiveTimeout`] if nothing arrived.
    pub fn read_char(&mut self) -> Result<u8, SerialError> {
        for _ in 0..self.rx_spin_limit {
            if let Some(b) = self.try_read_char() {
                return Ok(b);
            }
            spin_loop();
        }
        Err(SerialError::ReceiveTimeout)
    }

    /// Read a line terminated by `\r` or `\n` into `buf`.
    ///
    /// Bytes beyond `buf.len()` are consumed and dropped. Returns the
    /// number of bytes stored, terminator excluded.
    ///
    /// # Errors
    /// [`SerialError::ReceiveTimeout`] if input stalls before the terminator.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        let mut len = 0;
        loop {
            match self.read_char()? {
                b'\r' | b'\n' => return Ok(len),
                b => {
                    if let Some(slot) = buf.get_mut(len) {
                        *slot = b;
                        len += 1;
                    }
                }
            }
        }
    }

    pub const fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<P: UartPort> OutputSink for Uart16550<P> {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn write(&mut self, bytes: &[u8], _colors: ColorPair) -> Result<(), SinkError> {
        self.write_bytes(bytes).map_err(SinkError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// UART whose transmitter becomes ready after `busy_polls` status reads.
    #[derive(Default)]
    struct MockUart {
        busy_polls: u32,
        polls: u32,
        rx: VecDeque<u8>,
        writes: Vec<(UartRegister, u8)>,
    }

    impl MockUart {
        fn sent(&self) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(reg, _)| *reg == UartRegister::Data)
                .map(|(_, b)| *b)
                .collect()
        }
    }

    impl UartPort for MockUart {
        fn read(&mut self, reg: UartRegister) -> u8 {
            match reg {
                UartRegister::LineStatus => {
                    self.polls += 1;
                    LineStatus::new()
                        .with_transmit_holding_empty(self.polls > self.busy_polls)
                        .with_data_ready(!self.rx.is_empty())
                        .into_bits()
                }
                UartRegister::Data => self.rx.pop_front().unwrap_or(0),
                _ => 0,
            }
        }

        fn write(&mut self, reg: UartRegister, value: u8) {
            self.writes.push((reg, value));
        }
    }

    #[test]
    fn init_programs_divisor_and_line_format() {
        let mut uart = Uart16550::new(MockUart::default());
        uart.init();
        assert_eq!(
            uart.port_mut().writes,
            [
                (UartRegister::InterruptEnable, 0x00),
                (UartRegister::LineControl, 0x80),
                (UartRegister::Data, 12),
                (UartRegister::InterruptEnable, 0),
                (UartRegister::LineControl, 0x03),
                (UartRegister::FifoControl, 0xC7),
                (UartRegister::ModemControl, 0x0B),
            ]
        );
    }

    #[test]
    fn newline_is_sent_as_crlf() {
        let mut uart = Uart16550::new(MockUart::default());
        uart.write_bytes(b"ok\n").unwrap();
        assert_eq!(uart.port_mut().sent(), b"ok\r\n");
    }

    #[test]
    fn slow_transmitter_within_budget_succeeds() {
        let mut uart = Uart16550::with_spin_limits(
            MockUart {
                busy_polls: 5,
                ..MockUart::default()
            },
            10,
            10,
        );
        assert_eq!(uart.putc(b'x'), Ok(()));
        assert_eq!(uart.port_mut().sent(), b"x");
    }

    #[test]
    fn dead_transmitter_times_out() {
        let mut uart = Uart16550::with_spin_limits(
            MockUart {
                busy_polls: u32::MAX,
                ..MockUart::default()
            },
            8,
            8,
        );
        assert_eq!(uart.putc(b'x'), Err(SerialError::TransmitTimeout));
        assert_eq!(uart.port_mut().polls, 8);
        assert!(uart.port_mut().sent().is_empty());

        let err = OutputSink::write(&mut uart, b"abc", ColorPair::DEFAULT).unwrap_err();
        assert_eq!(err, SinkError::TimedOut);
    }

    #[test]
    fn read_line_stops_at_terminator_and_truncates() {
        let mut uart = Uart16550::new(MockUart {
            rx: b"hello world\rnext".iter().copied().collect(),
            ..MockUart::default()
        });
        let mut buf = [0u8; 5];
        assert_eq!(uart.read_line(&mut buf), Ok(5));
        assert_eq!(&buf, b"hello");
        assert_eq!(uart.try_read_char(), Some(b'n'));
    }

    #[test]
    fn read_char_times_out_without_input() {
        let mut uart = Uart16550::with_spin_limits(MockUart::default(), 4, 4);
        assert_eq!(uart.read_char(), Err(SerialError::ReceiveTimeout));
        assert_eq!(uart.try_read_char(), None);
    }
}
