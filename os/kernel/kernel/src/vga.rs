//! # VGA Text Memory
//!
//! The 80×25 text buffer at physical `0xB8000`, one 16-bit cell per
//! character, and the hardware cursor behind CRT controller registers 14
//! and 15.

use kernel_tty::Cell;
use kernel_tty::CellGrid;
use kernel_tty::console::TEXT_CELLS;

use crate::ports::outb;

/// Physical (and identity-mapped) address of the text buffer.
pub const VGA_TEXT_BUFFER: usize = 0xB8000;

const CRTC_INDEX: u16 = 0x3D4;
const CRTC_DATA: u16 = 0x3D5;
const CURSOR_LOCATION_HIGH: u8 = 14;
const CURSOR_LOCATION_LOW: u8 = 15;

pub struct VgaTextBuffer {
    cells: *mut u16,
}

// SAFETY: the buffer is device memory owned by whichever console holds
// this value; it is not tied to the creating thread.
unsafe impl Send for VgaTextBuffer {}

impl VgaTextBuffer {
    /// # Safety
    /// `address` must map [`TEXT_CELLS`] writable 16-bit cells, and no
    /// other `VgaTextBuffer` may exist for it.
    pub const unsafe fn new(address: usize) -> Self {
        Self {
            cells: address as *mut u16,
        }
    }
}

impl CellGrid for VgaTextBuffer {
    fn write_cell(&mut self, index: usize, cell: Cell) {
        if index < TEXT_CELLS {
            // SAFETY: in bounds per `new`.
            unsafe { self.cells.add(index).write_volatile(cell.into_bits()) }
        }
    }

    fn read_cell(&self, index: usize) -> Cell {
        if index < TEXT_CELLS {
            // SAFETY: in bounds per `new`.
            Cell::from_bits(unsafe { self.cells.add(index).read_volatile() })
        } else {
            Cell::new()
        }
    }

    fn set_cursor(&mut self, index: usize) {
        let index = index.min(TEXT_CELLS - 1);
        let [low, high, ..] = index.to_le_bytes();

        // SAFETY: CRTC index/data ports; we own the VGA console.
        unsafe {
            outb(CRTC_INDEX, CURSOR_LOCATION_HIGH);
            outb(CRTC_DATA, high);
            outb(CRTC_INDEX, CURSOR_LOCATION_LOW);
            outb(CRTC_DATA, low);
        }
    }
}
