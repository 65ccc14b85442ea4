//! # Text Console Sink
//!
//! Draws bytes onto an 80×25 grid of VGA cells, wrapping at the right edge
//! and scrolling up by one row at the bottom. The cell memory and the
//! hardware cursor are reached through [`CellGrid`].

use crate::color::{Cell, ColorPair};
use crate::config::TAB_WIDTH;
use crate::sink::{OutputSink, SinkError};

pub const TEXT_COLUMNS: usize = 80;
pub const TEXT_ROWS: usize = 25;
pub const TEXT_CELLS: usize = TEXT_COLUMNS * TEXT_ROWS;

/// Backing store of the text console, indexed row-major.
pub trait CellGrid: Send {
    fn write_cell(&mut self, index: usize, cell: Cell);
    fn read_cell(&self, index: usize) -> Cell;

    /// Move the hardware cursor; grids without one ignore this.
    fn set_cursor(&mut self, _index: usize) {}
}

pub struct TextConsole<G: CellGrid> {
    grid: G,
    column: usize,
    row: usize,
}

impl<G: CellGrid> TextConsole<G> {
    #[must_use]
    pub const fn new(grid: G) -> Self {
        Self {
            grid,
            column: 0,
            row: 0,
        }
    }

    /// Current `(column, row)`.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    #[must_use]
    pub const fn grid(&self) -> &G {
        &self.grid
    }

    /// Blank the screen and home the cursor.
    pub fn clear(&mut self, colors: ColorPair) {
        let blank = Cell::blank(colors);
        for index in 0..TEXT_CELLS {
            self.grid.write_cell(index, blank);
        }
        self.column = 0;
        self.row = 0;
        self.grid.set_cursor(0);
    }

    /// Move the cursor to `(column, row)`.
    ///
    /// Returns `false` and leaves the cursor alone if the position is off
    /// screen.
    pub fn set_position(&mut self, column: usize, row: usize) -> bool {
        if column >= TEXT_COLUMNS || row >= TEXT_ROWS {
            return false;
        }
        self.column = column;
        self.row = row;
        self.grid.set_cursor(row * TEXT_COLUMNS + column);
        true
    }

    /// Draw `bytes` and update the hardware cursor once at the end.
    pub fn write_bytes(&mut self, bytes: &[u8], colors: ColorPair) {
        for &b in bytes {
            self.put_byte(b, colors);
        }
        self.grid.set_cursor(self.row * TEXT_COLUMNS + self.column);
    }

    fn put_byte(&mut self, byte: u8, colors: ColorPair) {
        match byte {
            b'\n' => {
                // Blank the rest of the row so stale text does not linger.
                let blank = Cell::blank(colors);
                for column in self.column..TEXT_COLUMNS {
                    self.grid.write_cell(self.row * TEXT_COLUMNS + column, blank);
                }
                self.new_line();
            }
            b'\r' => self.column = 0,
            b'\t' => {
                for _ in 0..TAB_WIDTH {
                    self.put_visible(b' ', colors);
                }
            }
            _ => self.put_visible(byte, colors),
        }
    }

    fn put_visible(&mut self, byte: u8, colors: ColorPair) {
        let cell = Cell::new()
            .with_character(byte)
            .with_attribute(colors.attribute());
        self.grid.write_cell(self.row * TEXT_COLUMNS + self.column, cell);
        self.column += 1;
        if self.column == TEXT_COLUMNS {
            self.new_line();
        }
    }

    fn new_line(&mut self) {
        self.column = 0;
        if self.row + 1 < TEXT_ROWS {
            self.row += 1;
        } else {
            self.scroll_up();
        }
    }

    fn scroll_up(&mut self) {
        for index in TEXT_COLUMNS..TEXT_CELLS {
            let cell = self.grid.read_cell(index);
            self.grid.write_cell(index - TEXT_COLUMNS, cell);
        }
        let blank = Cell::blank(ColorPair::DEFAULT);
        for index in TEXT_CELLS - TEXT_COLUMNS..TEXT_CELLS {
            self.grid.write_cell(index, blank);
        }
    }
}

impl<G: CellGrid> OutputSink for TextConsole<G> {
    fn name(&self) -> &'static str {
        "console"
    }

    fn write(&mut self, bytes: &[u8], colors: ColorPair) -> Result<(), SinkError> {
        self.write_bytes(bytes, colors);
        Ok(())
    }
}
