//! # VGA Colors and Cell Encoding

use bitfield_struct::bitfield;

/// The 16 colors of the VGA text palette.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGrey = 7,
    DarkGrey = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    /// Converts a 4-bit palette index; higher bits are ignored.
    #[must_use]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::Black,
            1 => Self::Blue,
            2 => Self::Green,
            3 => Self::Cyan,
            4 => Self::Red,
            5 => Self::Magenta,
            6 => Self::Brown,
            7 => Self::LightGrey,
            8 => Self::DarkGrey,
            9 => Self::LightBlue,
            10 => Self::LightGreen,
            11 => Self::LightCyan,
            12 => Self::LightRed,
            13 => Self::LightMagenta,
            14 => Self::Yellow,
            _ => Self::White,
        }
    }

    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// Foreground and background color of a write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

impl ColorPair {
    /// Light grey on black, the console's power-on colors.
    pub const DEFAULT: Self = Self::new(Color::LightGrey, Color::Black);

    #[must_use]
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// The VGA attribute byte for this pair.
    #[must_use]
    pub const fn attribute(self) -> Attribute {
        Attribute::new()
            .with_foreground(self.foreground)
            .with_background(self.background)
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// VGA attribute byte: `(background << 4) | foreground`.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Attribute {
    /// Bits 0–3: foreground color.
    #[bits(4)]
    pub foreground: Color,
    /// Bits 4–7: background color.
    #[bits(4)]
    pub background: Color,
}

/// One cell of the VGA text buffer: character in the low byte,
/// attribute in the high byte.
#[bitfield(u16)]
#[derive(PartialEq, Eq)]
pub struct Cell {
    /// Bits 0–7: code page 437 character.
    pub character: u8,
    /// Bits 8–15: colors.
    #[bits(8)]
    pub attribute: Attribute,
}

impl Cell {
    /// A blank cell in the given colors.
    #[must_use]
    pub const fn blank(colors: ColorPair) -> Self {
        Self::new()
            .with_character(b' ')
            .with_attribute(colors.attribute())
    }
}
