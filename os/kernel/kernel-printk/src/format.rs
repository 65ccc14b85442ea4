//! # Format Engine
//!
//! The supported conversions:
//!
//! | Conversion  | Renders                                       |
//! |-------------|-----------------------------------------------|
//! | `%s`        | string, `(null)` for [`Arg::Str(None)`]       |
//! | `%c`        | one byte                                      |
//! | `%d` `%i`   | signed decimal                                |
//! | `%u`        | unsigned decimal                              |
//! | `%x` `%X`   | hexadecimal, lower/upper case, no prefix      |
//! | `%p`        | `0x` followed by uppercase hex                |
//! | `%%`        | a literal `%`                                 |
//!
//! One or more `l` between `%` and the conversion select 64-bit width;
//! without it integers are truncated to 32 bits first. There is no field
//! width, precision or padding.
//!
//! Mismatches never fail:
//!
//! - an unknown conversion is echoed as `%` plus the conversion byte,
//!   with any `l` modifiers dropped
//! - a conversion with no argument left is echoed verbatim
//! - an argument of the wrong kind renders as `(invalid)`

use core::fmt::Write;

use crate::arg::Arg;
use crate::buffer::LineBuffer;

const INVALID: &str = "(invalid)";
const NULL: &str = "(null)";

/// Expand `fmt` with `args` into `out`; returns the number of bytes added.
///
/// Stops once `out` is full. Surplus arguments are ignored.
pub fn format_into<const N: usize>(out: &mut LineBuffer<N>, fmt: &str, args: &[Arg<'_>]) -> usize {
    let start_len = out.len();
    let bytes = fmt.as_bytes();
    let mut args = args.iter().copied();
    let mut i = 0;

    while i < bytes.len() && !out.is_full() {
        let byte = bytes[i];
        if byte != b'%' {
            out.push(byte);
            i += 1;
            continue;
        }

        let conversion_start = i;
        i += 1;

        let mut long = false;
        while bytes.get(i) == Some(&b'l') {
            long = true;
            i += 1;
        }

        let Some(&conversion) = bytes.get(i) else {
            // Trailing `%` (or `%l`) with nothing after it.
            out.push(b'%');
            break;
        };
        i += 1;

        match conversion {
            b'%' => {
                out.push(b'%');
            }
            b's' | b'c' | b'd' | b'i' | b'u' | b'x' | b'X' | b'p' => match args.next() {
                Some(arg) => render(out, conversion, long, arg),
                None => {
                    out.push_bytes(&bytes[conversion_start..i]);
                }
            },
            other => {
                out.push(b'%');
                out.push(other);
            }
        }
    }

    out.len() - start_len
}

#[allow(clippy::cast_possible_truncation)]
fn render<const N: usize>(out: &mut LineBuffer<N>, conversion: u8, long: bool, arg: Arg<'_>) {
    if conversion == b's' {
        match arg {
            Arg::Str(Some(s)) => out.push_str(s),
            Arg::Str(None) => out.push_str(NULL),
            _ => out.push_str(INVALID),
        };
        return;
    }

    let Some(bits) = arg.bits() else {
        out.push_str(INVALID);
        return;
    };

    // Formatting into a LineBuffer cannot fail.
    let _ = match conversion {
        b'c' => {
            out.push(bits as u8);
            Ok(())
        }
        b'd' | b'i' => write!(out, "{}", signed(bits, long)),
        b'u' => write!(out, "{}", unsigned(bits, long)),
        b'x' => write!(out, "{:x}", unsigned(bits, long)),
        b'X' => write!(out, "{:X}", unsigned(bits, long)),
        b'p' => write!(out, "{bits:#X}"),
        _ => Ok(()),
    };
}

#[allow(clippy::cast_possible_truncation)]
const fn signed(bits: u64, long: bool) -> i64 {
    if long {
        bits.cast_signed()
    } else {
        (bits as u32).cast_signed() as i64
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn unsigned(bits: u64, long: bool) -> u64 {
    if long { bits } else { bits as u32 as u64 }
}
