use kernel_printk::{Arg, LineSink, PRINTK_BODY_CAPACITY, printk, printk_with_level};
use kernel_tty::{Color, ColorPair, OutputSink, SinkError, Tty};

#[derive(Default)]
struct Screen {
    bytes: Vec<u8>,
    colors: Vec<ColorPair>,
}

impl OutputSink for Screen {
    fn name(&self) -> &'static str {
        "screen"
    }

    fn write(&mut self, bytes: &[u8], colors: ColorPair) -> Result<(), SinkError> {
        self.bytes.extend_from_slice(bytes);
        self.colors.push(colors);
        Ok(())
    }
}

#[derive(Default)]
struct Line(Vec<u8>);

impl LineSink for Line {
    fn write_line(&mut self, line: &[u8], _colors: ColorPair) -> usize {
        self.0 = line.to_vec();
        line.len()
    }
}

#[test]
fn error_line_reaches_sinks_in_red() {
    let mut screen = Screen::default();
    let value = 0u8;
    let address = core::ptr::from_ref(&value);

    let written = {
        let mut tty: Tty<'_> = Tty::new();
        tty.register(&mut screen).unwrap();
        printk!(&mut tty, "<3>Error %d at %p\n", 42, address)
    };

    let text = String::from_utf8(screen.bytes).unwrap();
    let expected = format!("[ERR] Error 42 at {:#X}\n", address.addr());
    assert_eq!(text, expected);
    assert_eq!(written, expected.len());
    assert!(screen.colors.iter().all(|c| c.foreground == Color::LightRed));
}

#[test]
fn unknown_conversion_passes_through() {
    let mut out = Line::default();
    printk(&mut out, "Value %q", &[Arg::from(1)]);
    assert_eq!(out.0, b"[INFO] Value %q");
}

#[test]
fn oversized_body_is_truncated_before_tagging() {
    let mut out = Line::default();
    let long = "x".repeat(PRINTK_BODY_CAPACITY * 2);

    let written = printk_with_level(&mut out, 4, "%s", &[Arg::from(long.as_str())]);

    assert_eq!(written, "[WARN] ".len() + PRINTK_BODY_CAPACITY - 1);
    assert!(out.0.starts_with(b"[WARN] xxx"));
    assert_eq!(out.0.len(), written);
}

#[test]
fn null_string_argument() {
    let mut out = Line::default();
    printk!(&mut out, "name=%s", None::<&str>);
    assert_eq!(out.0, b"[INFO] name=(null)");
}

#[test]
fn mixed_widths() {
    let mut out = Line::default();
    printk!(
        &mut out,
        "<7>%lld %x %X %c",
        -9_000_000_000i64,
        255u32,
        255u32,
        'z'
    );
    assert_eq!(out.0, b"[DEBUG] -9000000000 ff FF z");
}
