use kernel_tty::{Color, ColorPair, Multiplexer, OutputSink, SinkError, Tty, TtyError};

/// Records every chunk it receives.
#[derive(Default)]
struct Recorder {
    chunks: Vec<(Vec<u8>, ColorPair)>,
}

impl Recorder {
    fn bytes(&self) -> Vec<u8> {
        self.chunks.iter().flat_map(|(c, _)| c.iter().copied()).collect()
    }
}

impl OutputSink for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn write(&mut self, bytes: &[u8], colors: ColorPair) -> Result<(), SinkError> {
        self.chunks.push((bytes.to_vec(), colors));
        Ok(())
    }
}

/// Always fails, like a serial port with nothing attached.
#[derive(Default)]
struct Broken {
    attempts: usize,
}

impl OutputSink for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn write(&mut self, _bytes: &[u8], _colors: ColorPair) -> Result<(), SinkError> {
        self.attempts += 1;
        Err(SinkError::TimedOut)
    }
}

#[test]
fn write_is_flushed_to_every_sink_immediately() {
    let mut console = Recorder::default();
    let mut serial = Recorder::default();
    let colors = ColorPair::new(Color::Yellow, Color::Black);

    {
        let mut tty: Tty<'_, 64, 4> = Tty::new();
        tty.register(&mut console).unwrap();
        tty.register(&mut serial).unwrap();

        assert_eq!(tty.write(b"[WARN] disk slow\n", colors), 17);
        assert_eq!(tty.available(), 0);
    }

    assert_eq!(console.bytes(), b"[WARN] disk slow\n");
    assert_eq!(serial.bytes(), b"[WARN] disk slow\n");
    assert_eq!(console.chunks[0].1, colors);
}

#[test]
fn failing_sink_does_not_block_others() {
    let mut broken = Broken::default();
    let mut good = Recorder::default();

    let mut mux: Multiplexer<'_, 4> = Multiplexer::new();
    let broken_id = mux.register(&mut broken).unwrap();
    let good_id = mux.register(&mut good).unwrap();

    let report = mux.flush_to_sinks(b"abc", ColorPair::DEFAULT);
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, 1);
    assert!(!report.is_clean());
    assert_eq!(mux.failures(broken_id), Some(1));
    assert_eq!(mux.failures(good_id), Some(0));

    drop(mux);
    assert_eq!(broken.attempts, 1);
    assert_eq!(good.bytes(), b"abc");
}

#[test]
fn large_flush_is_chunked() {
    let mut sink = Recorder::default();
    let payload: Vec<u8> = (0..1000u32).map(|i| u8::try_from(i % 251).unwrap()).collect();

    {
        let mut tty: Tty<'_, 1024, 2> = Tty::new();
        tty.register(&mut sink).unwrap();
        tty.write(&payload, ColorPair::DEFAULT);
    }

    assert_eq!(sink.bytes(), payload);
    assert!(sink.chunks.iter().all(|(c, _)| c.len() <= 256));
    assert_eq!(sink.chunks.len(), 4);
}

#[test]
fn oversized_write_keeps_only_the_newest_bytes() {
    let mut sink = Recorder::default();
    {
        let mut tty: Tty<'_, 16, 1> = Tty::new();
        tty.register(&mut sink).unwrap();
        assert_eq!(tty.write(b"0123456789abcdefGHIJ", ColorPair::DEFAULT), 20);
    }
    assert_eq!(sink.bytes(), b"456789abcdefGHIJ");
}

#[test]
fn sink_table_is_bounded_and_slots_are_reused() {
    let mut a = Recorder::default();
    let mut b = Recorder::default();
    let mut c = Recorder::default();

    let mut mux: Multiplexer<'_, 2> = Multiplexer::new();
    let a_id = mux.register(&mut a).unwrap();
    mux.register(&mut b).unwrap();
    assert_eq!(mux.register(&mut c).unwrap_err(), TtyError::SinkTableFull);
    assert_eq!(mux.len(), 2);

    let returned = mux.unregister(a_id).unwrap();
    assert_eq!(returned.name(), "recorder");
    assert!(matches!(mux.unregister(a_id), Err(TtyError::UnknownSink)));
    assert_eq!(mux.failures(a_id), None);
    assert_eq!(mux.len(), 1);
}

#[test]
fn read_drains_without_sinks() {
    let mut tty: Tty<'_, 16, 1> = Tty::new();
    assert!(tty.sinks().is_empty());

    // With no sinks, writes still drain through flush.
    tty.write(b"gone", ColorPair::DEFAULT);
    assert_eq!(tty.available(), 0);

    let mut out = [0u8; 4];
    assert_eq!(tty.read(&mut out), 0);
}

#[test]
fn empty_chunk_reaches_no_sink() {
    let mut sink = Recorder::default();
    {
        let mut mux: Multiplexer<'_, 1> = Multiplexer::new();
        mux.register(&mut sink).unwrap();
        let report = mux.flush_to_sinks(&[], ColorPair::DEFAULT);
        assert_eq!(report.delivered, 0);
    }
    assert!(sink.chunks.is_empty());
}

#[test]
fn putc_delivers_one_byte_in_default_colors() {
    let mut sink = Recorder::default();
    {
        let mut tty: Tty<'_, 16, 1> = Tty::new();
        tty.register(&mut sink).unwrap();
        assert_eq!(tty.putc(b'!'), 1);
        assert_eq!(tty.available(), 0);
    }
    assert_eq!(sink.chunks, vec![(b"!".to_vec(), ColorPair::DEFAULT)]);
}

#[test]
fn flush_on_empty_ring_reports_nothing() {
    let mut broken = Broken::default();
    {
        let mut tty: Tty<'_, 16, 1> = Tty::new();
        tty.register(&mut broken).unwrap();
        let report = tty.flush();
        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 0);
        assert!(report.is_clean());
    }
    assert_eq!(broken.attempts, 0);
}

#[test]
fn flush_after_write_has_nothing_left() {
    let mut broken = Broken::default();
    let mut good = Recorder::default();
    {
        let mut tty: Tty<'_, 16, 2> = Tty::new();
        tty.register(&mut broken).unwrap();
        tty.register(&mut good).unwrap();
        tty.write(b"x", ColorPair::DEFAULT);
        // Everything was already drained by the write.
        assert!(tty.flush().is_clean());
    }
    assert_eq!(broken.attempts, 1);
    assert_eq!(good.bytes(), b"x");
}
