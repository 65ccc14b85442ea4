//! # Display Mode Classifier

use crate::boot::{BootInfoBlock, FramebufferTag};
use crate::scan::{ScanError, scan};

/// Columns of the legacy text console.
pub const TEXT_COLUMNS: u32 = 80;

/// Rows of the legacy text console.
pub const TEXT_ROWS: u32 = 25;

/// Deepest color depth still reported by a legacy text console.
pub const TEXT_MAX_BPP: u8 = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    /// 80×25 VGA text console.
    Text,
    /// Linear pixel framebuffer.
    Graphics,
}

/// Decide the display mode from a validated framebuffer descriptor.
///
/// Anything larger than 80×25 or deeper than 16 bpp is a real linear
/// framebuffer; the comparison is strict.
#[must_use]
pub const fn classify(fb: &FramebufferTag) -> DisplayMode {
    if fb.width > TEXT_COLUMNS || fb.height > TEXT_ROWS || fb.bpp > TEXT_MAX_BPP {
        DisplayMode::Graphics
    } else {
        DisplayMode::Text
    }
}

/// Classify a scan outcome; any error falls back to [`DisplayMode::Text`].
#[must_use]
pub const fn classify_scan(result: &Result<FramebufferTag, ScanError>) -> DisplayMode {
    match result {
        Ok(fb) => classify(fb),
        Err(_) => DisplayMode::Text,
    }
}

/// Display facts derived once at boot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BootDisplay {
    pub mode: DisplayMode,
    /// The framebuffer descriptor, when the scan found a valid one.
    pub framebuffer: Option<FramebufferTag>,
    /// The reason no descriptor is available, if any.
    pub scan_error: Option<ScanError>,
}

impl BootDisplay {
    /// The loader passed no block at all. Reported as
    /// [`ScanError::NotFound`], since nothing malformed was seen.
    #[must_use]
    pub const fn absent() -> Self {
        Self::text_fallback(ScanError::NotFound)
    }

    /// The fallback used when there is no boot information at all.
    #[must_use]
    pub const fn text_fallback(reason: ScanError) -> Self {
        Self {
            mode: DisplayMode::Text,
            framebuffer: None,
            scan_error: Some(reason),
        }
    }
}

/// Scan `block` and classify the result.
#[must_use]
pub fn detect_display(block: &BootInfoBlock<'_>) -> BootDisplay {
    let result = scan(block);
    let mode = classify_scan(&result);
    match result {
        Ok(fb) => BootDisplay {
            mode,
            framebuffer: Some(fb),
            scan_error: None,
        },
        Err(err) => BootDisplay::text_fallback(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn fb(width: u32, height: u32, bpp: u8) -> FramebufferTag {
        FramebufferTag {
            address: 0xB8000,
            pitch: width * 2,
            width,
            height,
            bpp,
            fb_type: 2,
        }
    }

    #[test]
    fn full_hd_is_graphics() {
        assert_eq!(classify(&fb(1920, 1080, 32)), DisplayMode::Graphics);
    }

    #[test]
    fn legacy_text_bounds_are_text() {
        assert_eq!(classify(&fb(80, 25, 16)), DisplayMode::Text);
        assert_eq!(classify(&fb(40, 25, 4)), DisplayMode::Text);
    }

    #[test]
    fn each_bound_is_strict() {
        assert_eq!(classify(&fb(81, 25, 16)), DisplayMode::Graphics);
        assert_eq!(classify(&fb(80, 26, 16)), DisplayMode::Graphics);
        assert_eq!(classify(&fb(80, 25, 17)), DisplayMode::Graphics);
    }

    #[test]
    fn scan_errors_fall_back_to_text() {
        assert_eq!(classify_scan(&Err(ScanError::NotFound)), DisplayMode::Text);
        assert_eq!(
            classify_scan(&Err(ScanError::ZeroSizedTag { offset: 8 })),
            DisplayMode::Text
        );
        assert_eq!(classify_scan(&Ok(fb(1024, 768, 32))), DisplayMode::Graphics);
    }

    #[test]
    fn absent_block_is_not_malformed() {
        let display = BootDisplay::absent();
        assert_eq!(display.mode, DisplayMode::Text);
        assert_eq!(display.framebuffer, None);
        assert_eq!(display.scan_error, Some(ScanError::NotFound));
        assert!(!ScanError::NotFound.is_malformed());
    }
}
