//! # Kernel Tracing helpers

use kernel_info::{BootDisplay, DisplayMode};
use log::{info, warn};

pub fn trace_boot_display(display: &BootDisplay) {
    if let Some(fb) = display.framebuffer {
        info!(
            concat!(
                "Boot display:\n",
                "  FB ptr   = {fb_ptr:#018x}, size = {fb_size}, width = {fb_width}, height = {fb_height}, pitch = {fb_pitch}, bpp = {fb_bpp}, type = {fb_type:?}\n",
                "  mode     = {mode}"
            ),
            fb_ptr = fb.address,
            fb_size = fb.size_bytes(),
            fb_width = fb.width,
            fb_height = fb.height,
            fb_pitch = fb.pitch,
            fb_bpp = fb.bpp,
            fb_type = fb.framebuffer_type(),
            mode = mode_name(display.mode),
        );
        return;
    }

    match display.scan_error {
        Some(err) if err.is_malformed() => {
            warn!("Boot information rejected ({err}); falling back to the text console");
        }
        _ => info!("No framebuffer reported; using the text console"),
    }
}

const fn mode_name(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Text => "text",
        DisplayMode::Graphics => "graphics",
    }
}
