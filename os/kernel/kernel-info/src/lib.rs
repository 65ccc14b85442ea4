//! # Kernel Boot Information
//!
//! This crate reads the bootloader-supplied Boot Info Block exactly once at
//! boot and turns it into the few facts the kernel cares about: whether a
//! linear framebuffer exists and whether the console should run in text or
//! graphics mode.
//!
//! ## Block Layout
//!
//! The block follows the Multiboot2 tag layout:
//!
//! ```text
//! offset 0  ┌──────────────────────────────┐
//!           │ total_size: u32              │
//!           │ reserved:   u32              │
//! offset 8  ├──────────────────────────────┤
//!           │ type: u32 │ size: u32        │  tag header
//!           │ payload (size - 8 bytes)     │
//!           │ padding to 8-byte boundary   │
//!           ├──────────────────────────────┤
//!           │ ...                          │
//!           ├──────────────────────────────┤
//!           │ type: 0   │ size: 8          │  END tag
//!           └──────────────────────────────┘ total_size
//! ```
//!
//! The framebuffer tag (type 8) carries
//! `{ address: u64, pitch: u32, width: u32, height: u32, bpp: u8, type: u8, reserved: u8 }`.
//!
//! ## Components
//!
//! ### Boot Information ([`boot`])
//! * [`BootInfoBlock`]: a view bounded by `total_size`
//! * [`Tag`], [`TagType`]: one record of the stream
//! * [`FramebufferTag`], [`FramebufferType`]: the decoded framebuffer record
//!
//! ### Scanner ([`scan`](mod@scan))
//! * [`Tags`]: iterator holding the cursor; every read is bounds-checked
//! * [`scan()`]: locate the framebuffer tag or report [`ScanError`]
//!
//! ### Classifier ([`display`])
//! * [`classify`]: `Graphics` beyond 80×25 or 16 bpp, otherwise `Text`
//! * [`detect_display`]: scan and classify with the text fallback
//!
//! ## Safety Guarantees
//!
//! * **Untrusted input**: the block is treated as hostile; no read happens
//!   past `total_size` and a zero-size tag is rejected instead of looping.
//! * **No unsafe code**: the crate operates on byte slices only. Turning the
//!   physical address handed over by the bootloader into a slice is the
//!   caller's responsibility.
//!
//! ## Usage
//!
//! ```rust
//! use kernel_info::{BootInfoBlock, DisplayMode, detect_display};
//!
//! // Header, then a lone END tag.
//! let mut bytes = [0u8; 16];
//! bytes[0..4].copy_from_slice(&16u32.to_le_bytes());
//! bytes[12..16].copy_from_slice(&8u32.to_le_bytes());
//!
//! let block = BootInfoBlock::new(&bytes).unwrap();
//! let display = detect_display(&block);
//! assert_eq!(display.mode, DisplayMode::Text);
//! assert!(display.framebuffer.is_none());
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod display;
pub mod scan;

pub use boot::{BootInfoBlock, FramebufferTag, FramebufferType, Tag, TagType};
pub use display::{BootDisplay, DisplayMode, classify, classify_scan, detect_display};
pub use scan::{ScanError, Tags, scan, scan_raw};
