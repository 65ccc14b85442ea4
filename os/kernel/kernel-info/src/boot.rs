//! # Boot Information Block

use crate::ScanError;

/// Size of the block header: `total_size: u32` followed by `reserved: u32`.
pub const BOOT_INFO_HEADER_SIZE: usize = 8;

/// Size of every tag header: `type: u32` followed by `size: u32`.
pub const TAG_HEADER_SIZE: usize = 8;

/// Tags start on 8-byte boundaries relative to the block start.
pub const TAG_ALIGN: usize = 8;

/// Smallest framebuffer tag we can decode: tag header, `u64` address,
/// pitch/width/height as `u32`, then `bpp`, `type` and one reserved byte.
pub const FRAMEBUFFER_TAG_MIN_SIZE: usize = 31;

/// Multiboot2 tag numbers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagType {
    /// Terminates the tag stream.
    End,
    CommandLine,
    BootLoaderName,
    Module,
    BasicMemoryInfo,
    BootDevice,
    MemoryMap,
    Vbe,
    /// Linear framebuffer description, see [`FramebufferTag`].
    Framebuffer,
    ElfSections,
    Apm,
    /// Any tag number this kernel does not interpret.
    Other(u32),
}

impl TagType {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::End,
            1 => Self::CommandLine,
            2 => Self::BootLoaderName,
            3 => Self::Module,
            4 => Self::BasicMemoryInfo,
            5 => Self::BootDevice,
            6 => Self::MemoryMap,
            7 => Self::Vbe,
            8 => Self::Framebuffer,
            9 => Self::ElfSections,
            10 => Self::Apm,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::End => 0,
            Self::CommandLine => 1,
            Self::BootLoaderName => 2,
            Self::Module => 3,
            Self::BasicMemoryInfo => 4,
            Self::BootDevice => 5,
            Self::MemoryMap => 6,
            Self::Vbe => 7,
            Self::Framebuffer => 8,
            Self::ElfSections => 9,
            Self::Apm => 10,
            Self::Other(raw) => raw,
        }
    }
}

/// Read-only view over a bootloader-supplied Boot Info Block.
///
/// The view never extends past `total_size` bytes from the block start,
/// even if the backing slice is longer.
#[derive(Debug, Copy, Clone)]
pub struct BootInfoBlock<'a> {
    bytes: &'a [u8],
}

impl<'a> BootInfoBlock<'a> {
    /// Validate the block header and bound the view to `total_size`.
    ///
    /// # Errors
    /// * [`ScanError::BlockTooSmall`] if the slice cannot hold the header
    ///   or `total_size` is smaller than the header.
    /// * [`ScanError::BlockOverrun`] if `total_size` exceeds the slice.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ScanError> {
        let total_size = read_u32_le(bytes, 0).ok_or(ScanError::BlockTooSmall)? as usize;
        Self::with_total_size(bytes, total_size)
    }

    /// Like [`BootInfoBlock::new`], but with `total_size` supplied by the caller.
    ///
    /// # Errors
    /// See [`BootInfoBlock::new`].
    pub fn with_total_size(bytes: &'a [u8], total_size: usize) -> Result<Self, ScanError> {
        if total_size < BOOT_INFO_HEADER_SIZE || bytes.len() < BOOT_INFO_HEADER_SIZE {
            return Err(ScanError::BlockTooSmall);
        }
        let bytes = bytes.get(..total_size).ok_or(ScanError::BlockOverrun)?;
        Ok(Self { bytes })
    }

    /// Number of bytes covered by this block, header included.
    #[must_use]
    pub const fn total_size(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Walk the tag stream; see [`Tags`](crate::Tags).
    #[must_use]
    pub const fn tags(&self) -> crate::Tags<'a> {
        crate::Tags::new(self.bytes)
    }
}

/// One tag of the stream, with its payload bounded by the block.
#[derive(Debug, Copy, Clone)]
pub struct Tag<'a> {
    pub tag_type: TagType,
    /// Declared size including the tag header, before alignment padding.
    pub size: u32,
    /// Offset of the tag header from the block start.
    pub offset: usize,
    /// Bytes following the tag header, `size - 8` long.
    pub payload: &'a [u8],
}

impl Tag<'_> {
    /// Decode this tag as a framebuffer descriptor.
    ///
    /// Returns `None` for other tag types.
    ///
    /// # Errors
    /// [`ScanError::FramebufferTooShort`] if the tag is too small to hold
    /// the framebuffer fields.
    #[must_use]
    pub fn as_framebuffer(&self) -> Option<Result<FramebufferTag, ScanError>> {
        if self.tag_type != TagType::Framebuffer {
            return None;
        }
        Some(FramebufferTag::decode(self.payload).ok_or(ScanError::FramebufferTooShort {
            offset: self.offset,
            size: self.size,
        }))
    }
}

/// Decoded framebuffer tag (type 8).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FramebufferTag {
    /// Physical address of the linear framebuffer.
    pub address: u64,
    /// Bytes per scanline.
    pub pitch: u32,
    /// Width in pixels, or in characters for EGA text.
    pub width: u32,
    /// Height in pixels, or in characters for EGA text.
    pub height: u32,
    /// Bits per pixel.
    pub bpp: u8,
    /// Raw framebuffer type, see [`FramebufferType`].
    pub fb_type: u8,
}

impl FramebufferTag {
    /// Decode from the tag payload (the bytes after `type`/`size`).
    #[must_use]
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() < FRAMEBUFFER_TAG_MIN_SIZE - TAG_HEADER_SIZE {
            return None;
        }
        Some(Self {
            address: read_u64_le(payload, 0)?,
            pitch: read_u32_le(payload, 8)?,
            width: read_u32_le(payload, 12)?,
            height: read_u32_le(payload, 16)?,
            bpp: *payload.get(20)?,
            fb_type: *payload.get(21)?,
        })
    }

    #[must_use]
    pub const fn framebuffer_type(&self) -> FramebufferType {
        FramebufferType::from_raw(self.fb_type)
    }

    /// Bytes spanned by the visible framebuffer (`pitch * height`).
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.pitch as u64 * self.height as u64
    }
}

/// Framebuffer memory model reported by the bootloader.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FramebufferType {
    /// Palette-indexed colors.
    Indexed,
    /// Direct RGB color.
    Rgb,
    /// Legacy EGA text mode; `width`/`height` count characters.
    EgaText,
    Unknown(u8),
}

impl FramebufferType {
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Indexed,
            1 => Self::Rgb,
            2 => Self::EgaText,
            other => Self::Unknown(other),
        }
    }
}

#[inline]
pub(crate) fn read_u32_le(buf: &[u8], off: usize) -> Option<u32> {
    let end = off.checked_add(4)?;
    let s = buf.get(off..end)?;
    Some(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
}

#[inline]
pub(crate) fn read_u64_le(buf: &[u8], off: usize) -> Option<u64> {
    let end = off.checked_add(8)?;
    let s = buf.get(off..end)?;
    Some(u64::from_le_bytes([
        s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_bounded_by_total_size() {
        let mut bytes = [0u8; 64];
        bytes[0..4].copy_from_slice(&24u32.to_le_bytes());
        let block = BootInfoBlock::new(&bytes).unwrap();
        assert_eq!(block.total_size(), 24);
        assert_eq!(block.as_bytes().len(), 24);
    }

    #[test]
    fn block_rejects_bad_headers() {
        assert_eq!(
            BootInfoBlock::new(&[0u8; 4]).unwrap_err(),
            ScanError::BlockTooSmall
        );

        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&4u32.to_le_bytes());
        assert_eq!(
            BootInfoBlock::new(&bytes).unwrap_err(),
            ScanError::BlockTooSmall
        );

        bytes[0..4].copy_from_slice(&32u32.to_le_bytes());
        assert_eq!(
            BootInfoBlock::new(&bytes).unwrap_err(),
            ScanError::BlockOverrun
        );
    }

    #[test]
    fn framebuffer_payload_decodes_fields() {
        let mut payload = [0u8; 24];
        payload[0..8].copy_from_slice(&0xFD00_0000u64.to_le_bytes());
        payload[8..12].copy_from_slice(&7680u32.to_le_bytes());
        payload[12..16].copy_from_slice(&1920u32.to_le_bytes());
        payload[16..20].copy_from_slice(&1080u32.to_le_bytes());
        payload[20] = 32;
        payload[21] = 1;

        let fb = FramebufferTag::decode(&payload).unwrap();
        assert_eq!(fb.address, 0xFD00_0000);
        assert_eq!(fb.pitch, 7680);
        assert_eq!(fb.width, 1920);
        assert_eq!(fb.height, 1080);
        assert_eq!(fb.bpp, 32);
        assert_eq!(fb.framebuffer_type(), FramebufferType::Rgb);
        assert_eq!(fb.size_bytes(), 7680 * 1080);
    }

    #[test]
    fn framebuffer_payload_too_short() {
        assert!(FramebufferTag::decode(&[0u8; 22]).is_none());
    }

    #[test]
    fn tag_type_numbering() {
        assert_eq!(TagType::from_raw(0), TagType::End);
        assert_eq!(TagType::from_raw(8), TagType::Framebuffer);
        assert_eq!(TagType::from_raw(42), TagType::Other(42));
        assert_eq!(TagType::Framebuffer.as_raw(), 8);
        assert_eq!(TagType::Other(42).as_raw(), 42);
    }
}
