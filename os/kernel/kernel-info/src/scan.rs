//! # Boot Info Scanner
//!
//! Walks the tag stream of a [`BootInfoBlock`] without ever reading past its
//! `total_size`. The cursor lives in the [`Tags`] iterator, so a scan is a
//! plain value that can be driven against synthetic buffers in tests.

use crate::boot::{
    BOOT_INFO_HEADER_SIZE, BootInfoBlock, FramebufferTag, TAG_ALIGN, TAG_HEADER_SIZE, Tag,
    TagType, read_u32_le,
};
use log::debug;

/// Why a scan did not produce a framebuffer descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The stream is well-formed but carries no framebuffer tag.
    #[error("no framebuffer tag in boot information")]
    NotFound,
    #[error("boot information block is smaller than its header")]
    BlockTooSmall,
    #[error("boot information block extends past the supplied buffer")]
    BlockOverrun,
    /// A zero-size tag would stall the cursor forever.
    #[error("zero-size tag at offset {offset:#x}")]
    ZeroSizedTag { offset: usize },
    #[error("tag at offset {offset:#x} with size {size} overruns the block")]
    TagOverrun { offset: usize, size: u32 },
    #[error("framebuffer tag at offset {offset:#x} is too short ({size} bytes)")]
    FramebufferTooShort { offset: usize, size: u32 },
    /// The block ended before an END tag was seen.
    #[error("tag stream ends at offset {offset:#x} without an end tag")]
    Unterminated { offset: usize },
}

impl ScanError {
    /// `true` for everything except [`ScanError::NotFound`].
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Iterator over the tags of a block.
///
/// Yields the END tag as the last item. After the END tag or the first
/// error, the iterator is exhausted.
pub struct Tags<'a> {
    bytes: &'a [u8],
    cursor: usize,
    done: bool,
}

impl<'a> Tags<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            cursor: BOOT_INFO_HEADER_SIZE,
            done: false,
        }
    }

    /// Offset of the next tag header from the block start.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    fn fail(&mut self, err: ScanError) -> Result<Tag<'a>, ScanError> {
        self.done = true;
        Err(err)
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Result<Tag<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let offset = self.cursor;
        let end = self.bytes.len();
        let header_fits = offset
            .checked_add(TAG_HEADER_SIZE)
            .is_some_and(|header_end| header_end <= end);
        if !header_fits {
            return Some(self.fail(ScanError::Unterminated { offset }));
        }

        let (Some(raw_type), Some(size)) = (
            read_u32_le(self.bytes, offset),
            read_u32_le(self.bytes, offset + 4),
        ) else {
            return Some(self.fail(ScanError::Unterminated { offset }));
        };

        if size == 0 {
            return Some(self.fail(ScanError::ZeroSizedTag { offset }));
        }

        let tag_type = TagType::from_raw(raw_type);
        if tag_type == TagType::End {
            self.done = true;
            return Some(Ok(Tag {
                tag_type,
                size,
                offset,
                payload: &[],
            }));
        }

        let Some(tag_end) = offset.checked_add(size as usize).filter(|&e| e <= end) else {
            return Some(self.fail(ScanError::TagOverrun { offset, size }));
        };
        let payload_start = (offset + TAG_HEADER_SIZE).min(tag_end);
        let payload = &self.bytes[payload_start..tag_end];

        // Tags are padded to 8 bytes; the next header check re-validates
        // the cursor against the block end.
        match align_up(size as usize).and_then(|step| offset.checked_add(step)) {
            Some(next) => self.cursor = next,
            None => self.done = true,
        }

        Some(Ok(Tag {
            tag_type,
            size,
            offset,
            payload,
        }))
    }
}

impl core::iter::FusedIterator for Tags<'_> {}

#[inline]
const fn align_up(size: usize) -> Option<usize> {
    match size.checked_add(TAG_ALIGN - 1) {
        Some(v) => Some(v & !(TAG_ALIGN - 1)),
        None => None,
    }
}

/// Locate the framebuffer tag of a boot information block.
///
/// # Errors
/// [`ScanError::NotFound`] if the stream terminates without a framebuffer
/// tag; any other variant if the stream is malformed.
pub fn scan(block: &BootInfoBlock<'_>) -> Result<FramebufferTag, ScanError> {
    let result = find_framebuffer(block);
    if let Err(err) = &result {
        debug!("boot info scan: {err}");
    }
    result
}

/// Scan a raw buffer whose first `total_size` bytes form the block.
///
/// # Errors
/// See [`scan`] and [`BootInfoBlock::with_total_size`].
pub fn scan_raw(buffer: &[u8], total_size: usize) -> Result<FramebufferTag, ScanError> {
    let block = BootInfoBlock::with_total_size(buffer, total_size)?;
    scan(&block)
}

fn find_framebuffer(block: &BootInfoBlock<'_>) -> Result<FramebufferTag, ScanError> {
    for tag in block.tags() {
        let tag = tag?;
        if tag.tag_type == TagType::End {
            return Err(ScanError::NotFound);
        }
        if let Some(fb) = tag.as_framebuffer() {
            return fb;
        }
    }
    Err(ScanError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_eight() {
        assert_eq!(align_up(1), Some(8));
        assert_eq!(align_up(8), Some(8));
        assert_eq!(align_up(9), Some(16));
        assert_eq!(align_up(usize::MAX), None);
    }

    #[test]
    fn malformed_classification() {
        assert!(!ScanError::NotFound.is_malformed());
        assert!(ScanError::ZeroSizedTag { offset: 8 }.is_malformed());
        assert!(ScanError::Unterminated { offset: 8 }.is_malformed());
    }

    #[test]
    fn header_only_block_is_unterminated() {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&8u32.to_le_bytes());
        let block = BootInfoBlock::new(&bytes).unwrap();
        assert_eq!(
            scan(&block).unwrap_err(),
            ScanError::Unterminated { offset: 8 }
        );
    }

    #[test]
    fn iterator_is_fused_after_error() {
        let mut bytes = [0u8; 24];
        bytes[0..4].copy_from_slice(&24u32.to_le_bytes());
        bytes[8..12].copy_from_slice(&1u32.to_le_bytes());
        // size stays zero
        let block = BootInfoBlock::new(&bytes).unwrap();
        let mut tags = block.tags();
        assert_eq!(
            tags.next().unwrap().unwrap_err(),
            ScanError::ZeroSizedTag { offset: 8 }
        );
        assert!(tags.next().is_none());
        assert!(tags.next().is_none());
    }
}
