//! Bounds validation for block regions.

use std::ops::Range;

use crate::error::BlockError;

/// A validated `[offset, offset + len)` window inside a block.
///
/// All copy and digest routines go through [`Region::new`] before touching
/// any stream or block, so an invalid region never causes partial I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    offset: usize,
    len: usize,
}

impl Region {
    /// Validates a region against a block of `block_len` bytes.
    ///
    /// A zero-length region is valid at any offset up to and including
    /// `block_len`. Overflowing `offset + len` is reported as out of range.
    pub fn new(offset: usize, len: usize, block_len: usize) -> Result<Self, BlockError> {
        match offset.checked_add(len) {
            Some(end) if end <= block_len => Ok(Self { offset, len }),
            _ => Err(BlockError::OutOfRange {
                offset,
                len,
                block_len,
            }),
        }
    }

    /// Start of the region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the region.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the region covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The region as a slice range.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}
