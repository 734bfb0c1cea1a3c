//! Whole-file and whole-stream block I/O.

use std::io::{Read, Write};
use std::path::Path;

use crate::block::{Block, BlockAllocator, HeapAllocator, Region, fill_new_block};
use crate::config::IoConfig;
use crate::copier::{copy_block_into_stream, copy_stream_into_block};
use crate::error::BlockError;
use crate::util::to_usize;

use super::open::{OpenMode, check_path, open};

/// Reads files into freshly allocated blocks and writes blocks back out.
///
/// `BlockIo` pairs an allocator with an [`IoConfig`]. A block it allocates is
/// only handed to the caller once it has been filled; if filling fails, the
/// block is disposed through the allocator before the error is returned.
///
/// # Example
///
/// ```no_run
/// use blockcopy::{Block, BlockIo, IoConfig};
///
/// let io = BlockIo::new(IoConfig::default().with_round_to_power_of_two(true));
/// let block = io.read_file("data.bin")?;
/// println!("allocated {} bytes", block.len());
///
/// io.write_file("copy.bin", &block)?;
/// # Ok::<(), blockcopy::BlockError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BlockIo<A = HeapAllocator> {
    allocator: A,
    config: IoConfig,
}

impl BlockIo<HeapAllocator> {
    /// Creates a `BlockIo` that allocates heap blocks.
    pub fn new(config: IoConfig) -> Self {
        Self::with_allocator(HeapAllocator, config)
    }
}

impl Default for BlockIo<HeapAllocator> {
    fn default() -> Self {
        Self::new(IoConfig::default())
    }
}

impl<A: BlockAllocator> BlockIo<A> {
    /// Creates a `BlockIo` over a custom allocator.
    pub fn with_allocator(allocator: A, config: IoConfig) -> Self {
        Self { allocator, config }
    }

    /// Returns the allocator.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Returns the configuration.
    pub fn config(&self) -> &IoConfig {
        &self.config
    }

    /// Reads a whole file into a newly allocated block.
    ///
    /// The file is opened for exclusive reading and closed before returning.
    /// The block length is the file length, or the next power of two when
    /// rounding is configured; only the file's bytes are filled.
    ///
    /// # Errors
    ///
    /// - [`BlockError::InvalidArgument`] for an empty path or a file larger
    ///   than the configured cap
    /// - [`BlockError::Overflow`] if the rounded length is not representable
    /// - [`BlockError::AllocationFailed`] if the allocator fails
    /// - [`BlockError::Io`] if the file cannot be opened, locked or read
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<A::Block, BlockError> {
        let mut file = open(path.as_ref(), OpenMode::ReadExclusive, self.config.exclusive())?;
        let source_len = file.metadata()?.len();
        self.read_stream(&mut file, source_len)
    }

    /// Reads `source_len` bytes from `reader` into a newly allocated block.
    ///
    /// Sizing and failure handling are the same as [`BlockIo::read_file`].
    /// A reader that ends early is not an error: the block keeps its decided
    /// length and the unfilled tail stays as allocated.
    pub fn read_stream<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        source_len: u64,
    ) -> Result<A::Block, BlockError> {
        let block_len = self.config.block_len_for(source_len)?;
        let fill_len = to_usize(source_len)?;

        let (block, copied) = fill_new_block(&self.allocator, block_len, |block| {
            copy_stream_into_block(reader, block, 0, fill_len)
        })?;
        if copied < fill_len {
            tracing::warn!(expected = fill_len, copied, "source ended early");
        }

        tracing::debug!(block_len, copied, "filled block");
        Ok(block)
    }

    /// Writes a whole block to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// - [`BlockError::InvalidArgument`] for an empty path
    /// - [`BlockError::Io`] if the file cannot be opened, locked or written
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(path = %path.as_ref().display(), len = block.len()),
        err
    )]
    pub fn write_file<B: Block + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        block: &B,
    ) -> Result<(), BlockError> {
        self.write_file_range(path, block, 0, block.len())
    }

    /// Writes `len` bytes of `block` starting at `offset` to a file.
    ///
    /// The region is validated before the file is opened, so an invalid
    /// region leaves any existing file untouched.
    ///
    /// # Errors
    ///
    /// - [`BlockError::OutOfRange`] if the region does not fit in the block
    /// - otherwise as [`BlockIo::write_file`]
    pub fn write_file_range<B: Block + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        block: &B,
        offset: usize,
        len: usize,
    ) -> Result<(), BlockError> {
        let path = path.as_ref();
        check_path(path)?;
        Region::new(offset, len, block.len())?;

        let mut file = open(path, OpenMode::WriteExclusive, self.config.exclusive())?;
        copy_block_into_stream(&mut file, block, offset, len)?;
        file.flush()?;
        Ok(())
    }
}

/// Reads a whole file into a new heap block.
///
/// With `round_to_power_of_two`, the block is allocated at the next power of
/// two at or above the file length and only the file's bytes are filled.
///
/// # Example
///
/// ```no_run
/// use blockcopy::{Block, read_file};
///
/// let block = read_file("data.bin", true)?;
/// assert!(block.len().is_power_of_two() || block.is_empty());
/// # Ok::<(), blockcopy::BlockError>(())
/// ```
pub fn read_file(
    path: impl AsRef<Path>,
    round_to_power_of_two: bool,
) -> Result<crate::block::HeapBlock, BlockError> {
    BlockIo::new(IoConfig::default().with_round_to_power_of_two(round_to_power_of_two))
        .read_file(path)
}

/// Writes a whole block to a file, creating or truncating it.
pub fn write_file<B: Block + ?Sized>(path: impl AsRef<Path>, block: &B) -> Result<(), BlockError> {
    BlockIo::default().write_file(path, block)
}

/// Writes `len` bytes of `block` starting at `offset` to a file.
pub fn write_file_range<B: Block + ?Sized>(
    path: impl AsRef<Path>,
    block: &B,
    offset: usize,
    len: usize,
) -> Result<(), BlockError> {
    BlockIo::default().write_file_range(path, block, offset, len)
}
