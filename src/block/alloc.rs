//! Block allocation and scoped disposal.

use super::{Block, HeapBlock};
use crate::error::BlockError;

/// Source of blocks.
///
/// Blocks are exclusively owned by whoever holds them. Every block handed out
/// by `allocate` is passed back to `dispose` at most once.
pub trait BlockAllocator {
    /// The block type produced by this allocator.
    type Block: Block;

    /// Allocates a block of exactly `len` bytes.
    fn allocate(&self, len: usize) -> Result<Self::Block, BlockError>;

    /// Releases a block previously returned by `allocate`.
    fn dispose(&self, block: Self::Block);
}

impl<A: BlockAllocator + ?Sized> BlockAllocator for &A {
    type Block = A::Block;

    fn allocate(&self, len: usize) -> Result<Self::Block, BlockError> {
        (**self).allocate(len)
    }

    fn dispose(&self, block: Self::Block) {
        (**self).dispose(block)
    }
}

/// Allocator producing zero-filled [`HeapBlock`]s.
///
/// Allocation reserves memory fallibly, so exhaustion is reported as
/// [`BlockError::AllocationFailed`] rather than aborting the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl BlockAllocator for HeapAllocator {
    type Block = HeapBlock;

    fn allocate(&self, len: usize) -> Result<HeapBlock, BlockError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BlockError::AllocationFailed { len })?;
        data.resize(len, 0);
        Ok(HeapBlock::from(data))
    }

    fn dispose(&self, block: HeapBlock) {
        drop(block);
    }
}

/// Allocates a block of `len` bytes and runs `fill` over it.
///
/// The block only reaches the caller when `fill` succeeds. On error it is
/// disposed through `allocator` exactly once before the error is returned.
pub(crate) fn fill_new_block<A, T, F>(
    allocator: &A,
    len: usize,
    fill: F,
) -> Result<(A::Block, T), BlockError>
where
    A: BlockAllocator + ?Sized,
    F: FnOnce(&mut A::Block) -> Result<T, BlockError>,
{
    let mut block = allocator.allocate(len)?;
    match fill(&mut block) {
        Ok(value) => Ok((block, value)),
        Err(err) => {
            tracing::debug!(len = block.len(), "disposing block after failed fill");
            allocator.dispose(block);
            Err(err)
        }
    }
}
