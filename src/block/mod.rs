//! Block types.
//!
//! - [`Block`] - Fixed-length byte buffer viewed through bounds-checked slices
//! - [`BlockAllocator`] - Allocates and disposes blocks
//! - [`Region`] - Validated window inside a block
//! - [`BlockHash`] - 32-byte content digest

mod alloc;
mod data;
mod hash;
mod region;

pub(crate) use alloc::fill_new_block;
pub use alloc::{BlockAllocator, HeapAllocator};
pub use data::{Block, HeapBlock};
pub use hash::BlockHash;
pub use region::Region;
