//! Block digest types.

use std::fmt;
use std::hash::{Hash as StdHash, Hasher};

#[cfg(feature = "hash-blake3")]
use super::{Block, Region};
#[cfg(feature = "hash-blake3")]
use crate::error::BlockError;

/// A 32-byte digest of block content (BLAKE3).
///
/// # Example
///
/// ```
/// # #[cfg(feature = "hash-blake3")]
/// # {
/// use blockcopy::{BlockHash, HeapBlock};
///
/// let block = HeapBlock::from(b"hello world".to_vec());
/// let whole = BlockHash::of(&block);
/// let prefix = BlockHash::of_region(&block, 0, 5)?;
///
/// assert_eq!(whole, BlockHash::of(&b"hello world".to_vec()));
/// assert_ne!(whole, prefix);
/// # }
/// # Ok::<(), blockcopy::BlockError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// The size of the hash in bytes.
    pub const SIZE: usize = 32;

    /// Creates a hash from a byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Digest of the whole block.
    #[cfg(feature = "hash-blake3")]
    pub fn of<B: Block + ?Sized>(block: &B) -> Self {
        crate::hash::Blake3Hasher::hash(block.as_slice())
    }

    /// Digest of `len` bytes of the block starting at `offset`.
    ///
    /// The region is validated the same way the copy routines validate it.
    #[cfg(feature = "hash-blake3")]
    pub fn of_region<B: Block + ?Sized>(
        block: &B,
        offset: usize,
        len: usize,
    ) -> Result<Self, BlockError> {
        let region = Region::new(offset, len, block.len())?;
        Ok(crate::hash::Blake3Hasher::hash(
            &block.as_slice()[region.range()],
        ))
    }

    /// Returns the hash as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl StdHash for BlockHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.0);
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
