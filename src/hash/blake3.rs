//! BLAKE3-based block hashing implementation.

use crate::block::BlockHash;

/// Computes BLAKE3 digests of block content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl Blake3Hasher {
    /// Hashes data in one shot.
    pub fn hash(data: &[u8]) -> BlockHash {
        BlockHash::new(blake3::hash(data).into())
    }
}
