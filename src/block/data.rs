//! The Block trait and the heap-backed block type.

use bytes::{Bytes, BytesMut};
use std::fmt;

/// A fixed-length, contiguous byte buffer.
///
/// The length never changes for the lifetime of the block. Copy routines only
/// reach the memory through these bounds-checked views.
pub trait Block {
    /// Immutable view of the whole block.
    fn as_slice(&self) -> &[u8];

    /// Mutable view of the whole block.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Returns the block length in bytes.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the block has no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Block for [u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl Block for Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl Block for Box<[u8]> {
    fn as_slice(&self) -> &[u8] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl Block for BytesMut {
    fn as_slice(&self) -> &[u8] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

/// A zero-initialized block allocated on the heap.
///
/// Produced by [`HeapAllocator`](crate::HeapAllocator). Once filled, the bytes
/// can be handed out as an immutable [`Bytes`] via [`HeapBlock::freeze`].
///
/// # Example
///
/// ```
/// use blockcopy::{Block, HeapBlock};
///
/// let mut block = HeapBlock::zeroed(4);
/// block.as_mut_slice().copy_from_slice(b"abcd");
///
/// assert_eq!(block.len(), 4);
/// assert_eq!(&block.freeze()[..], b"abcd");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HeapBlock {
    data: Vec<u8>,
}

impl HeapBlock {
    /// Creates a zero-filled block of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![0u8; len],
        }
    }

    /// Consumes the block and returns its bytes.
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.data)
    }

    /// Consumes the block and returns the underlying buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl Block for HeapBlock {
    fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl From<Vec<u8>> for HeapBlock {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for HeapBlock {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for HeapBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBlock")
            .field("len", &self.data.len())
            .finish()
    }
}

impl fmt::Display for HeapBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({} bytes)", self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed() {
        let block = HeapBlock::zeroed(16);
        assert_eq!(block.len(), 16);
        assert!(block.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty() {
        let block = HeapBlock::zeroed(0);
        assert!(block.is_empty());
    }

    #[test]
    fn test_freeze() {
        let mut block = HeapBlock::zeroed(5);
        block.as_mut_slice().copy_from_slice(b"hello");
        assert_eq!(block.freeze(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_from_vec() {
        let block = HeapBlock::from(b"test".to_vec());
        assert_eq!(block.as_slice(), b"test");
    }

    #[test]
    fn test_std_blocks() {
        let mut v = vec![1u8, 2, 3];
        assert_eq!(Block::len(&v), 3);
        v.as_mut_slice()[0] = 9;
        assert_eq!(Block::as_slice(&v), &[9, 2, 3]);

        let boxed: Box<[u8]> = vec![0u8; 7].into_boxed_slice();
        assert_eq!(Block::len(&boxed), 7);

        let bytes = BytesMut::zeroed(2);
        assert!(!Block::is_empty(&bytes));
    }

    #[test]
    fn test_display() {
        let block = HeapBlock::zeroed(5);
        assert_eq!(format!("{}", block), "Block(5 bytes)");
        assert!(format!("{:?}", block).contains("len: 5"));
    }
}
