//! Error types for blockcopy.

use std::fmt;

/// Errors that can occur while moving bytes between streams and blocks.
#[derive(Debug)]
pub enum BlockError {
    /// A required argument was missing or empty.
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The requested region does not fit inside the block.
    OutOfRange {
        /// Start of the requested region.
        offset: usize,
        /// Length of the requested region.
        len: usize,
        /// Length of the block the region was checked against.
        block_len: usize,
    },

    /// A size cannot be represented after rounding or conversion.
    Overflow {
        /// The value that could not be represented.
        value: u64,
    },

    /// The allocator could not provide a block of the requested length.
    AllocationFailed {
        /// The requested block length in bytes.
        len: usize,
    },

    /// An I/O error occurred while opening, reading or writing.
    Io(std::io::Error),
}

impl BlockError {
    /// Returns `true` if this error came from the underlying stream or file.
    pub fn is_io(&self) -> bool {
        matches!(self, BlockError::Io(_))
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::InvalidArgument { message } => {
                write!(f, "invalid argument: {}", message)
            }
            BlockError::OutOfRange {
                offset,
                len,
                block_len,
            } => write!(
                f,
                "region out of range: offset {} + len {} exceeds block length {}",
                offset, len, block_len
            ),
            BlockError::Overflow { value } => {
                write!(f, "size overflow: {} cannot be represented", value)
            }
            BlockError::AllocationFailed { len } => {
                write!(f, "failed to allocate block of {} bytes", len)
            }
            BlockError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for BlockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlockError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlockError {
    fn from(e: std::io::Error) -> Self {
        BlockError::Io(e)
    }
}
