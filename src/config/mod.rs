//! Configuration for whole-file and whole-stream block I/O.
//!
//! [`IoConfig`] controls how [`BlockIo`](crate::BlockIo) sizes the blocks it
//! allocates and how it opens files.
//!
//! # Example
//!
//! ```
//! use blockcopy::IoConfig;
//!
//! // Allocate power-of-two blocks, cap them at 1 MiB
//! let config = IoConfig::default()
//!     .with_round_to_power_of_two(true)
//!     .with_max_block_len(Some(1024 * 1024));
//!
//! assert!(config.round_to_power_of_two());
//! assert!(config.exclusive());
//! ```

use crate::error::BlockError;
use crate::util::round_up_to_power_of_two;

/// Configuration for block I/O.
///
/// - `round_to_power_of_two` - Allocate the next power of two at or above the
///   source length. Only the source bytes are filled; the tail stays zeroed.
/// - `exclusive` - Take an exclusive lock on files right after opening them.
/// - `max_block_len` - Refuse reads whose allocated block would be larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoConfig {
    round_to_power_of_two: bool,
    exclusive: bool,
    max_block_len: Option<usize>,
}

impl IoConfig {
    /// Creates the default configuration: exact-size blocks, exclusive
    /// access, no size cap.
    pub const fn new() -> Self {
        Self {
            round_to_power_of_two: false,
            exclusive: true,
            max_block_len: None,
        }
    }

    /// Sets whether allocated blocks are rounded up to a power of two.
    pub fn with_round_to_power_of_two(mut self, round: bool) -> Self {
        self.round_to_power_of_two = round;
        self
    }

    /// Sets whether files are locked exclusively while in use.
    ///
    /// Disable this on filesystems that do not support locking.
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Sets the largest block a read may allocate.
    pub fn with_max_block_len(mut self, max: Option<usize>) -> Self {
        self.max_block_len = max;
        self
    }

    /// Returns whether blocks are rounded up to a power of two.
    pub fn round_to_power_of_two(&self) -> bool {
        self.round_to_power_of_two
    }

    /// Returns whether files are locked exclusively.
    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    /// Returns the block size cap, if any.
    pub fn max_block_len(&self) -> Option<usize> {
        self.max_block_len
    }

    /// Decides the block length to allocate for `source_len` bytes.
    ///
    /// # Errors
    ///
    /// - [`BlockError::Overflow`] if rounding or the conversion to `usize`
    ///   is not representable
    /// - [`BlockError::InvalidArgument`] if the result exceeds `max_block_len`
    pub fn block_len_for(&self, source_len: u64) -> Result<usize, BlockError> {
        let len = if self.round_to_power_of_two {
            round_up_to_power_of_two(source_len)?
        } else {
            source_len
        };
        let len = crate::util::to_usize(len)?;

        match self.max_block_len {
            Some(max) if len > max => Err(BlockError::InvalidArgument {
                message: "source exceeds the configured maximum block length",
            }),
            _ => Ok(len),
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self::new()
    }
}
