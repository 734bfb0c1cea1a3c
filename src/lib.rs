//! blockcopy
//!
//! Bounded-buffer streaming copies between byte streams and fixed-size
//! in-memory blocks.
//!
//! `blockcopy` moves raw bytes between storage (files or any
//! [`std::io::Read`]/[`std::io::Write`]) and a fixed-length [`Block`]. Every
//! copy walks its region through a small per-thread scratch buffer, so memory
//! use per call stays bounded no matter how large the block is.
//!
//! The crate intentionally:
//! - does NOT interpret the bytes it moves
//! - does NOT retry failed reads or writes
//! - does NOT spawn threads
//!
//! It only does one thing: **Stream bytes ⇄ block**
//!
//! # Region copies
//!
//! ```
//! use blockcopy::{copy_block_into_stream, copy_stream_into_block};
//! use std::io::Cursor;
//!
//! let mut block = vec![0u8; 64];
//! let copied = copy_stream_into_block(&mut Cursor::new(b"payload"), &mut block, 16, 7)?;
//! assert_eq!(copied, 7);
//!
//! let mut out = Vec::new();
//! copy_block_into_stream(&mut out, &block, 16, 7)?;
//! assert_eq!(out, b"payload");
//! # Ok::<(), blockcopy::BlockError>(())
//! ```
//!
//! # Whole files
//!
//! ```no_run
//! use blockcopy::{Block, read_file, write_file};
//!
//! // Allocates the next power of two at or above the file length
//! let block = read_file("data.bin", true)?;
//! println!("block of {} bytes", block.len());
//!
//! write_file("copy.bin", &block)?;
//! # Ok::<(), blockcopy::BlockError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use blockcopy::copy_async_reader_into_block;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(mut reader: R) -> Result<(), blockcopy::BlockError> {
//!     let mut block = vec![0u8; 4096];
//!     let copied = copy_async_reader_into_block(&mut reader, &mut block, 0, 4096).await?;
//!     println!("copied {}", copied);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod config;
mod copier;
mod error;
mod file;
mod util;

mod buffer; // internal (thread-local reuse)
mod hash; // internal blake3 impl

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface (intentionally tiny)
//

pub use block::{Block, BlockAllocator, BlockHash, HeapAllocator, HeapBlock, Region};
pub use buffer::SCRATCH_CAPACITY;
pub use config::IoConfig;
pub use copier::{copy_block_into_stream, copy_stream_into_block};
pub use error::BlockError;
pub use file::{BlockIo, read_file, write_file, write_file_range};
pub use util::round_up_to_power_of_two;

#[cfg(feature = "async-io")]
pub use async_io::{copy_async_reader_into_block, copy_block_into_async_writer};
