//! File-level orchestration.
//!
//! - [`BlockIo`] - Allocator + config driving whole-file reads and writes
//! - [`read_file`], [`write_file`], [`write_file_range`] - Heap-block shortcuts

mod block_io;
mod open;

pub use block_io::{BlockIo, read_file, write_file, write_file_range};
