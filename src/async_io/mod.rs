//! Async chunked copies.
//!
//! This module provides the ingest and emit copies over the
//! `futures-io::AsyncRead`/`AsyncWrite` traits, making them runtime-agnostic
//! and compatible with tokio, async-std, smol, and other async runtimes.
//!
//! - [`copy_async_reader_into_block`] - Async ingest
//! - [`copy_block_into_async_writer`] - Async emit
//!
//! This module requires the `async-io` feature to be enabled.

mod copy;

pub use copy::{copy_async_reader_into_block, copy_block_into_async_writer};
