//! Chunked copies between streams and blocks.
//!
//! - [`copy_stream_into_block`] - Ingest from a [`std::io::Read`]
//! - [`copy_block_into_stream`] - Emit to a [`std::io::Write`]

mod engine;

pub(crate) use engine::Relay;
pub use engine::{copy_block_into_stream, copy_stream_into_block};
