//! Internal scratch buffer management.
//!
//! This module provides the per-thread relay buffer that bounds memory use
//! during chunked copies. It is an implementation detail and not part of the
//! public API.

mod pool;

pub(crate) use pool::Scratch;
pub use pool::SCRATCH_CAPACITY;
