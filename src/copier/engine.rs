//! Chunked copy engine - moves a block region through the scratch buffer.
//!
//! Both directions share one window walk (`Relay`) that covers a region in
//! steps of at most [`SCRATCH_CAPACITY`] bytes:
//!
//! - ingest: `Read` → scratch → block, stops early when the reader is exhausted
//! - emit: block → `Write` straight from the block, every byte must be written
//!
//! # Example
//!
//! ```
//! use blockcopy::{copy_block_into_stream, copy_stream_into_block};
//! use std::io::Cursor;
//!
//! let mut block = vec![0u8; 32];
//! let copied = copy_stream_into_block(&mut Cursor::new(b"hello"), &mut block, 8, 16)?;
//! assert_eq!(copied, 5);
//!
//! let mut out = Vec::new();
//! copy_block_into_stream(&mut out, &block, 8, 5)?;
//! assert_eq!(out, b"hello");
//! # Ok::<(), blockcopy::BlockError>(())
//! ```

use std::io::{ErrorKind, Read, Write};

use crate::block::{Block, Region};
use crate::buffer::{SCRATCH_CAPACITY, Scratch};
use crate::error::BlockError;

/// Walks `len` bytes in windows of at most `capacity` bytes.
///
/// Each window is reported as the bytes already moved plus the size of the
/// next window. Recording a window that moved 0 bytes ends the walk. Used by
/// the sync copies through [`relay`] and stepped by hand from async code.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Relay {
    len: usize,
    capacity: usize,
    done: usize,
    stopped: bool,
}

impl Relay {
    pub(crate) fn new(len: usize, capacity: usize) -> Self {
        Self {
            len,
            capacity,
            done: 0,
            stopped: false,
        }
    }

    /// The next `(done, want)` window, or `None` once the walk is over.
    pub(crate) fn next_window(&self) -> Option<(usize, usize)> {
        if self.stopped || self.done >= self.len {
            return None;
        }
        Some((self.done, (self.len - self.done).min(self.capacity)))
    }

    /// Records how many bytes the last window moved.
    pub(crate) fn advance(&mut self, moved: usize) {
        if moved == 0 {
            self.stopped = true;
        }
        self.done += moved;
    }

    /// Total bytes moved so far.
    pub(crate) fn done(&self) -> usize {
        self.done
    }
}

/// Drives `step` over every window of a [`Relay`] and returns the total moved.
pub(crate) fn relay<F>(len: usize, capacity: usize, mut step: F) -> Result<usize, BlockError>
where
    F: FnMut(usize, usize) -> Result<usize, BlockError>,
{
    let mut walk = Relay::new(len, capacity);
    while let Some((done, want)) = walk.next_window() {
        walk.advance(step(done, want)?);
    }
    Ok(walk.done())
}

/// Reads once, retrying reads that were interrupted before any data arrived.
fn read_some<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

/// Copies up to `len` bytes from `reader` into `block` starting at `offset`.
///
/// Bytes pass through the thread's scratch buffer, and only bytes the reader
/// reported as read land in the block. Copying stops when `len` bytes have
/// been copied or the reader returns 0, whichever comes first, so a short
/// stream is not an error. Bytes outside `[offset, offset + len)` are never
/// touched.
///
/// # Errors
///
/// - [`BlockError::OutOfRange`] if the region does not fit in the block,
///   before any read happens
/// - [`BlockError::Io`] if the reader fails
///
/// # Returns
///
/// The number of bytes copied, at most `len`.
pub fn copy_stream_into_block<R, B>(
    reader: &mut R,
    block: &mut B,
    offset: usize,
    len: usize,
) -> Result<usize, BlockError>
where
    R: Read + ?Sized,
    B: Block + ?Sized,
{
    let region = Region::new(offset, len, block.len())?;
    if region.is_empty() {
        return Ok(0);
    }

    let dst = &mut block.as_mut_slice()[region.range()];
    let mut scratch = Scratch::take();
    let capacity = scratch.capacity();

    relay(dst.len(), capacity, |done, want| {
        let chunk = scratch.window(want);
        let got = read_some(&mut *reader, chunk)?.min(want);
        dst[done..done + got].copy_from_slice(&chunk[..got]);
        tracing::trace!(offset = offset + done, len = got, "ingested chunk");
        Ok(got)
    })
}

/// Writes `len` bytes of `block` starting at `offset` to `writer`.
///
/// The region is written in pieces of at most [`SCRATCH_CAPACITY`] bytes,
/// taken directly from the block: nothing is staged in the scratch buffer.
/// Unlike ingest, every byte must be written: a failing or stalled writer
/// stops the copy and the remaining bytes are not written. A zero-length
/// region performs no writes.
///
/// # Errors
///
/// - [`BlockError::OutOfRange`] if the region does not fit in the block,
///   before any write happens
/// - [`BlockError::Io`] if the writer fails or accepts zero bytes
pub fn copy_block_into_stream<W, B>(
    writer: &mut W,
    block: &B,
    offset: usize,
    len: usize,
) -> Result<(), BlockError>
where
    W: Write + ?Sized,
    B: Block + ?Sized,
{
    let region = Region::new(offset, len, block.len())?;
    let src = &block.as_slice()[region.range()];

    relay(src.len(), SCRATCH_CAPACITY, |done, want| {
        writer.write_all(&src[done..done + want])?;
        tracing::trace!(offset = offset + done, len = want, "emitted chunk");
        Ok(want)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Returns at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        reads: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            let n = buf.len().min(self.step).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Records the size of each write call.
    #[derive(Default)]
    struct Recorder {
        data: Vec<u8>,
        writes: Vec<usize>,
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.len());
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 13) as u8).collect()
    }

    #[test]
    fn test_relay_stops_on_zero() {
        let mut calls = Vec::new();
        let total = relay(100, 30, |done, want| {
            calls.push((done, want));
            Ok(if done >= 60 { 0 } else { want })
        })
        .unwrap();
        assert_eq!(total, 60);
        assert_eq!(calls, vec![(0, 30), (30, 30), (60, 30)]);
    }

    #[test]
    fn test_relay_stepped_by_hand() {
        let mut walk = Relay::new(50, 20);
        assert_eq!(walk.next_window(), Some((0, 20)));
        walk.advance(7);
        assert_eq!(walk.next_window(), Some((7, 20)));
        walk.advance(20);
        assert_eq!(walk.next_window(), Some((27, 20)));
        walk.advance(20);
        assert_eq!(walk.next_window(), Some((47, 3)));
        walk.advance(0);
        assert_eq!(walk.next_window(), None);
        assert_eq!(walk.done(), 47);
    }

    #[test]
    fn test_relay_empty() {
        assert_eq!(Relay::new(0, 20).next_window(), None);
    }

    #[test]
    fn test_relay_last_window_is_remainder() {
        let mut windows = Vec::new();
        relay(70, 30, |_, want| {
            windows.push(want);
            Ok(want)
        })
        .unwrap();
        assert_eq!(windows, vec![30, 30, 10]);
    }

    #[test]
    fn test_ingest_full_region() {
        let data = pattern(40_000);
        let mut block = vec![0u8; 50_000];
        let copied =
            copy_stream_into_block(&mut Cursor::new(&data), &mut block, 5_000, data.len()).unwrap();
        assert_eq!(copied, data.len());
        assert_eq!(&block[5_000..45_000], &data[..]);
        assert!(block[..5_000].iter().all(|&b| b == 0));
        assert!(block[45_000..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_ingest_short_stream() {
        let mut block = vec![0xEEu8; 16];
        let copied = copy_stream_into_block(&mut Cursor::new(b"abc"), &mut block, 2, 10).unwrap();
        assert_eq!(copied, 3);
        assert_eq!(&block[2..5], b"abc");
        assert!(block[5..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn test_ingest_partial_reads() {
        let data = pattern(1000);
        let mut reader = Trickle {
            data: &data,
            step: 7,
            reads: 0,
        };
        let mut block = vec![0u8; 1000];
        let copied = copy_stream_into_block(&mut reader, &mut block, 0, 1000).unwrap();
        assert_eq!(copied, 1000);
        assert_eq!(block, data);
        assert_eq!(reader.reads, 1000usize.div_ceil(7));
    }

    #[test]
    fn test_ingest_requests_bounded_windows() {
        let data = pattern(SCRATCH_CAPACITY * 2 + 5);
        let mut reader = Trickle {
            data: &data,
            step: usize::MAX,
            reads: 0,
        };
        let mut block = vec![0u8; data.len()];
        copy_stream_into_block(&mut reader, &mut block, 0, data.len()).unwrap();
        assert_eq!(reader.reads, 3);
    }

    #[test]
    fn test_ingest_zero_len_does_no_io() {
        let mut reader = Trickle {
            data: b"unused",
            step: 1,
            reads: 0,
        };
        let mut block = vec![0u8; 4];
        assert_eq!(copy_stream_into_block(&mut reader, &mut block, 4, 0).unwrap(), 0);
        assert_eq!(reader.reads, 0);
    }

    #[test]
    fn test_ingest_out_of_range_reads_nothing() {
        let mut reader = Trickle {
            data: b"unused",
            step: 1,
            reads: 0,
        };
        let mut block = vec![0u8; 4];
        let err = copy_stream_into_block(&mut reader, &mut block, 2, 3).unwrap_err();
        assert!(matches!(err, BlockError::OutOfRange { .. }));
        assert_eq!(reader.reads, 0);
    }

    #[test]
    fn test_ingest_retries_interrupted() {
        struct Flaky {
            interrupted: bool,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(ErrorKind::Interrupted));
                }
                buf[0] = 42;
                Ok(1)
            }
        }

        let mut block = vec![0u8; 1];
        let copied =
            copy_stream_into_block(&mut Flaky { interrupted: false }, &mut block, 0, 1).unwrap();
        assert_eq!(copied, 1);
        assert_eq!(block[0], 42);
    }

    #[test]
    fn test_ingest_read_error_propagates() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut block = vec![0u8; 8];
        let err = copy_stream_into_block(&mut Broken, &mut block, 0, 8).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_emit_chunks_writes() {
        let data = pattern(SCRATCH_CAPACITY * 2 + 100);
        let mut out = Recorder::default();
        copy_block_into_stream(&mut out, &data, 0, data.len()).unwrap();
        assert_eq!(out.data, data);
        assert_eq!(out.writes, vec![SCRATCH_CAPACITY, SCRATCH_CAPACITY, 100]);
    }

    #[test]
    fn test_emit_sub_range() {
        let data = pattern(100);
        let mut out = Vec::new();
        copy_block_into_stream(&mut out, &data, 10, 20).unwrap();
        assert_eq!(out, &data[10..30]);
    }

    #[test]
    fn test_emit_zero_len_does_no_writes() {
        let mut out = Recorder::default();
        copy_block_into_stream(&mut out, &vec![1u8; 8], 8, 0).unwrap();
        assert!(out.writes.is_empty());
    }

    #[test]
    fn test_emit_out_of_range() {
        let mut out = Recorder::default();
        let err = copy_block_into_stream(&mut out, &vec![1u8; 8], 0, 9).unwrap_err();
        assert!(matches!(err, BlockError::OutOfRange { .. }));
        assert!(out.writes.is_empty());
    }

    #[test]
    fn test_emit_write_zero_is_error() {
        struct Full;

        impl Write for Full {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Ok(0)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = copy_block_into_stream(&mut Full, &vec![1u8; 8], 0, 8).unwrap_err();
        match err {
            BlockError::Io(e) => assert_eq!(e.kind(), ErrorKind::WriteZero),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_through_slices() {
        let data = pattern(3 * SCRATCH_CAPACITY + 17);
        let mut block: Box<[u8]> = vec![0u8; data.len() + 64].into_boxed_slice();
        copy_stream_into_block(&mut &data[..], &mut block, 64, data.len()).unwrap();

        let mut out = Vec::new();
        copy_block_into_stream(&mut out, &block, 64, data.len()).unwrap();
        assert_eq!(out, data);
    }
}
