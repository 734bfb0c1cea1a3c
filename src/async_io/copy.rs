//! Async ingest and emit over `futures-io`.
//!
//! Same validation, window walk, short-read and short-write rules as the
//! synchronous copies in [`crate::copier`]. The scratch buffer is taken when
//! the copy starts and held until it completes, so a task that migrates
//! between threads keeps a single buffer.

use std::future::poll_fn;
use std::io::{self, ErrorKind};
use std::pin::Pin;

use futures_io::{AsyncRead, AsyncWrite};

use crate::block::{Block, Region};
use crate::buffer::{SCRATCH_CAPACITY, Scratch};
use crate::copier::Relay;
use crate::error::BlockError;

async fn read_some<R>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin + ?Sized,
{
    loop {
        match poll_fn(|cx| Pin::new(&mut *reader).poll_read(cx, buf)).await {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

async fn write_all<W>(writer: &mut W, mut buf: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    while !buf.is_empty() {
        match poll_fn(|cx| Pin::new(&mut *writer).poll_write(cx, buf)).await {
            Ok(0) => {
                return Err(io::Error::new(
                    ErrorKind::WriteZero,
                    "failed to write whole buffer",
                ));
            }
            Ok(n) => buf = &buf[n..],
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Copies up to `len` bytes from an async reader into `block` at `offset`.
///
/// Stops when `len` bytes have been copied or the reader reaches end of
/// input. Returns the number of bytes copied.
///
/// # Example
///
/// ```ignore
/// use blockcopy::copy_async_reader_into_block;
/// use tokio_util::compat::TokioAsyncReadCompatExt;
///
/// let mut file = tokio::fs::File::open("data.bin").await?.compat();
/// let mut block = vec![0u8; 4096];
/// let copied = copy_async_reader_into_block(&mut file, &mut block, 0, 4096).await?;
/// ```
pub async fn copy_async_reader_into_block<R, B>(
    reader: &mut R,
    block: &mut B,
    offset: usize,
    len: usize,
) -> Result<usize, BlockError>
where
    R: AsyncRead + Unpin + ?Sized,
    B: Block + ?Sized,
{
    let region = Region::new(offset, len, block.len())?;
    if region.is_empty() {
        return Ok(0);
    }

    let dst = &mut block.as_mut_slice()[region.range()];
    let mut scratch = Scratch::take();
    let mut walk = Relay::new(dst.len(), scratch.capacity());

    while let Some((done, want)) = walk.next_window() {
        let chunk = scratch.window(want);
        let got = read_some(&mut *reader, chunk).await?.min(want);
        dst[done..done + got].copy_from_slice(&chunk[..got]);
        tracing::trace!(offset = offset + done, len = got, "ingested chunk");
        walk.advance(got);
    }
    Ok(walk.done())
}

/// Writes `len` bytes of `block` starting at `offset` to an async writer.
///
/// Every byte must be written; a writer that fails or accepts zero bytes
/// ends the copy with an error.
pub async fn copy_block_into_async_writer<W, B>(
    writer: &mut W,
    block: &B,
    offset: usize,
    len: usize,
) -> Result<(), BlockError>
where
    W: AsyncWrite + Unpin + ?Sized,
    B: Block + ?Sized,
{
    let region = Region::new(offset, len, block.len())?;
    let src = &block.as_slice()[region.range()];

    let mut walk = Relay::new(src.len(), SCRATCH_CAPACITY);

    while let Some((done, want)) = walk.next_window() {
        write_all(&mut *writer, &src[done..done + want]).await?;
        tracing::trace!(offset = offset + done, len = want, "emitted chunk");
        walk.advance(want);
    }
    Ok(())
}
