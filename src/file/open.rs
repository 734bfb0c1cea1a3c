//! Opening files for exclusive block I/O.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::error::BlockError;

/// How a file is opened for block I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenMode {
    /// Open an existing file for reading.
    ReadExclusive,
    /// Create or truncate a file for writing.
    WriteExclusive,
}

/// Rejects empty paths before any filesystem access.
pub(crate) fn check_path(path: &Path) -> Result<(), BlockError> {
    if path.as_os_str().is_empty() {
        return Err(BlockError::InvalidArgument {
            message: "path must not be empty",
        });
    }
    Ok(())
}

/// Opens `path` in `mode`, taking an exclusive lock when `exclusive` is set.
///
/// A file already locked by another handle fails immediately with
/// [`ErrorKind::WouldBlock`]. Writes only truncate once the lock is held.
pub(crate) fn open(path: &Path, mode: OpenMode, exclusive: bool) -> Result<File, BlockError> {
    check_path(path)?;

    let file = match mode {
        OpenMode::ReadExclusive => File::open(path)?,
        OpenMode::WriteExclusive => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?,
    };

    if exclusive {
        lock(&file)?;
    }
    if mode == OpenMode::WriteExclusive {
        file.set_len(0)?;
    }

    tracing::trace!(path = %path.display(), ?mode, exclusive, "opened file");
    Ok(file)
}

fn lock(file: &File) -> io::Result<()> {
    match file.try_lock() {
        Ok(()) => Ok(()),
        Err(TryLockError::WouldBlock) => Err(io::Error::new(
            ErrorKind::WouldBlock,
            "file is locked by another handle",
        )),
        Err(TryLockError::Error(e)) => Err(e),
    }
}
