//! Thread-local scratch buffer used to relay bytes during chunked copies.

use std::cell::RefCell;

/// Capacity of the scratch buffer (16 KiB).
pub const SCRATCH_CAPACITY: usize = 16 * 1024;

/// A fixed-capacity relay buffer.
///
/// Each thread keeps one buffer parked in its pool. [`Scratch::take`] borrows
/// it and `Drop` parks it again, so steady-state copies never allocate. If the
/// parked buffer is already in use (a reader that itself copies into a block
/// on the same thread), a fresh one is allocated for the nested call.
pub struct Scratch {
    data: Box<[u8]>,
}

impl Scratch {
    /// Takes the thread's scratch buffer, creating it on first use.
    pub fn take() -> Self {
        THREAD_SCRATCH.with(|slot| match slot.borrow_mut().take() {
            Some(data) => Self { data },
            None => Self {
                data: vec![0u8; SCRATCH_CAPACITY].into_boxed_slice(),
            },
        })
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Mutable view of the first `len` bytes, clamped to the capacity.
    pub fn window(&mut self, len: usize) -> &mut [u8] {
        let len = len.min(self.data.len());
        &mut self.data[..len]
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        if data.len() != SCRATCH_CAPACITY {
            return;
        }
        // The slot may already be gone during thread teardown.
        let _ = THREAD_SCRATCH.try_with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_none() {
                *slot = Some(data);
            }
        });
    }
}

thread_local! {
    static THREAD_SCRATCH: RefCell<Option<Box<[u8]>>> = const { RefCell::new(None) };
}
