#![no_main]

use blockcopy::{BlockError, BlockHash, copy_block_into_stream, copy_stream_into_block};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, u16, u16, u16, u8)| {
    let (data, block_len, offset, len, step) = input;
    let (block_len, offset, len) = (block_len as usize, offset as usize, len as usize);
    let step = step as usize + 1;

    // Reader that hands out at most `step` bytes per call
    struct Trickle<'a>(&'a [u8], usize);
    impl std::io::Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.1).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    let mut block = vec![0xA5u8; block_len];
    let result = copy_stream_into_block(&mut Trickle(&data, step), &mut block, offset, len);

    // Verify: bounds are enforced without touching the block
    if offset + len > block_len {
        assert!(matches!(result, Err(BlockError::OutOfRange { .. })));
        assert!(block.iter().all(|&b| b == 0xA5));
        return;
    }

    // Verify: copied count is min(len, available) and bytes outside are untouched
    let copied = result.unwrap();
    assert_eq!(copied, len.min(data.len()));
    assert!(block[..offset].iter().all(|&b| b == 0xA5));
    assert!(block[offset + copied..].iter().all(|&b| b == 0xA5));

    // Verify: emit reproduces the ingested bytes
    let mut out = Vec::new();
    copy_block_into_stream(&mut out, &block, offset, copied).unwrap();
    assert_eq!(out, &data[..copied]);
    assert_eq!(
        BlockHash::of_region(&block, offset, copied).unwrap(),
        BlockHash::of(&out)
    );
});
