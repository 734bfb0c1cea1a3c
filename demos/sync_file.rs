//! File copy example.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/source /path/to/copy

use std::env;

use blockcopy::{Block, BlockIo, IoConfig, SCRATCH_CAPACITY};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let target = args.next().unwrap_or_else(|| format!("{}.copy", source));

    println!("Reading file: {}\n", source);

    // Power-of-two blocks, capped at 1 GiB
    let config = IoConfig::new()
        .with_round_to_power_of_two(true)
        .with_max_block_len(Some(1 << 30));
    let block_io = BlockIo::new(config);

    let file_len = std::fs::metadata(&source)?.len() as usize;
    let block = block_io.read_file(&source)?;

    println!(
        "Rounding:   {}",
        if block_io.config().round_to_power_of_two() { "power of two" } else { "exact" }
    );
    println!("File size:  {} bytes", file_len);
    println!("Block size: {} bytes", block.len());
    println!(
        "Copied in {} scratch windows of up to {} bytes",
        file_len.div_ceil(SCRATCH_CAPACITY),
        SCRATCH_CAPACITY
    );

    #[cfg(feature = "hash-blake3")]
    {
        let hash = blockcopy::BlockHash::of_region(&block, 0, file_len)?;
        println!("Content hash: {}", hash);
    }

    // Only the file's bytes go back out, not the rounded tail
    block_io.write_file_range(&target, &block, 0, file_len)?;
    println!("\nWrote {} bytes to {}", file_len, target);

    Ok(())
}
