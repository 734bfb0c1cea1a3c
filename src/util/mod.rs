//! Size helpers.
//!
//! Small numeric routines used when deciding how large a block to allocate.

use crate::error::BlockError;

/// Largest input that still has a representable power of two at or above it.
const MAX_ROUNDABLE: u64 = 1 << 63;

/// Rounds `value` up to the nearest power of two.
///
/// Values that already are a power of two are returned unchanged, and `0` is
/// treated as already rounded. Anything above `2^63` has no `u64` power of two
/// at or above it and yields [`BlockError::Overflow`].
///
/// # Example
///
/// ```
/// use blockcopy::round_up_to_power_of_two;
///
/// assert_eq!(round_up_to_power_of_two(5)?, 8);
/// assert_eq!(round_up_to_power_of_two(1024)?, 1024);
/// assert!(round_up_to_power_of_two(u64::MAX).is_err());
/// # Ok::<(), blockcopy::BlockError>(())
/// ```
pub fn round_up_to_power_of_two(value: u64) -> Result<u64, BlockError> {
    if value > MAX_ROUNDABLE {
        return Err(BlockError::Overflow { value });
    }
    if value == 0 || value.is_power_of_two() {
        return Ok(value);
    }

    // Highest set bit, then one position up.
    let high_bit = u64::BITS - 1 - value.leading_zeros();
    Ok(1 << (high_bit + 1))
}

/// Converts a stream length into an in-memory length.
pub(crate) fn to_usize(value: u64) -> Result<usize, BlockError> {
    usize::try_from(value).map_err(|_| BlockError::Overflow { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_small_values() {
        assert_eq!(round_up_to_power_of_two(0).unwrap(), 0);
        assert_eq!(round_up_to_power_of_two(1).unwrap(), 1);
        assert_eq!(round_up_to_power_of_two(2).unwrap(), 2);
        assert_eq!(round_up_to_power_of_two(3).unwrap(), 4);
        assert_eq!(round_up_to_power_of_two(5).unwrap(), 8);
    }

    #[test]
    fn test_round_around_powers() {
        assert_eq!(round_up_to_power_of_two(1023).unwrap(), 1024);
        assert_eq!(round_up_to_power_of_two(1024).unwrap(), 1024);
        assert_eq!(round_up_to_power_of_two(1025).unwrap(), 2048);
        assert_eq!(round_up_to_power_of_two(20_000).unwrap(), 32_768);
    }

    #[test]
    fn test_round_upper_domain() {
        assert_eq!(round_up_to_power_of_two(1 << 63).unwrap(), 1 << 63);
        assert_eq!(round_up_to_power_of_two((1 << 62) + 1).unwrap(), 1 << 63);

        for value in [(1u64 << 63) + 1, u64::MAX - 1, u64::MAX] {
            match round_up_to_power_of_two(value) {
                Err(BlockError::Overflow { value: v }) => assert_eq!(v, value),
                other => panic!("expected overflow for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_round_matches_std_for_nonzero() {
        for value in 1..5000u64 {
            assert_eq!(
                round_up_to_power_of_two(value).unwrap(),
                value.next_power_of_two()
            );
        }
    }

    #[test]
    fn test_to_usize() {
        assert_eq!(to_usize(42).unwrap(), 42);
    }
}
