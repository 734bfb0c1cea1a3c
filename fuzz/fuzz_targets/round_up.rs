#![no_main]

use blockcopy::round_up_to_power_of_two;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|value: u64| {
    match round_up_to_power_of_two(value) {
        Ok(0) => assert_eq!(value, 0),
        Ok(rounded) => {
            // Verify: smallest power of two not less than the input
            assert!(rounded.is_power_of_two());
            assert!(rounded >= value);
            assert!(rounded / 2 < value);
        }
        Err(_) => assert!(value > 1 << 63),
    }
});
