#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    rtfde_fuzz::fuzz_string_diff(data);
});
