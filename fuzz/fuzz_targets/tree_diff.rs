#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    rtfde_fuzz::fuzz_tree_diff(data);
});
