#![no_main]
use libfuzzer_sys::fuzz_target;
use snescodec::lz;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce errors, never panics.
    let _ = lz::decompress(data, 0, true);
    let _ = lz::decompress(data, 0, false);

    // Nonzero start addresses exercise the bank-skip path.
    if !data.is_empty() {
        let start = u32::from(data[0]) << 8;
        let _ = lz::decompress_with_length(data, start, true);
    }
});
