#![no_main]
use libfuzzer_sys::fuzz_target;
use snescodec::brr::{self, PredictorState};

fuzz_target!(|data: &[u8]| {
    // Decode with a zeroed predictor and with one seeded from the input,
    // including histories outside the 15-bit range a decode can produce.
    let _ = brr::decode(data, PredictorState::default());

    if data.len() >= 4 {
        let state = PredictorState {
            old: i16::from_le_bytes([data[0], data[1]]),
            older: i16::from_le_bytes([data[2], data[3]]),
        };
        let _ = brr::decode(&data[4..], state);
    }
});
