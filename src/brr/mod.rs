// BRR adaptive differential audio codec.
//
// Bit Rate Reduction packs 16 samples into a 9-byte block: a header byte
// selecting a residual scale (shift) and one of four linear predictors
// (filter), then 16 packed 4-bit residuals. Decoding adds each scaled
// residual to the filter's prediction from the two previous samples;
// encoding searches every (filter, shift) pair per block for the lowest
// squared error, exactly reproducible for regression testing.
//
// # Modules
//
// - `block`   — Block layout: header, flags, predictor state, filter taps
// - `decoder` — Stream decoding: decode
// - `encoder` — Exhaustive-search encoding: encode / encode_with_options

pub mod block;
pub mod decoder;
pub mod encoder;

// Re-export key types for convenience.
pub use block::{BLOCK_BYTES, BLOCK_SAMPLES, BlockFlags, BlockHeader, PredictorState};
pub use decoder::{DecodeError, decode};
pub use encoder::{EncodeError, EncodeOptions, encode, encode_with_options};
