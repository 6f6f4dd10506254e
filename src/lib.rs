//! SNES asset codecs: LZ command-stream decompression and BRR audio.
//!
//! The crate provides:
//! - Byte sources and the bank-aware address cursor (`source`)
//! - The tagged-command asset decompressor (`lz`)
//! - The BRR block audio codec: decoding plus search-based encoding (`brr`)
//!
//! # Quick Start
//!
//! ```
//! use snescodec::brr::{self, PredictorState};
//! use snescodec::lz;
//!
//! // A tiny compressed asset: three literal bytes, then a fill.
//! let stream = [0x02, 0x10, 0x20, 0x30, 0x43, 0xAB, 0xFF];
//! let bytes = lz::decompress(&stream[..], 0, true).unwrap();
//! assert_eq!(bytes, [0x10, 0x20, 0x30, 0xAB, 0xAB, 0xAB, 0xAB]);
//!
//! // Audio round-trips exactly in lossless mode.
//! let samples: Vec<i16> = (-8..8).map(|j| j * 32).collect();
//! let coded = brr::encode(&samples, false, PredictorState::default(), true).unwrap();
//! let decoded = brr::decode(&coded[..], PredictorState::default()).unwrap();
//! assert_eq!(decoded, samples);
//! ```

pub mod brr;
pub mod lz;
pub mod source;
