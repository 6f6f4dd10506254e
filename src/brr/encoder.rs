// BRR encoding by exhaustive parameter search.
//
// Each block tries every (filter, shift) pair, quantizing one sample at a
// time with the decoder's exact reconstruction arithmetic. Enumeration
// order is part of the output contract: filters ascend, shifts run 12
// down to 1, nibble candidates are scanned zero-outward, and every tie
// keeps the first candidate found, so identical input always produces
// identical bytes.
//
// Lossless mode abandons a pair at the first sample it cannot hit
// exactly and fails the block when no pair completes; best-effort mode
// always commits the lowest-error pair.

use log::trace;

use super::block::{
    BLOCK_BYTES, BLOCK_SAMPLES, BlockFlags, BlockHeader, PredictorState, filter_prediction,
    saturate_wrap, shifted_residual,
};

// ---------------------------------------------------------------------------
// Options and errors
// ---------------------------------------------------------------------------

/// Configuration for the block encoder.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Set the loop flag on every emitted block header.
    pub loop_enabled: bool,
    /// Predictor history seeding the first block.
    pub initial_state: PredictorState,
    /// Require exact reconstruction; fail a block instead of approximating.
    pub lossless: bool,
    /// Block index of the loop restart point. Like the first block, it is
    /// coded with filter 0 only, so playback can re-enter it without
    /// history.
    pub loop_block: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            loop_enabled: false,
            initial_state: PredictorState::default(),
            lossless: true,
            loop_block: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Input length is not a whole number of blocks.
    #[error("sample count {len} is not a multiple of 16")]
    InvalidBlockLength { len: usize },
    /// Lossless mode found no (filter, shift) pair covering a block.
    #[error("no parameter pair encodes block {block} exactly")]
    EncodingFailure { block: usize },
}

// ---------------------------------------------------------------------------
// Per-pair trial
// ---------------------------------------------------------------------------

/// Quantizer candidates in priority order, zero first then outward by
/// magnitude. Squared-error ties keep the earlier candidate.
const NIBBLE_CANDIDATES: [i32; 16] = [0, 1, -1, 2, -2, 3, -3, 4, -4, 5, -5, 6, -6, 7, -7, -8];

/// A completed (filter, shift) trial for one block.
struct PairOutcome {
    error: u64,
    /// Chosen residuals as two's-complement low nibbles, one per sample.
    nibbles: [u8; BLOCK_SAMPLES],
    final_state: PredictorState,
}

/// Quantize one block against a single (filter, shift) pair.
///
/// Returns `None` when lossless mode abandons the pair at a sample it
/// cannot represent exactly.
fn try_pair(
    block: &[i16],
    filter: u8,
    shift: u8,
    start: PredictorState,
    lossless: bool,
) -> Option<PairOutcome> {
    let mut state = start;
    let mut error = 0u64;
    let mut nibbles = [0u8; BLOCK_SAMPLES];

    for (slot, &sample) in nibbles.iter_mut().zip(block) {
        let prediction = filter_prediction(filter, state);
        let target = i32::from(sample) >> 1;

        let mut best_error = i64::MAX;
        let mut best_nibble = 0i32;
        let mut best_value = 0i16;
        for &nibble in &NIBBLE_CANDIDATES {
            let value = saturate_wrap(shifted_residual(nibble, shift) + prediction);
            let diff = i64::from(target) - i64::from(value);
            let e = diff * diff;
            if e < best_error {
                best_error = e;
                best_nibble = nibble;
                best_value = value;
                if e == 0 {
                    break;
                }
            }
        }

        if lossless && best_error != 0 {
            return None;
        }
        error += best_error as u64;
        *slot = (best_nibble & 0xF) as u8;
        state.advance(best_value);
    }

    Some(PairOutcome {
        error,
        nibbles,
        final_state: state,
    })
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode samples into a block stream. The sample count must be a
/// multiple of 16. The final block carries the end flag, so the output
/// decodes back without any out-of-band length.
pub fn encode(
    samples: &[i16],
    loop_enabled: bool,
    initial_state: PredictorState,
    lossless: bool,
) -> Result<Vec<u8>, EncodeError> {
    encode_with_options(
        samples,
        EncodeOptions {
            loop_enabled,
            initial_state,
            lossless,
            loop_block: 0,
        },
    )
}

/// Like [`encode`], with every knob exposed.
pub fn encode_with_options(samples: &[i16], options: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    if samples.len() % BLOCK_SAMPLES != 0 {
        return Err(EncodeError::InvalidBlockLength { len: samples.len() });
    }

    let loop_flag = if options.loop_enabled {
        BlockFlags::LOOP
    } else {
        BlockFlags::empty()
    };
    let block_count = samples.len() / BLOCK_SAMPLES;
    let mut output = Vec::with_capacity(block_count * BLOCK_BYTES);
    let mut state = options.initial_state;

    for (block, chunk) in samples.chunks_exact(BLOCK_SAMPLES).enumerate() {
        let mut flags = loop_flag;
        if block + 1 == block_count {
            flags |= BlockFlags::END;
        }

        // Silence shortcut: an all-zero block is emitted verbatim and the
        // search skipped. The predictor history is left as it was.
        if chunk.iter().all(|&s| s == 0) {
            output.push(BlockHeader {
                shift: 0,
                filter: 0,
                flags,
            }
            .to_byte());
            output.extend([0u8; BLOCK_BYTES - 1]);
            continue;
        }

        let mut best: Option<(PairOutcome, BlockHeader)> = None;
        for filter in 0..4u8 {
            // No history exists at the stream head or the loop restart
            // point; only filter 0 may be coded there.
            if filter != 0 && (block == 0 || block == options.loop_block) {
                continue;
            }
            for shift in (1..=12u8).rev() {
                let Some(outcome) = try_pair(chunk, filter, shift, state, options.lossless) else {
                    continue;
                };
                if best.as_ref().is_none_or(|(b, _)| outcome.error < b.error) {
                    best = Some((outcome, BlockHeader { shift, filter, flags }));
                }
            }
        }

        let (outcome, header) = best.ok_or(EncodeError::EncodingFailure { block })?;
        trace!(
            "block {block}: filter {} shift {} error {}",
            header.filter, header.shift, outcome.error
        );
        output.push(header.to_byte());
        for pair in outcome.nibbles.chunks_exact(2) {
            output.push(pair[0] << 4 | pair[1]);
        }
        state = outcome.final_state;
    }

    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
