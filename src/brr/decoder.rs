// BRR stream decoding.
//
// Walks 9-byte blocks from address 0 of the source, reconstructing each
// sample as scaled residual plus filter prediction, saturated to 16 bits,
// wrapped to 15, doubled on output. Stops after the block whose header
// carries the end flag; the loop flag is playback metadata and is ignored
// here.

use crate::source::{AddressCursor, ByteSource};

use super::block::{
    BLOCK_BYTES, BlockFlags, BlockHeader, PredictorState, filter_prediction, saturate_wrap,
    shifted_residual, sign_extend_nibble,
};

// ---------------------------------------------------------------------------
// Decoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The source ended before any block with the end flag.
    #[error("audio stream truncated at address {address:#08X}")]
    TruncatedStream { address: u32 },
}

fn read_byte<S: ByteSource + ?Sized>(
    cursor: &mut AddressCursor<'_, S>,
) -> Result<u8, DecodeError> {
    cursor.next().ok_or_else(|| DecodeError::TruncatedStream {
        address: cursor.address(),
    })
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a block stream into samples.
///
/// `initial_state` seeds the predictor: zeros for a standalone stream, or
/// the previous stream's final state to continue a sample across streams.
pub fn decode<S: ByteSource + ?Sized>(
    source: &S,
    initial_state: PredictorState,
) -> Result<Vec<i16>, DecodeError> {
    let mut cursor = AddressCursor::new(source, 0);
    let mut state = initial_state;
    let mut samples = Vec::new();

    loop {
        let header = BlockHeader::from_byte(read_byte(&mut cursor)?);
        for _ in 0..BLOCK_BYTES - 1 {
            let packed = read_byte(&mut cursor)?;
            for raw in [packed >> 4, packed & 0xF] {
                let sum = shifted_residual(sign_extend_nibble(raw), header.shift)
                    + filter_prediction(header.filter, state);
                let value = saturate_wrap(sum);
                state.advance(value);
                samples.push(value * 2);
            }
        }
        if header.flags.contains(BlockFlags::END) {
            break;
        }
    }
    Ok(samples)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
