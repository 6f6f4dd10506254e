// Block layout and the shared reconstruction arithmetic.
//
// Both codec directions go through the same primitives: residual scaling,
// the four filter predictions, and the saturate-then-wrap step. The
// encoder's search can only be exact because its reconstruction here is
// bit-identical to the decoder's.

use bitflags::bitflags;

/// Samples coded by one block.
pub const BLOCK_SAMPLES: usize = 16;

/// Encoded size of one block: header byte plus eight packed-nibble bytes.
pub const BLOCK_BYTES: usize = 9;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

bitflags! {
    /// Indicator bits of a block header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: u8 {
        /// Playback loops back into this stream after the final block.
        const LOOP = 0b10;
        /// Final block; decoding stops after its 16 samples.
        const END = 0b01;
    }
}

/// Decoded form of a block's header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Residual scale, 0..=15 on the wire; values above 12 collapse the
    /// residual to its sign (see [`shifted_residual`]).
    pub shift: u8,
    /// Predictor selector, 0..=3.
    pub filter: u8,
    pub flags: BlockFlags,
}

impl BlockHeader {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            shift: byte >> 4,
            filter: (byte >> 2) & 3,
            flags: BlockFlags::from_bits_truncate(byte),
        }
    }

    pub fn to_byte(self) -> u8 {
        self.shift << 4 | self.filter << 2 | self.flags.bits()
    }
}

// ---------------------------------------------------------------------------
// Predictor state
// ---------------------------------------------------------------------------

/// The two most recently decoded samples, in the 15-bit wrapped domain
/// (half the emitted amplitude). Threaded across blocks, and across
/// streams when a caller seeds the next decode with the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredictorState {
    pub old: i16,
    pub older: i16,
}

impl PredictorState {
    /// Shift a newly reconstructed value into the history.
    #[inline]
    pub fn advance(&mut self, value: i16) {
        self.older = self.old;
        self.old = value;
    }
}

// ---------------------------------------------------------------------------
// Reconstruction arithmetic
// ---------------------------------------------------------------------------

/// The prediction a filter contributes, in 32-bit with arithmetic shifts.
/// `filter` is two bits; 3 and above share the last tap set.
#[inline]
pub(crate) fn filter_prediction(filter: u8, state: PredictorState) -> i32 {
    let old = i32::from(state.old);
    let older = i32::from(state.older);
    match filter {
        0 => 0,
        1 => old + (-old >> 4),
        2 => 2 * old + (-3 * old >> 5) - older + (older >> 4),
        _ => 2 * old + (-13 * old >> 6) - older + (3 * older >> 4),
    }
}

/// Scale a signed residual nibble by the header shift. Shifts above 12
/// are degenerate: the nibble collapses to its sign times `1 << 12`.
#[inline]
pub(crate) fn shifted_residual(nibble: i32, shift: u8) -> i32 {
    if shift <= 12 {
        (nibble << shift) >> 1
    } else {
        (nibble >> 3) << 12
    }
}

/// Saturate a reconstructed sum to 16-bit range, then wrap it into the
/// 15-bit storage domain. The order is normative: +0x4000..=0x7FFF wraps
/// negative rather than clipping.
#[inline]
pub(crate) fn saturate_wrap(sum: i32) -> i16 {
    let s = sum.clamp(-0x8000, 0x7FFF);
    ((s & 0x3FFF) - (s & 0x4000)) as i16
}

/// Sign-extend a 4-bit residual.
#[inline]
pub(crate) fn sign_extend_nibble(raw: u8) -> i32 {
    i32::from((raw as i8) << 4 >> 4)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_field_extraction() {
        let header = BlockHeader::from_byte(0xC7);
        assert_eq!(header.shift, 12);
        assert_eq!(header.filter, 1);
        assert_eq!(header.flags, BlockFlags::LOOP | BlockFlags::END);
    }

    #[test]
    fn header_round_trip() {
        let header = BlockHeader {
            shift: 13,
            filter: 3,
            flags: BlockFlags::END,
        };
        assert_eq!(header.to_byte(), 0xDD);
        assert_eq!(BlockHeader::from_byte(0xDD), header);
    }

    #[test]
    fn filter_taps_match_known_values() {
        let state = PredictorState {
            old: 1000,
            older: 500,
        };
        assert_eq!(filter_prediction(0, state), 0);
        assert_eq!(filter_prediction(1, state), 937);
        assert_eq!(filter_prediction(2, state), 1437);
        assert_eq!(filter_prediction(3, state), 1389);
    }

    #[test]
    fn filter_taps_negative_history() {
        // The shifts floor toward negative infinity, so negative history
        // does not mirror the positive case exactly.
        let state = PredictorState {
            old: -1000,
            older: -500,
        };
        assert_eq!(filter_prediction(1, state), -938);
        assert_eq!(filter_prediction(2, state), -1439);
        assert_eq!(filter_prediction(3, state), -1391);
    }

    #[test]
    fn residual_scaling() {
        assert_eq!(shifted_residual(1, 12), 2048);
        assert_eq!(shifted_residual(1, 0), 0);
        assert_eq!(shifted_residual(-1, 0), -1);
        // Degenerate shifts keep only the sign.
        assert_eq!(shifted_residual(-8, 13), -4096);
        assert_eq!(shifted_residual(7, 15), 0);
    }

    #[test]
    fn saturate_then_wrap() {
        assert_eq!(saturate_wrap(0), 0);
        assert_eq!(saturate_wrap(0x3FFF), 0x3FFF);
        assert_eq!(saturate_wrap(0x4000), -0x4000);
        assert_eq!(saturate_wrap(-0x4000), -0x4000);
        // Positive overflow saturates to 0x7FFF first, then wraps to -1.
        assert_eq!(saturate_wrap(0x7FFF), -1);
        assert_eq!(saturate_wrap(123_456), -1);
        // Negative overflow saturates to -0x8000, which wraps to 0.
        assert_eq!(saturate_wrap(-0x8000), 0);
        assert_eq!(saturate_wrap(-123_456), 0);
    }

    #[test]
    fn nibble_sign_extension() {
        assert_eq!(sign_extend_nibble(0x0), 0);
        assert_eq!(sign_extend_nibble(0x7), 7);
        assert_eq!(sign_extend_nibble(0x8), -8);
        assert_eq!(sign_extend_nibble(0xF), -1);
    }

    #[test]
    fn advance_shifts_history() {
        let mut state = PredictorState { old: 3, older: 9 };
        state.advance(-5);
        assert_eq!(state, PredictorState { old: -5, older: 3 });
    }
}
