// Command tokens and tag-byte parsing.
//
// Each command starts with a tag byte:
//
//   0xFF                — stream terminator
//   ooolllll            — short form: op `ooo` (not 111), length `lllll` + 1
//   111oooll + LL       — extended form: op `ooo`, length `llLL` + 1
//
// so lengths span 1..=32 in the short form and 1..=1024 in the extended
// form. Ops 4..=7 (tag top bit set after widening) are all copies; the
// remaining class bits are ignored there. Fixed-size operands (fill bytes,
// the copy offset) follow the tag and are parsed into the token; a literal
// run's payload stays on the cursor for the executor.

use crate::source::{AddressCursor, ByteSource};

use super::decoder::DecompressError;

/// Tag byte that ends a command stream.
pub const TERMINATOR: u8 = 0xFF;

// ---------------------------------------------------------------------------
// Command token
// ---------------------------------------------------------------------------

/// One parsed decompression command.
///
/// Lengths count output bytes and are always in `1..=1024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Append the next `len` stream bytes verbatim. The payload is not part
    /// of the token; it follows on the cursor.
    Literal { len: u16 },
    /// Append `value` repeated `len` times.
    Memset { value: u8, len: u16 },
    /// Append the two-byte pattern `values` repeated to `len` bytes; an odd
    /// `len` drops the trailing second byte.
    Memset16 { values: [u8; 2], len: u16 },
    /// Append `start`, `start+1`, ... for `len` bytes, wrapping at 0xFF.
    Increment { start: u8, len: u16 },
    /// Append `len` bytes re-read from the output buffer starting at
    /// absolute position `offset`. The copy may overlap bytes it appends
    /// itself.
    Copy { offset: u16, len: u16 },
}

/// Read one byte or report where the stream ran dry.
pub(super) fn read_byte<S: ByteSource + ?Sized>(
    cursor: &mut AddressCursor<'_, S>,
) -> Result<u8, DecompressError> {
    cursor.next().ok_or_else(|| DecompressError::TruncatedStream {
        address: cursor.address(),
    })
}

/// Parse the command at the cursor, consuming its tag and fixed operands.
///
/// Returns `Ok(None)` on the terminator tag. A literal's payload is left
/// unconsumed (see [`Command::Literal`]).
pub fn read_command<S: ByteSource + ?Sized>(
    cursor: &mut AddressCursor<'_, S>,
    offset_is_big_endian: bool,
) -> Result<Option<Command>, DecompressError> {
    let tag = read_byte(cursor)?;
    if tag == TERMINATOR {
        return Ok(None);
    }

    let (op, len) = if tag & 0xE0 == 0xE0 {
        // Extended form: the op moves into bits 4-2 and the length gains a
        // second byte, two high bits from the tag plus the following byte.
        let low = read_byte(cursor)?;
        let op = (tag >> 2) & 7;
        let len = (u16::from(tag & 3) << 8 | u16::from(low)) + 1;
        (op, len)
    } else {
        ((tag >> 5) & 7, u16::from(tag & 0x1F) + 1)
    };

    let command = match op {
        0 => Command::Literal { len },
        1 => {
            let values = [read_byte(cursor)?, read_byte(cursor)?];
            Command::Memset16 { values, len }
        }
        2 => Command::Memset {
            value: read_byte(cursor)?,
            len,
        },
        3 => Command::Increment {
            start: read_byte(cursor)?,
            len,
        },
        // 4..=7: a set top bit selects a copy whatever the low class bits.
        _ => {
            let b0 = read_byte(cursor)?;
            let b1 = read_byte(cursor)?;
            let offset = if offset_is_big_endian {
                u16::from_be_bytes([b0, b1])
            } else {
                u16::from_le_bytes([b0, b1])
            };
            Command::Copy { offset, len }
        }
    };
    Ok(Some(command))
}

// ---------------------------------------------------------------------------
// Command iterator
// ---------------------------------------------------------------------------

/// Iterates the command tokens of a stream without producing output.
///
/// Literal payloads are skipped over. Ends after the terminator tag or the
/// first error; the final [`address`](Self::address) then points just past
/// the stream.
pub struct CommandIterator<'a, S: ?Sized> {
    cursor: AddressCursor<'a, S>,
    offset_is_big_endian: bool,
    done: bool,
}

impl<'a, S: ByteSource + ?Sized> CommandIterator<'a, S> {
    pub fn new(source: &'a S, address: u32, offset_is_big_endian: bool) -> Self {
        Self {
            cursor: AddressCursor::new(source, address),
            offset_is_big_endian,
            done: false,
        }
    }

    /// Address of the next unread stream byte.
    pub fn address(&self) -> u32 {
        self.cursor.address()
    }
}

impl<S: ByteSource + ?Sized> Iterator for CommandIterator<'_, S> {
    type Item = Result<Command, DecompressError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_command(&mut self.cursor, self.offset_is_big_endian) {
            Ok(Some(command)) => {
                if let Command::Literal { len } = command {
                    for _ in 0..len {
                        if self.cursor.next().is_none() {
                            self.done = true;
                            return Some(Err(DecompressError::TruncatedStream {
                                address: self.cursor.address(),
                            }));
                        }
                    }
                }
                Some(Ok(command))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
