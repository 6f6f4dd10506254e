// Command-stream execution.
//
// Runs the commands parsed by `command` against a growing output buffer.
// Copies read from the output buffer itself, so earlier commands are the
// dictionary; an overlapping copy is legal and reads bytes it appended
// moments before (the classic way these streams encode long runs).
//
// The consumed-length variant reports how many stream bytes the asset
// occupied, terminator included, masked to the 15-bit span a stream can
// cover inside its bank.

use log::trace;

use crate::source::{AddressCursor, ByteSource};

use super::command::{Command, read_byte, read_command};

// ---------------------------------------------------------------------------
// Decompressor error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecompressError {
    /// The source ran out before the terminator tag.
    #[error("compressed stream truncated at address {address:#08X}")]
    TruncatedStream { address: u32 },
    /// A copy referenced output that has not been produced yet.
    #[error("copy offset {offset:#06X} is beyond the {produced} bytes produced so far")]
    InvalidBackReference { offset: u16, produced: usize },
}

// ---------------------------------------------------------------------------
// Decompression
// ---------------------------------------------------------------------------

/// Decompress the command stream starting at `address`.
///
/// `offset_is_big_endian` selects the byte order of copy offsets; the
/// asset catalogs of some game revisions store them swapped.
pub fn decompress<S: ByteSource + ?Sized>(
    source: &S,
    address: u32,
    offset_is_big_endian: bool,
) -> Result<Vec<u8>, DecompressError> {
    let (output, _) = decompress_with_length(source, address, offset_is_big_endian)?;
    Ok(output)
}

/// Like [`decompress`], also returning the consumed stream length in bytes
/// (terminator included), masked to 15 bits.
pub fn decompress_with_length<S: ByteSource + ?Sized>(
    source: &S,
    address: u32,
    offset_is_big_endian: bool,
) -> Result<(Vec<u8>, u16), DecompressError> {
    let mut cursor = AddressCursor::new(source, address);
    let mut output = Vec::new();

    while let Some(command) = read_command(&mut cursor, offset_is_big_endian)? {
        trace!("{command:?} at {:#08X}", cursor.address());
        match command {
            Command::Literal { len } => {
                for _ in 0..len {
                    output.push(read_byte(&mut cursor)?);
                }
            }
            Command::Memset { value, len } => {
                output.resize(output.len() + len as usize, value);
            }
            Command::Memset16 { values, len } => {
                output.extend(values.iter().copied().cycle().take(len as usize));
            }
            Command::Increment { start, len } => {
                output.extend((0..len).map(|i| start.wrapping_add(i as u8)));
            }
            Command::Copy { offset, len } => {
                // Source and destination advance in lockstep, so checking
                // the first read covers the whole command.
                let start = offset as usize;
                let len = len as usize;
                if start >= output.len() {
                    return Err(DecompressError::InvalidBackReference {
                        offset,
                        produced: output.len(),
                    });
                }
                if start + len <= output.len() {
                    output.extend_from_within(start..start + len);
                } else {
                    // Overlapping copy: grows through its own output.
                    for i in 0..len {
                        let byte = output[start + i];
                        output.push(byte);
                    }
                }
            }
        }
    }

    let length = (cursor.address().wrapping_sub(address) & 0x7FFF) as u16;
    trace!("stream done: {} bytes out, {length} bytes in", output.len());
    Ok((output, length))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
