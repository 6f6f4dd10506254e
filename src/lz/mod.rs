// LZ command-stream decompression.
//
// Compressed assets are flat byte streams of tagged commands: literal
// runs, single-byte and two-byte-pattern fills, incrementing fills, and
// back-references into the bytes already produced. A 0xFF tag terminates
// the stream.
//
// # Modules
//
// - `command` — Command token type, tag-byte parsing, CommandIterator
// - `decoder` — Command execution: decompress / decompress_with_length

pub mod command;
pub mod decoder;

// Re-export key types for convenience.
pub use command::{Command, CommandIterator, read_command};
pub use decoder::{DecompressError, decompress, decompress_with_length};
