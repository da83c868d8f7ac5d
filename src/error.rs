//! Error types for decoding SCTE-35 cues.

use thiserror::Error;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that abort decoding of a cue.
///
/// A decode either yields a complete [`Cue`](crate::Cue) or one of these;
/// partially decoded structures are never exposed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Text input is neither hexadecimal nor base64.
    #[error("Input is neither hexadecimal nor base64 text")]
    InvalidInput,

    /// The first byte is not the splice info section table id.
    #[error("Invalid table_id: expected 0xFC, got 0x{0:02X}")]
    InvalidTableId(u8),

    /// The declared section length runs past the end of the buffer.
    #[error("Section length {declared} exceeds the {available} bytes available")]
    SectionLengthExceedsBuffer {
        /// Bytes required by `section_length` plus the 3 leading header bytes.
        declared: usize,
        /// Bytes present in the buffer.
        available: usize,
    },

    /// A field extends past the end of the data being read.
    #[error("Buffer underflow: needed {needed} bits at bit offset {offset}, {available} available")]
    BufferUnderflow {
        /// Bits requested by the read.
        needed: usize,
        /// Bit offset of the read.
        offset: usize,
        /// Bits left at that offset.
        available: usize,
    },

    /// A known descriptor does not start with the `CUEI` identifier.
    #[error("Invalid descriptor identifier: expected 0x43554549 (CUEI), got 0x{0:08X}")]
    InvalidIdentifier(u32),

    /// The command body consumed more bytes than `splice_command_length` declares.
    #[error("Splice command overrun: declared {declared} bytes, decoded {decoded}")]
    CommandOverrun {
        /// Declared `splice_command_length`.
        declared: usize,
        /// Bytes actually consumed by the command fields.
        decoded: usize,
    },

    /// Descriptor lengths do not add up to `descriptor_loop_length`.
    #[error("Descriptor loop overrun: declared {declared} bytes, descriptors span {actual}")]
    DescriptorLoopOverrun {
        /// Declared `descriptor_loop_length`.
        declared: usize,
        /// Sum of tag, length and payload bytes of the decoded descriptors.
        actual: usize,
    },

    /// The stored CRC-32 differs from the calculated one (strict mode only).
    #[error("CRC mismatch: stored 0x{stored:08X}, calculated 0x{calculated:08X}")]
    CrcMismatch {
        /// Value carried in the message.
        stored: u32,
        /// Value computed over the preceding bytes.
        calculated: u32,
    },
}
