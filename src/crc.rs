//! CRC-32 checksum of SCTE-35 messages.
//!
//! SCTE-35 uses the MPEG-2 CRC-32 (polynomial 0x04C11DB7, no reflection, no
//! final XOR) computed over every byte of the section preceding `CRC_32`.

use crate::error::{DecodeError, DecodeResult};
use crc::{CRC_32_MPEG_2, Crc};

/// MPEG-2 CRC-32 algorithm instance.
pub const MPEG_2: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

/// Calculates the CRC-32 of `data`.
pub fn calculate_crc(data: &[u8]) -> u32 {
    MPEG_2.checksum(data)
}

/// Returns true if the CRC-32 of `data` equals `expected_crc`.
pub fn validate_crc(data: &[u8], expected_crc: u32) -> bool {
    calculate_crc(data) == expected_crc
}

/// Validates the CRC-32 stored in the last 4 bytes of a complete message.
///
/// # Example
///
/// ```rust
/// use scte35_cue::crc::validate_message_crc;
/// use data_encoding::BASE64;
///
/// let base64_message = "/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==";
/// let buffer = BASE64.decode(base64_message.as_bytes()).unwrap();
///
/// assert_eq!(validate_message_crc(&buffer), Ok(true));
/// ```
pub fn validate_message_crc(buffer: &[u8]) -> DecodeResult<bool> {
    let Some(split) = buffer.len().checked_sub(4) else {
        return Err(DecodeError::BufferUnderflow {
            needed: 32,
            offset: 0,
            available: buffer.len() * 8,
        });
    };
    let (data, crc_bytes) = buffer.split_at(split);
    let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    Ok(validate_crc(data, stored_crc))
}
