//! Trait definitions for encodable types.

use super::error::EncodingResult;
use super::writer::BitWriter;

/// Trait for types that can be encoded to SCTE-35 binary format.
pub trait Encodable {
    /// Encode the structure to binary SCTE-35 format.
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()>;

    /// Calculate the encoded size in bytes.
    ///
    /// This returns the exact number of bytes `encode` writes and is used
    /// for pre-allocating buffers.
    fn encoded_size(&self) -> usize;

    /// Convenience method to encode to a new byte vector.
    fn encode_to_vec(&self) -> EncodingResult<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.encoded_size());
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }
}
