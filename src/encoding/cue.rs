//! The five-pass cue encoder.

use crate::crc::calculate_crc;
use crate::cue::Cue;
use crate::encoding::error::check_width;
use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::input::{encode_base64, encode_hex};
use tracing::debug;

/// `table_id` through `splice_command_type`, minus the 3 bytes that precede
/// `section_length`'s coverage.
const SECTION_HEADER_OVERHEAD: usize = 11;

impl Cue {
    /// Encodes the cue and refreshes every derived field.
    ///
    /// The header depends on the size of everything after it, so encoding
    /// runs in order:
    /// 1. the command, giving `splice_command_length` and `splice_command_type`;
    /// 2. each descriptor, giving the loop bytes and `descriptor_loop_length`;
    /// 3. `section_length` = 11 + command + 2 + loop + stuffing + 4;
    /// 4. the header with those values;
    /// 5. header, command, loop length, loop and stuffing, then the CRC-32 of
    ///    all of it.
    pub fn encode(&mut self) -> EncodingResult<Vec<u8>> {
        // 1
        let command = self.splice_command.encode_to_vec()?;
        let splice_command_length = check_width("splice_command_length", command.len(), 12)?;
        self.info_section.splice_command_length = splice_command_length as u16;
        self.info_section.splice_command_type = self.splice_command.command_type().into();

        // 2
        let mut descriptor_loop = BitWriter::new();
        for descriptor in &self.splice_descriptors {
            descriptor.encode(&mut descriptor_loop)?;
        }
        let descriptor_loop = descriptor_loop.finish();
        let descriptor_loop_length =
            check_width("descriptor_loop_length", descriptor_loop.len(), 16)?;
        self.descriptor_loop_length = descriptor_loop_length as u16;

        // 3
        let section_length = SECTION_HEADER_OVERHEAD
            + command.len()
            + 2
            + descriptor_loop.len()
            + self.alignment_stuffing.len()
            + 4;
        self.info_section.section_length = check_width("section_length", section_length, 12)? as u16;

        // 4
        let header = self.info_section.encode_to_vec()?;

        // 5
        let mut message = Vec::with_capacity(3 + section_length);
        message.extend_from_slice(&header);
        message.extend_from_slice(&command);
        message.extend_from_slice(&(self.descriptor_loop_length).to_be_bytes());
        message.extend_from_slice(&descriptor_loop);
        message.extend_from_slice(&self.alignment_stuffing);
        self.crc_32 = calculate_crc(&message);
        message.extend_from_slice(&self.crc_32.to_be_bytes());

        debug!(
            command = self.splice_command.name(),
            section_length,
            descriptor_loop_length,
            "encoded cue"
        );
        Ok(message)
    }

    /// Encodes the cue as standard base64.
    pub fn encode_base64(&mut self) -> EncodingResult<String> {
        Ok(encode_base64(&self.encode()?))
    }

    /// Encodes the cue as `0x`-prefixed lowercase hex.
    pub fn encode_hex(&mut self) -> EncodingResult<String> {
        Ok(encode_hex(&self.encode()?))
    }
}
