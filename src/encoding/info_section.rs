//! Encoding of the splice_info_section header.

use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::info::InfoSection;

impl Encodable for InfoSection {
    /// Writes the header as stored. `section_length`,
    /// `splice_command_length` and `splice_command_type` must already be
    /// final; [`Cue::encode`](crate::Cue::encode) sets them before calling this.
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.table_id as u64, 8)?;
        writer.write_flag(self.section_syntax_indicator)?;
        writer.write_flag(self.private_indicator)?;
        writer.write_bits(u8::from(self.sap_type) as u64, 2)?;
        writer.write_bits(self.section_length as u64, 12)?;
        writer.write_bits(self.protocol_version as u64, 8)?;
        writer.write_flag(self.encrypted_packet)?;
        writer.write_bits(u8::from(self.encryption_algorithm) as u64, 6)?;
        writer.write_bits(self.pts_adjustment, 33)?;
        writer.write_bits(self.cw_index as u64, 8)?;
        writer.write_bits(self.tier as u64, 12)?;
        writer.write_bits(self.splice_command_length as u64, 12)?;
        writer.write_bits(self.splice_command_type as u64, 8)?;
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        14
    }
}
