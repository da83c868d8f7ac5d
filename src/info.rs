//! The fixed header of a splice_info_section.

use crate::bit_reader::BitReader;
use crate::error::{DecodeError, DecodeResult};
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The only `table_id` a splice_info_section may carry.
pub const TABLE_ID: u8 = 0xFC;

/// Header fields of a splice_info_section, up to and including
/// `splice_command_type`.
///
/// `section_length`, `splice_command_length` and `splice_command_type` are
/// recomputed by every encode; the values here reflect the last decode or
/// encode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfoSection {
    /// This is an 8-bit field. Its value shall be 0xFC.
    pub table_id: u8,
    /// Shall be 0, indicating MPEG short sections.
    pub section_syntax_indicator: bool,
    /// Shall be 0.
    pub private_indicator: bool,
    /// Stream Access Point type created at the signalled point.
    pub sap_type: SapType,
    /// 12 bits; bytes following this field up to and including the CRC.
    pub section_length: u16,
    pub protocol_version: u8,
    pub encrypted_packet: bool,
    pub encryption_algorithm: EncryptionAlgorithm,
    /// 33-bit offset added to every PTS in the command.
    pub pts_adjustment: u64,
    pub cw_index: u8,
    /// 12 bits.
    pub tier: u16,
    /// 12 bits.
    pub splice_command_length: u16,
    pub splice_command_type: u8,
}

impl Default for InfoSection {
    fn default() -> Self {
        Self {
            table_id: TABLE_ID,
            section_syntax_indicator: false,
            private_indicator: false,
            sap_type: SapType::NotSpecified,
            section_length: 0,
            protocol_version: 0,
            encrypted_packet: false,
            encryption_algorithm: EncryptionAlgorithm::NotEncrypted,
            pts_adjustment: 0,
            cw_index: 0,
            tier: 0xFFF,
            splice_command_length: 0,
            splice_command_type: 0,
        }
    }
}

/// Reads the 14 header bytes.
pub(crate) fn parse_info_section(reader: &mut BitReader) -> DecodeResult<InfoSection> {
    let table_id = reader.read_bits(8)? as u8;
    if table_id != TABLE_ID {
        return Err(DecodeError::InvalidTableId(table_id));
    }

    Ok(InfoSection {
        table_id,
        section_syntax_indicator: reader.read_flag()?,
        private_indicator: reader.read_flag()?,
        sap_type: SapType::from(reader.read_bits(2)? as u8),
        section_length: reader.read_bits(12)? as u16,
        protocol_version: reader.read_bits(8)? as u8,
        encrypted_packet: reader.read_flag()?,
        encryption_algorithm: EncryptionAlgorithm::from(reader.read_bits(6)? as u8),
        pts_adjustment: reader.read_bits(33)?,
        cw_index: reader.read_bits(8)? as u8,
        tier: reader.read_bits(12)? as u16,
        splice_command_length: reader.read_bits(12)? as u16,
        splice_command_type: reader.read_bits(8)? as u8,
    })
}

/// Stream Access Point type, as defined in ISO 14496-12 Annex I.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SapType {
    Type1 = 0x00,
    Type2 = 0x01,
    Type3 = 0x02,
    #[default]
    NotSpecified = 0x03,
}

impl From<u8> for SapType {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0x00 => SapType::Type1,
            0x01 => SapType::Type2,
            0x02 => SapType::Type3,
            _ => SapType::NotSpecified,
        }
    }
}

impl From<SapType> for u8 {
    fn from(value: SapType) -> Self {
        value as u8
    }
}

impl Display for SapType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SapType::Type1 => write!(f, "Type 1"),
            SapType::Type2 => write!(f, "Type 2"),
            SapType::Type3 => write!(f, "Type 3"),
            SapType::NotSpecified => write!(f, "Not Specified"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EncryptionAlgorithm {
    #[default]
    NotEncrypted,
    DESECBMode,
    DESCBCMode,
    TripleDESEDE3ECBMode,
    Reserved(u8), // 4-31
    Private(u8),  // 32-63
}

impl From<u8> for EncryptionAlgorithm {
    fn from(value: u8) -> Self {
        match value {
            0x00 => EncryptionAlgorithm::NotEncrypted,
            0x01 => EncryptionAlgorithm::DESECBMode,
            0x02 => EncryptionAlgorithm::DESCBCMode,
            0x03 => EncryptionAlgorithm::TripleDESEDE3ECBMode,
            0x04..=0x1F => EncryptionAlgorithm::Reserved(value),
            _ => EncryptionAlgorithm::Private(value),
        }
    }
}

impl From<EncryptionAlgorithm> for u8 {
    fn from(value: EncryptionAlgorithm) -> Self {
        match value {
            EncryptionAlgorithm::NotEncrypted => 0x00,
            EncryptionAlgorithm::DESECBMode => 0x01,
            EncryptionAlgorithm::DESCBCMode => 0x02,
            EncryptionAlgorithm::TripleDESEDE3ECBMode => 0x03,
            EncryptionAlgorithm::Reserved(value) => value,
            EncryptionAlgorithm::Private(value) => value,
        }
    }
}
