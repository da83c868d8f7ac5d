//! Decoding of a complete splice_info_section.

use crate::bit_reader::BitReader;
use crate::commands::parse_splice_command;
use crate::config::{CrcMode, DecodeOptions};
use crate::crc::calculate_crc;
use crate::cue::Cue;
use crate::descriptors::parse_splice_descriptor;
use crate::error::{DecodeError, DecodeResult};
use crate::info::parse_info_section;
use tracing::{debug, trace, warn};

/// Header bytes up to and including `splice_command_type`.
const HEADER_LEN: usize = 14;

/// `splice_command_length` value legacy encoders use for "not specified".
const UNSPECIFIED_COMMAND_LENGTH: u16 = 0xFFF;

/// Decodes one cue from `buffer`.
///
/// The section is bounded by `section_length`; bytes after it are ignored.
/// The command is checked against `splice_command_length` and the descriptors
/// against `descriptor_loop_length`. Anything left before the CRC is kept as
/// alignment stuffing.
pub(crate) fn parse_cue(buffer: &[u8], options: &DecodeOptions) -> DecodeResult<Cue> {
    let mut header_reader = BitReader::new(buffer);
    let info_section = parse_info_section(&mut header_reader)?;

    let section_end = 3 + info_section.section_length as usize;
    if section_end > buffer.len() {
        return Err(DecodeError::SectionLengthExceedsBuffer {
            declared: info_section.section_length as usize,
            available: buffer.len().saturating_sub(3),
        });
    }
    let crc_offset = section_end.saturating_sub(4).max(HEADER_LEN);
    if crc_offset + 4 > section_end {
        return Err(DecodeError::BufferUnderflow {
            needed: (HEADER_LEN + 4) * 8,
            offset: 0,
            available: section_end * 8,
        });
    }

    let mut reader = BitReader::new(&buffer[..crc_offset]);
    reader.skip_bits(HEADER_LEN * 8)?;

    let command_start = reader.offset();
    let splice_command = parse_splice_command(
        &mut reader,
        info_section.splice_command_type,
        info_section.splice_command_length,
    )?;
    let decoded = (reader.offset() - command_start) / 8;
    let declared = info_section.splice_command_length as usize;
    debug!(
        command = splice_command.name(),
        declared, decoded, "decoded splice command"
    );
    if info_section.splice_command_length != UNSPECIFIED_COMMAND_LENGTH {
        if decoded > declared {
            return Err(DecodeError::CommandOverrun { declared, decoded });
        }
        if decoded < declared {
            warn!(
                declared,
                decoded, "splice command shorter than splice_command_length; skipping the rest"
            );
            reader.skip_bits((declared - decoded) * 8)?;
        }
    }

    let descriptor_loop_length = reader.read_bits(16)? as u16;
    let declared_loop = descriptor_loop_length as usize;
    let mut splice_descriptors = Vec::new();
    let mut loop_bytes = 0;
    while loop_bytes < declared_loop {
        let (descriptor, size) = parse_splice_descriptor(&mut reader)?;
        trace!(tag = u8::from(descriptor.tag()), size, "decoded splice descriptor");
        splice_descriptors.push(descriptor);
        loop_bytes += size;
    }
    if loop_bytes != declared_loop {
        return Err(DecodeError::DescriptorLoopOverrun {
            declared: declared_loop,
            actual: loop_bytes,
        });
    }

    let alignment_stuffing = reader.read_bytes(reader.remaining_bits() / 8)?;

    let crc_bytes = &buffer[crc_offset..crc_offset + 4];
    let crc_32 = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    let calculated = calculate_crc(&buffer[..crc_offset]);
    if calculated != crc_32 {
        match options.crc_mode {
            CrcMode::Strict => {
                return Err(DecodeError::CrcMismatch {
                    stored: crc_32,
                    calculated,
                });
            }
            CrcMode::Lenient => warn!(
                stored = format_args!("{crc_32:#010x}"),
                calculated = format_args!("{calculated:#010x}"),
                "CRC-32 mismatch"
            ),
        }
    }

    Ok(Cue {
        info_section,
        splice_command,
        descriptor_loop_length,
        splice_descriptors,
        alignment_stuffing,
        crc_32,
        packet_data: None,
    })
}
