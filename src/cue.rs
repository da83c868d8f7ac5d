//! The cue: one complete splice_info_section.

use crate::commands::SpliceCommand;
use crate::config::DecodeOptions;
use crate::descriptors::{SegmentationDescriptor, SpliceDescriptor};
use crate::encoding::EncodingResult;
use crate::error::DecodeResult;
use crate::info::InfoSection;
use crate::input::decode_text;
use crate::parser::parse_cue;
use crate::TICKS_PER_SECOND;
use crate::time::PTS_MODULUS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decoded or caller-built SCTE-35 cue.
///
/// Derived fields (`info_section.section_length`,
/// `info_section.splice_command_length`, `info_section.splice_command_type`,
/// `descriptor_loop_length` and `crc_32`) are refreshed by
/// [`Cue::encode`]; after a mutation they are stale until the next encode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cue {
    pub info_section: InfoSection,
    pub splice_command: SpliceCommand,
    pub descriptor_loop_length: u16,
    /// Order is preserved through decode and encode.
    pub splice_descriptors: Vec<SpliceDescriptor>,
    /// Bytes between the descriptor loop and the CRC.
    pub alignment_stuffing: Vec<u8>,
    pub crc_32: u32,
    /// Transport context supplied by a demultiplexer; never read by the codec.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub packet_data: Option<PacketData>,
}

/// Transport stream context of the packet a cue arrived in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PacketData {
    pub pid: u16,
    pub continuity_counter: u8,
    pub pcr: Option<u64>,
    pub pts: Option<u64>,
}

impl Cue {
    /// Creates a cue carrying `splice_command` with default header values and
    /// no descriptors.
    pub fn new(splice_command: SpliceCommand) -> Self {
        Self {
            splice_command,
            ..Default::default()
        }
    }

    pub fn with_packet_data(mut self, packet_data: PacketData) -> Self {
        self.packet_data = Some(packet_data);
        self
    }

    /// Decodes a cue from raw bytes with default options.
    ///
    /// ```rust
    /// use scte35_cue::{Cue, SpliceCommand};
    /// use data_encoding::BASE64;
    ///
    /// let bytes = BASE64.decode(b"/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==").unwrap();
    /// let cue = Cue::decode(&bytes).unwrap();
    /// assert!(matches!(cue.splice_command, SpliceCommand::TimeSignal(_)));
    /// ```
    pub fn decode(bytes: &[u8]) -> DecodeResult<Cue> {
        parse_cue(bytes, &DecodeOptions::default())
    }

    /// Decodes a cue from base64 or hex text with default options.
    pub fn decode_str(text: &str) -> DecodeResult<Cue> {
        Cue::decode_with(text, &DecodeOptions::default())
    }

    /// Decodes a cue from text using `options.input_format` and
    /// `options.crc_mode`.
    pub fn decode_with(text: &str, options: &DecodeOptions) -> DecodeResult<Cue> {
        let bytes = decode_text(text, options.input_format)?;
        parse_cue(&bytes, options)
    }

    /// Decodes a cue from raw bytes using `options.crc_mode`.
    pub fn decode_bytes_with(bytes: &[u8], options: &DecodeOptions) -> DecodeResult<Cue> {
        parse_cue(bytes, options)
    }

    /// Shifts `pts_adjustment` by `seconds` (rounded to 90kHz ticks) and
    /// re-encodes.
    pub fn adjust_pts(&mut self, seconds: f64) -> EncodingResult<Vec<u8>> {
        let ticks = (seconds * TICKS_PER_SECOND as f64).round() as i64;
        self.adjust_pts_ticks(ticks)
    }

    /// Shifts `pts_adjustment` by `ticks`, wrapping modulo 2^33, and
    /// re-encodes.
    pub fn adjust_pts_ticks(&mut self, ticks: i64) -> EncodingResult<Vec<u8>> {
        let adjusted = (self.info_section.pts_adjustment as i128 + ticks as i128)
            .rem_euclid(PTS_MODULUS as i128);
        self.info_section.pts_adjustment = adjusted as u64;
        self.encode()
    }

    /// Segmentation descriptors in loop order.
    pub fn segmentation_descriptors(&self) -> impl Iterator<Item = &SegmentationDescriptor> {
        self.splice_descriptors
            .iter()
            .filter_map(SpliceDescriptor::as_segmentation)
    }
}
