//! Decoding, mutation and bit-exact re-encoding of SCTE-35 splice cues.
//!
//! A [`Cue`] is one complete `splice_info_section`: the header, a single
//! [`SpliceCommand`], an ordered list of [`SpliceDescriptor`]s and the CRC-32.
//! Cues decode from raw bytes, base64 or hex and encode back to the same
//! forms, recomputing every length and the checksum.
//!
//! ```rust
//! use scte35_cue::{Cue, SpliceCommand, SpliceDescriptor};
//!
//! let mut cue = Cue::decode_str(
//!     "/DA2AAAAAAAA///wBQb+cr0AUAAgAh5DVUVJSAAAjn/PAAGlmbAICAAAAAAsoKGKNAIAmsm2waDx",
//! )
//! .unwrap();
//!
//! assert!(matches!(cue.splice_command, SpliceCommand::TimeSignal(_)));
//! let SpliceDescriptor::Segmentation(segmentation) = &cue.splice_descriptors[0] else {
//!     panic!("expected a segmentation descriptor");
//! };
//! assert_eq!(segmentation.segmentation_type_id, 0x34);
//!
//! // Mutations are followed by a re-encode.
//! cue.adjust_pts(1.5).unwrap();
//! assert_eq!(cue.info_section.pts_adjustment, 135_000);
//! ```

use std::time::Duration;

mod bit_reader;
pub mod commands;
mod config;
pub mod convert;
pub mod crc;
mod cue;
pub mod descriptors;
pub mod encoding;
mod error;
pub mod info;
mod input;
mod parser;
pub mod time;
pub mod upid;

pub use commands::{SpliceCommand, SpliceCommandType, SpliceInsert, TimeSignal};
pub use config::{CrcMode, DecodeOptions, InputFormat};
pub use cue::{Cue, PacketData};
pub use descriptors::{SegmentationDescriptor, SegmentationType, SpliceDescriptor};
pub use encoding::{EncodingError, EncodingResult};
pub use error::{DecodeError, DecodeResult};
pub use info::{EncryptionAlgorithm, InfoSection, SapType};
pub use input::{decode_text, encode_base64, encode_hex};
pub use time::{BreakDuration, SpliceTime};
pub use upid::{SegmentationUpid, SegmentationUpidType};

/// The 90kHz clock every PTS and duration field counts in.
pub const TICKS_PER_SECOND: u64 = 90_000;

pub trait ClockTimeExt {
    fn as_90k(&self) -> u64;
}

impl ClockTimeExt for Duration {
    fn as_90k(&self) -> u64 {
        (self.as_secs_f64() * TICKS_PER_SECOND as f64) as u64
    }
}

/// Seconds rounded up to 6 decimal positions, the precision SCTE-35 examples use.
pub fn ticks_to_secs(value: u64) -> f64 {
    (value as f64 / TICKS_PER_SECOND as f64 * 1_000_000.0).ceil() / 1_000_000.0
}

#[cfg(test)]
mod tests;
