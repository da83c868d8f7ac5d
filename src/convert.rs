//! Rewriting time signal cues as splice inserts.
//!
//! Some downstream splicers only understand splice inserts. A time signal
//! whose segmentation descriptors mark a break start or end carries the same
//! information, so it can be rewritten in place.

use crate::commands::{SpliceCommand, SpliceInsert, SpliceMode};
use crate::cue::Cue;
use crate::encoding::EncodingResult;
use crate::time::{BreakDuration, SpliceTime};
use tracing::debug;

/// Segmentation types that open a break.
pub const BREAK_START_TYPES: [u8; 11] = [
    0x22, 0x30, 0x32, 0x34, 0x36, 0x38, 0x3a, 0x3c, 0x3e, 0x44, 0x46,
];

/// Segmentation types that close a break.
pub const BREAK_END_TYPES: [u8; 11] = [
    0x23, 0x31, 0x33, 0x35, 0x37, 0x39, 0x3b, 0x3d, 0x3f, 0x45, 0x47,
];

impl Cue {
    /// Replaces a time signal with the equivalent splice insert, re-encodes,
    /// and returns the cue as base64.
    ///
    /// Every segmentation descriptor is checked in order and the last one
    /// that applies decides the result:
    /// - a break start type with a duration gives an out-of-network insert
    ///   with an auto-return break of that duration;
    /// - a break end type gives a return-to-network insert without a duration.
    ///
    /// The insert uses the descriptor's event id and the time signal's PTS.
    /// Any other command, or a time signal without an applicable descriptor,
    /// is left as is and still re-encoded.
    pub fn convert_to_splice_insert(&mut self) -> EncodingResult<String> {
        if let SpliceCommand::TimeSignal(signal) = &self.splice_command {
            let splice_time = signal.splice_time;
            let mut replacement = None;

            for descriptor in self.segmentation_descriptors() {
                let type_id = descriptor.segmentation_type_id;
                if BREAK_START_TYPES.contains(&type_id) {
                    if let Some(duration) = descriptor.segmentation_duration {
                        replacement = Some(splice_insert(
                            descriptor.segmentation_event_id,
                            splice_time,
                            Some(BreakDuration {
                                auto_return: true,
                                duration,
                            }),
                        ));
                    }
                } else if BREAK_END_TYPES.contains(&type_id) {
                    replacement = Some(splice_insert(
                        descriptor.segmentation_event_id,
                        splice_time,
                        None,
                    ));
                }
            }

            if let Some(insert) = replacement {
                debug!(
                    splice_event_id = insert.splice_event_id,
                    out_of_network = insert.out_of_network_indicator,
                    "time signal rewritten as splice insert"
                );
                self.splice_command = SpliceCommand::SpliceInsert(insert);
            }
        }

        self.encode_base64()
    }
}

fn splice_insert(
    splice_event_id: u32,
    splice_time: SpliceTime,
    break_duration: Option<BreakDuration>,
) -> SpliceInsert {
    SpliceInsert {
        splice_event_id,
        splice_event_cancel_indicator: false,
        out_of_network_indicator: break_duration.is_some(),
        splice_immediate_flag: false,
        splice_mode: SpliceMode::Program(splice_time),
        break_duration,
        unique_program_id: 0,
        avail_num: 0,
        avails_expected: 0,
    }
}
