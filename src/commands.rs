//! Splice commands and their decoders.
//!
//! A cue carries exactly one command, selected by `splice_command_type`.
//! Each variant of [`SpliceCommand`] holds only the fields meaningful for that
//! command; presence flags on the wire are derived from `Option`s and enums.

use crate::bit_reader::BitReader;
use crate::error::{DecodeError, DecodeResult};
use crate::time::{BreakDuration, SpliceTime, parse_break_duration, parse_splice_time};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric discriminator of a splice command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceCommandType {
    SpliceNull,
    SpliceSchedule,
    SpliceInsert,
    TimeSignal,
    BandwidthReservation,
    PrivateCommand,
    Reserved(u8),
}

impl From<u8> for SpliceCommandType {
    fn from(value: u8) -> SpliceCommandType {
        match value {
            0x00 => SpliceCommandType::SpliceNull,
            0x04 => SpliceCommandType::SpliceSchedule,
            0x05 => SpliceCommandType::SpliceInsert,
            0x06 => SpliceCommandType::TimeSignal,
            0x07 => SpliceCommandType::BandwidthReservation,
            0xff => SpliceCommandType::PrivateCommand,
            _ => SpliceCommandType::Reserved(value),
        }
    }
}

impl From<SpliceCommandType> for u8 {
    fn from(value: SpliceCommandType) -> u8 {
        match value {
            SpliceCommandType::SpliceNull => 0x00,
            SpliceCommandType::SpliceSchedule => 0x04,
            SpliceCommandType::SpliceInsert => 0x05,
            SpliceCommandType::TimeSignal => 0x06,
            SpliceCommandType::BandwidthReservation => 0x07,
            SpliceCommandType::PrivateCommand => 0xff,
            SpliceCommandType::Reserved(value) => value,
        }
    }
}

/// The splice command carried by a cue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum SpliceCommand {
    /// Null command (0x00), no payload.
    SpliceNull,
    /// Splice schedule command (0x04).
    SpliceSchedule(SpliceSchedule),
    /// Splice insert command (0x05).
    SpliceInsert(SpliceInsert),
    /// Time signal command (0x06).
    TimeSignal(TimeSignal),
    /// Bandwidth reservation command (0x07), no payload.
    BandwidthReservation,
    /// Private command (0xFF).
    PrivateCommand(PrivateCommand),
    /// Any other command type; the body is kept verbatim.
    Unknown {
        /// The `splice_command_type` value.
        command_type: u8,
        /// Raw command bytes.
        data: Vec<u8>,
    },
}

impl Default for SpliceCommand {
    fn default() -> Self {
        SpliceCommand::SpliceNull
    }
}

impl SpliceCommand {
    /// The discriminator written as `splice_command_type`.
    pub fn command_type(&self) -> SpliceCommandType {
        match self {
            SpliceCommand::SpliceNull => SpliceCommandType::SpliceNull,
            SpliceCommand::SpliceSchedule(_) => SpliceCommandType::SpliceSchedule,
            SpliceCommand::SpliceInsert(_) => SpliceCommandType::SpliceInsert,
            SpliceCommand::TimeSignal(_) => SpliceCommandType::TimeSignal,
            SpliceCommand::BandwidthReservation => SpliceCommandType::BandwidthReservation,
            SpliceCommand::PrivateCommand(_) => SpliceCommandType::PrivateCommand,
            SpliceCommand::Unknown { command_type, .. } => SpliceCommandType::from(*command_type),
        }
    }

    /// Human-readable command name.
    pub fn name(&self) -> &'static str {
        match self {
            SpliceCommand::SpliceNull => "Splice Null",
            SpliceCommand::SpliceSchedule(_) => "Splice Schedule",
            SpliceCommand::SpliceInsert(_) => "Splice Insert",
            SpliceCommand::TimeSignal(_) => "Time Signal",
            SpliceCommand::BandwidthReservation => "Bandwidth Reservation",
            SpliceCommand::PrivateCommand(_) => "Private Command",
            SpliceCommand::Unknown { .. } => "Unknown",
        }
    }
}

/// Represents a splice schedule command (0x04).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpliceSchedule {
    /// Scheduled events, written after an 8-bit `splice_count`.
    pub events: Vec<ScheduledEvent>,
}

/// One event of a splice schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledEvent {
    pub splice_event_id: u32,
    /// When set, only the event id is on the wire and the other fields are defaults.
    pub splice_event_cancel_indicator: bool,
    pub out_of_network_indicator: bool,
    pub schedule: ScheduleMode,
    pub break_duration: Option<BreakDuration>,
    pub unique_program_id: u16,
    pub avail_num: u8,
    pub avails_expected: u8,
}

/// Program-level or per-component timing of a scheduled event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScheduleMode {
    /// `program_splice_flag` = 1 with its `utc_splice_time`.
    Program { utc_splice_time: u32 },
    /// `program_splice_flag` = 0 with one UTC time per component.
    Components(Vec<ScheduledComponent>),
}

impl Default for ScheduleMode {
    fn default() -> Self {
        ScheduleMode::Program { utc_splice_time: 0 }
    }
}

/// Component entry of a scheduled event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledComponent {
    pub component_tag: u8,
    pub utc_splice_time: u32,
}

impl ScheduledEvent {
    /// Value of the `program_splice_flag` bit.
    pub fn program_splice_flag(&self) -> bool {
        matches!(self.schedule, ScheduleMode::Program { .. })
    }

    /// Value of the `duration_flag` bit.
    pub fn duration_flag(&self) -> bool {
        self.break_duration.is_some()
    }
}

/// Represents a splice insert command (0x05).
///
/// The most commonly used command for ad insertion: it signals the start and
/// end of breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpliceInsert {
    pub splice_event_id: u32,
    /// When set, only the event id is on the wire and the other fields are defaults.
    pub splice_event_cancel_indicator: bool,
    /// Going out of (true) or returning to (false) the network.
    pub out_of_network_indicator: bool,
    /// When set, no splice times are on the wire.
    pub splice_immediate_flag: bool,
    pub splice_mode: SpliceMode,
    pub break_duration: Option<BreakDuration>,
    pub unique_program_id: u16,
    pub avail_num: u8,
    pub avails_expected: u8,
}

impl SpliceInsert {
    /// Value of the `program_splice_flag` bit.
    pub fn program_splice_flag(&self) -> bool {
        matches!(self.splice_mode, SpliceMode::Program(_))
    }

    /// Value of the `duration_flag` bit.
    pub fn duration_flag(&self) -> bool {
        self.break_duration.is_some()
    }

    /// The program-level splice time, if this is a timed program splice.
    pub fn splice_time(&self) -> Option<&SpliceTime> {
        match &self.splice_mode {
            SpliceMode::Program(time) if !self.splice_immediate_flag => Some(time),
            _ => None,
        }
    }
}

/// Program-level or per-component splice of a splice insert.
///
/// Splice times are only on the wire when `splice_immediate_flag` is clear;
/// otherwise they decode as [`SpliceTime::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpliceMode {
    Program(SpliceTime),
    Components(Vec<SpliceInsertComponent>),
}

impl Default for SpliceMode {
    fn default() -> Self {
        SpliceMode::Program(SpliceTime::default())
    }
}

/// Component entry of a splice insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpliceInsertComponent {
    pub component_tag: u8,
    pub splice_time: SpliceTime,
}

/// Represents a time signal command (0x06).
///
/// Usually paired with segmentation descriptors that say what the signalled
/// point means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSignal {
    pub splice_time: SpliceTime,
}

/// Represents a private command (0xFF).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrivateCommand {
    /// 32-bit registered format identifier of the owner.
    pub identifier: u32,
    /// Remaining command bytes.
    pub private_bytes: Vec<u8>,
}

/// Decodes the command body selected by `splice_command_type`.
///
/// `splice_command_length` bounds variable-length bodies (private and unknown
/// commands).
pub(crate) fn parse_splice_command(
    reader: &mut BitReader,
    splice_command_type: u8,
    splice_command_length: u16,
) -> DecodeResult<SpliceCommand> {
    let length = splice_command_length as usize;
    match SpliceCommandType::from(splice_command_type) {
        SpliceCommandType::SpliceNull => Ok(SpliceCommand::SpliceNull),
        SpliceCommandType::SpliceSchedule => {
            Ok(SpliceCommand::SpliceSchedule(parse_splice_schedule(reader)?))
        }
        SpliceCommandType::SpliceInsert => {
            Ok(SpliceCommand::SpliceInsert(parse_splice_insert(reader)?))
        }
        SpliceCommandType::TimeSignal => Ok(SpliceCommand::TimeSignal(TimeSignal {
            splice_time: parse_splice_time(reader)?,
        })),
        SpliceCommandType::BandwidthReservation => Ok(SpliceCommand::BandwidthReservation),
        SpliceCommandType::PrivateCommand => {
            if length < 4 {
                return Err(DecodeError::BufferUnderflow {
                    needed: 32,
                    offset: reader.offset(),
                    available: length * 8,
                });
            }
            let identifier = reader.read_bits(32)? as u32;
            let private_bytes = reader.read_bytes(length - 4)?;
            Ok(SpliceCommand::PrivateCommand(PrivateCommand {
                identifier,
                private_bytes,
            }))
        }
        SpliceCommandType::Reserved(command_type) => Ok(SpliceCommand::Unknown {
            command_type,
            data: reader.read_bytes(length)?,
        }),
    }
}

fn parse_splice_insert(reader: &mut BitReader) -> DecodeResult<SpliceInsert> {
    let splice_event_id = reader.read_bits(32)? as u32;
    let splice_event_cancel_indicator = reader.read_flag()?;
    reader.skip_bits(7)?;

    if splice_event_cancel_indicator {
        return Ok(SpliceInsert {
            splice_event_id,
            splice_event_cancel_indicator,
            ..Default::default()
        });
    }

    let out_of_network_indicator = reader.read_flag()?;
    let program_splice_flag = reader.read_flag()?;
    let duration_flag = reader.read_flag()?;
    let splice_immediate_flag = reader.read_flag()?;
    reader.skip_bits(4)?;

    let splice_mode = if program_splice_flag {
        let time = if splice_immediate_flag {
            SpliceTime::default()
        } else {
            parse_splice_time(reader)?
        };
        SpliceMode::Program(time)
    } else {
        let component_count = reader.read_bits(8)? as usize;
        let mut components = Vec::with_capacity(component_count);
        for _ in 0..component_count {
            let component_tag = reader.read_bits(8)? as u8;
            let splice_time = if splice_immediate_flag {
                SpliceTime::default()
            } else {
                parse_splice_time(reader)?
            };
            components.push(SpliceInsertComponent {
                component_tag,
                splice_time,
            });
        }
        SpliceMode::Components(components)
    };

    let break_duration = if duration_flag {
        Some(parse_break_duration(reader)?)
    } else {
        None
    };

    Ok(SpliceInsert {
        splice_event_id,
        splice_event_cancel_indicator,
        out_of_network_indicator,
        splice_immediate_flag,
        splice_mode,
        break_duration,
        unique_program_id: reader.read_bits(16)? as u16,
        avail_num: reader.read_bits(8)? as u8,
        avails_expected: reader.read_bits(8)? as u8,
    })
}

fn parse_splice_schedule(reader: &mut BitReader) -> DecodeResult<SpliceSchedule> {
    let splice_count = reader.read_bits(8)? as usize;
    let mut events = Vec::with_capacity(splice_count);

    for _ in 0..splice_count {
        let splice_event_id = reader.read_bits(32)? as u32;
        let splice_event_cancel_indicator = reader.read_flag()?;
        reader.skip_bits(7)?;

        if splice_event_cancel_indicator {
            events.push(ScheduledEvent {
                splice_event_id,
                splice_event_cancel_indicator,
                ..Default::default()
            });
            continue;
        }

        let out_of_network_indicator = reader.read_flag()?;
        let program_splice_flag = reader.read_flag()?;
        let duration_flag = reader.read_flag()?;
        reader.skip_bits(5)?;

        let schedule = if program_splice_flag {
            ScheduleMode::Program {
                utc_splice_time: reader.read_bits(32)? as u32,
            }
        } else {
            let component_count = reader.read_bits(8)? as usize;
            let mut components = Vec::with_capacity(component_count);
            for _ in 0..component_count {
                components.push(ScheduledComponent {
                    component_tag: reader.read_bits(8)? as u8,
                    utc_splice_time: reader.read_bits(32)? as u32,
                });
            }
            ScheduleMode::Components(components)
        };

        let break_duration = if duration_flag {
            Some(parse_break_duration(reader)?)
        } else {
            None
        };

        events.push(ScheduledEvent {
            splice_event_id,
            splice_event_cancel_indicator,
            out_of_network_indicator,
            schedule,
            break_duration,
            unique_program_id: reader.read_bits(16)? as u16,
            avail_num: reader.read_bits(8)? as u8,
            avails_expected: reader.read_bits(8)? as u8,
        });
    }

    Ok(SpliceSchedule { events })
}
