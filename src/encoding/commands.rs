//! Encoding implementations for SCTE-35 splice commands.

use crate::commands::*;
use crate::encoding::error::check_width;
use crate::encoding::{BitWriter, Encodable, EncodingResult};

impl Encodable for SpliceCommand {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        match self {
            SpliceCommand::SpliceNull | SpliceCommand::BandwidthReservation => Ok(()),
            SpliceCommand::SpliceSchedule(schedule) => schedule.encode(writer),
            SpliceCommand::SpliceInsert(insert) => insert.encode(writer),
            SpliceCommand::TimeSignal(signal) => signal.splice_time.encode(writer),
            SpliceCommand::PrivateCommand(private) => {
                writer.write_bits(private.identifier as u64, 32)?;
                writer.write_bytes(&private.private_bytes)
            }
            SpliceCommand::Unknown { data, .. } => writer.write_bytes(data),
        }
    }

    fn encoded_size(&self) -> usize {
        match self {
            SpliceCommand::SpliceNull | SpliceCommand::BandwidthReservation => 0,
            SpliceCommand::SpliceSchedule(schedule) => schedule.encoded_size(),
            SpliceCommand::SpliceInsert(insert) => insert.encoded_size(),
            SpliceCommand::TimeSignal(signal) => signal.splice_time.encoded_size(),
            SpliceCommand::PrivateCommand(private) => 4 + private.private_bytes.len(),
            SpliceCommand::Unknown { data, .. } => data.len(),
        }
    }
}

impl Encodable for SpliceInsert {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.splice_event_id as u64, 32)?;
        writer.write_flag(self.splice_event_cancel_indicator)?;
        writer.write_bits(0x7F, 7)?;

        if self.splice_event_cancel_indicator {
            return Ok(());
        }

        writer.write_flag(self.out_of_network_indicator)?;
        writer.write_flag(self.program_splice_flag())?;
        writer.write_flag(self.duration_flag())?;
        writer.write_flag(self.splice_immediate_flag)?;
        writer.write_bits(0x0F, 4)?;

        match &self.splice_mode {
            SpliceMode::Program(splice_time) => {
                if !self.splice_immediate_flag {
                    splice_time.encode(writer)?;
                }
            }
            SpliceMode::Components(components) => {
                writer.write_bits(check_width("component_count", components.len(), 8)?, 8)?;
                for component in components {
                    writer.write_bits(component.component_tag as u64, 8)?;
                    if !self.splice_immediate_flag {
                        component.splice_time.encode(writer)?;
                    }
                }
            }
        }

        if let Some(break_duration) = &self.break_duration {
            break_duration.encode(writer)?;
        }

        writer.write_bits(self.unique_program_id as u64, 16)?;
        writer.write_bits(self.avail_num as u64, 8)?;
        writer.write_bits(self.avails_expected as u64, 8)?;
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        let mut size = 5; // splice_event_id + cancel indicator byte

        if self.splice_event_cancel_indicator {
            return size;
        }

        size += 1; // flags byte

        match &self.splice_mode {
            SpliceMode::Program(splice_time) => {
                if !self.splice_immediate_flag {
                    size += splice_time.encoded_size();
                }
            }
            SpliceMode::Components(components) => {
                size += 1; // component_count
                for component in components {
                    size += 1;
                    if !self.splice_immediate_flag {
                        size += component.splice_time.encoded_size();
                    }
                }
            }
        }

        if let Some(break_duration) = &self.break_duration {
            size += break_duration.encoded_size();
        }

        size + 4 // unique_program_id, avail_num, avails_expected
    }
}

impl Encodable for SpliceSchedule {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(check_width("splice_count", self.events.len(), 8)?, 8)?;

        for event in &self.events {
            writer.write_bits(event.splice_event_id as u64, 32)?;
            writer.write_flag(event.splice_event_cancel_indicator)?;
            writer.write_bits(0x7F, 7)?;

            if event.splice_event_cancel_indicator {
                continue;
            }

            writer.write_flag(event.out_of_network_indicator)?;
            writer.write_flag(event.program_splice_flag())?;
            writer.write_flag(event.duration_flag())?;
            writer.write_bits(0x1F, 5)?;

            match &event.schedule {
                ScheduleMode::Program { utc_splice_time } => {
                    writer.write_bits(*utc_splice_time as u64, 32)?;
                }
                ScheduleMode::Components(components) => {
                    writer.write_bits(check_width("component_count", components.len(), 8)?, 8)?;
                    for component in components {
                        writer.write_bits(component.component_tag as u64, 8)?;
                        writer.write_bits(component.utc_splice_time as u64, 32)?;
                    }
                }
            }

            if let Some(break_duration) = &event.break_duration {
                break_duration.encode(writer)?;
            }

            writer.write_bits(event.unique_program_id as u64, 16)?;
            writer.write_bits(event.avail_num as u64, 8)?;
            writer.write_bits(event.avails_expected as u64, 8)?;
        }

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        let mut size = 1; // splice_count

        for event in &self.events {
            size += 5;
            if event.splice_event_cancel_indicator {
                continue;
            }
            size += 1;
            size += match &event.schedule {
                ScheduleMode::Program { .. } => 4,
                ScheduleMode::Components(components) => 1 + components.len() * 5,
            };
            if event.break_duration.is_some() {
                size += 5;
            }
            size += 4;
        }

        size
    }
}
