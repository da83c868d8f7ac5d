//! Encoding implementations for SCTE-35 time structures.

use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::time::*;

impl Encodable for SpliceTime {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        match self.pts_time {
            Some(pts_time) => {
                // time_specified_flag, reserved (6 bits of 1s), pts_time (33 bits)
                writer.write_flag(true)?;
                writer.write_bits(0x3F, 6)?;
                writer.write_bits(pts_time % PTS_MODULUS, 33)?;
            }
            None => {
                writer.write_flag(false)?;
                writer.write_bits(0x7F, 7)?;
            }
        }
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        if self.time_specified_flag() {
            5 // 1 + 6 + 33 bits
        } else {
            1 // 1 + 7 bits
        }
    }
}

impl Encodable for BreakDuration {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_flag(self.auto_return)?;
        writer.write_bits(0x3F, 6)?;
        writer.write_bits(self.duration % PTS_MODULUS, 33)?;
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        5 // 1 + 6 + 33 bits
    }
}
