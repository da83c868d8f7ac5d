//! Time structures shared by splice commands.

use crate::bit_reader::BitReader;
use crate::error::DecodeResult;
use crate::{ClockTimeExt, TICKS_PER_SECOND};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest value a 33-bit PTS field can hold, plus one.
pub(crate) const PTS_MODULUS: u64 = 1 << 33;

/// A `splice_time()` structure.
///
/// `pts_time` is `None` when `time_specified_flag` is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpliceTime {
    /// 33-bit presentation timestamp in 90kHz ticks.
    pub pts_time: Option<u64>,
}

impl SpliceTime {
    /// Creates a splice time with the given PTS in 90kHz ticks.
    pub fn from_ticks(ticks: u64) -> Self {
        Self {
            pts_time: Some(ticks % PTS_MODULUS),
        }
    }

    /// Creates a splice time from a duration since the PTS origin.
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_ticks(duration.as_90k())
    }

    /// Value of the `time_specified_flag` bit.
    pub fn time_specified_flag(&self) -> bool {
        self.pts_time.is_some()
    }

    /// The PTS as a duration, if one is specified.
    pub fn to_duration(&self) -> Option<Duration> {
        self.pts_time.map(ticks_to_duration)
    }
}

/// A `break_duration()` structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BreakDuration {
    /// When set, the splicer returns to the network at the end of the break.
    pub auto_return: bool,
    /// 33-bit duration in 90kHz ticks.
    pub duration: u64,
}

impl BreakDuration {
    /// The break length as a duration.
    pub fn to_duration(&self) -> Duration {
        ticks_to_duration(self.duration)
    }
}

pub(crate) fn ticks_to_duration(ticks: u64) -> Duration {
    let secs = ticks / TICKS_PER_SECOND;
    let nanos = (ticks % TICKS_PER_SECOND) * 1_000_000_000 / TICKS_PER_SECOND;
    Duration::new(secs, nanos as u32)
}

pub(crate) fn parse_splice_time(reader: &mut BitReader) -> DecodeResult<SpliceTime> {
    if reader.read_flag()? {
        reader.skip_bits(6)?;
        Ok(SpliceTime {
            pts_time: Some(reader.read_bits(33)?),
        })
    } else {
        reader.skip_bits(7)?;
        Ok(SpliceTime { pts_time: None })
    }
}

pub(crate) fn parse_break_duration(reader: &mut BitReader) -> DecodeResult<BreakDuration> {
    let auto_return = reader.read_flag()?;
    reader.skip_bits(6)?;
    let duration = reader.read_bits(33)?;
    Ok(BreakDuration {
        auto_return,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splice_time_specified() {
        let data = [0xfe, 0x72, 0xbd, 0x00, 0x50];
        let mut reader = BitReader::new(&data);
        let time = parse_splice_time(&mut reader).unwrap();
        assert_eq!(time, SpliceTime::from_ticks(0x072bd0050));
        assert!(time.time_specified_flag());
    }

    #[test]
    fn test_parse_splice_time_not_specified() {
        let data = [0x7f];
        let mut reader = BitReader::new(&data);
        let time = parse_splice_time(&mut reader).unwrap();
        assert_eq!(time.pts_time, None);
        assert_eq!(reader.remaining_bits(), 0);
    }

    #[test]
    fn test_parse_break_duration() {
        // auto_return=1, duration=0x00052ccf5 (60.293567s)
        let data = [0xfe, 0x00, 0x52, 0xcc, 0xf5];
        let mut reader = BitReader::new(&data);
        let duration = parse_break_duration(&mut reader).unwrap();
        assert!(duration.auto_return);
        assert_eq!(duration.duration, 0x00052ccf5);
        assert_eq!(duration.to_duration().as_secs(), 60);
    }

    #[test]
    fn test_splice_time_duration_conversion() {
        let time = SpliceTime::from_duration(Duration::from_secs(10));
        assert_eq!(time.pts_time, Some(900_000));
        assert_eq!(time.to_duration(), Some(Duration::from_secs(10)));
    }
}
