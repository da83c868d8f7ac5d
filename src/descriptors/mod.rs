//! Splice descriptors and the descriptor decoder.
//!
//! Every descriptor is `tag(8) length(8)` followed by `length` payload bytes.
//! Payloads of known tags start with the `CUEI` identifier.

mod segmentation;

pub use segmentation::*;

use crate::bit_reader::BitReader;
use crate::error::{DecodeError, DecodeResult};
use tracing::{trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ASCII "CUEI", the identifier opening every SCTE-35 descriptor payload.
pub const CUEI: u32 = 0x43554549;

/// A splice descriptor attached to a cue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum SpliceDescriptor {
    Avail(AvailDescriptor),
    Dtmf(DtmfDescriptor),
    Segmentation(SegmentationDescriptor),
    Time(TimeDescriptor),
    Audio(AudioDescriptor),
    /// Any other tag; `data` is the whole payload, identifier included.
    Unknown { tag: u8, data: Vec<u8> },
}

impl SpliceDescriptor {
    pub fn tag(&self) -> SpliceDescriptorTag {
        match self {
            SpliceDescriptor::Avail(_) => SpliceDescriptorTag::Avail,
            SpliceDescriptor::Dtmf(_) => SpliceDescriptorTag::DTMF,
            SpliceDescriptor::Segmentation(_) => SpliceDescriptorTag::Segmentation,
            SpliceDescriptor::Time(_) => SpliceDescriptorTag::Time,
            SpliceDescriptor::Audio(_) => SpliceDescriptorTag::Audio,
            SpliceDescriptor::Unknown { tag, .. } => SpliceDescriptorTag::from(*tag),
        }
    }

    /// Returns the segmentation descriptor, if this is one.
    pub fn as_segmentation(&self) -> Option<&SegmentationDescriptor> {
        match self {
            SpliceDescriptor::Segmentation(segmentation) => Some(segmentation),
            _ => None,
        }
    }
}

impl From<SegmentationDescriptor> for SpliceDescriptor {
    fn from(segmentation: SegmentationDescriptor) -> Self {
        SpliceDescriptor::Segmentation(segmentation)
    }
}

/// Avail descriptor (tag 0x00).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvailDescriptor {
    pub provider_avail_id: u32,
}

/// DTMF descriptor (tag 0x01).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DtmfDescriptor {
    /// Tenths of a second before the splice point.
    pub preroll: u8,
    /// At most 7 characters; `dtmf_count` is derived from the length.
    pub dtmf_chars: String,
}

/// Time descriptor (tag 0x03).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeDescriptor {
    /// 48 bits.
    pub tai_seconds: u64,
    pub tai_ns: u32,
    pub utc_offset: u16,
}

/// Audio descriptor (tag 0x04).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioDescriptor {
    /// At most 15 components.
    pub components: Vec<AudioComponent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioComponent {
    pub component_tag: u8,
    /// 24-bit ISO 639 language code.
    pub iso_code: u32,
    /// 3 bits.
    pub bit_stream_mode: u8,
    /// 4 bits.
    pub num_channels: u8,
    pub full_srvc_audio: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpliceDescriptorTag {
    Avail,
    DTMF,
    Segmentation,
    Time,
    Audio,
    Reserved(u8),
    DVB(u8),
}

impl From<u8> for SpliceDescriptorTag {
    fn from(value: u8) -> Self {
        match value {
            0x0 => SpliceDescriptorTag::Avail,
            0x1 => SpliceDescriptorTag::DTMF,
            0x2 => SpliceDescriptorTag::Segmentation,
            0x3 => SpliceDescriptorTag::Time,
            0x4 => SpliceDescriptorTag::Audio,
            0x5..=0xEF => SpliceDescriptorTag::Reserved(value),
            _ => SpliceDescriptorTag::DVB(value),
        }
    }
}

impl From<SpliceDescriptorTag> for u8 {
    fn from(value: SpliceDescriptorTag) -> Self {
        match value {
            SpliceDescriptorTag::Avail => 0x0,
            SpliceDescriptorTag::DTMF => 0x1,
            SpliceDescriptorTag::Segmentation => 0x2,
            SpliceDescriptorTag::Time => 0x3,
            SpliceDescriptorTag::Audio => 0x4,
            SpliceDescriptorTag::Reserved(value) => value,
            SpliceDescriptorTag::DVB(value) => value,
        }
    }
}

/// Reads one descriptor and returns it with its total size in bytes
/// (2 + `descriptor_length`).
///
/// The payload is decoded from a reader bounded to `descriptor_length`, so a
/// field running past the declared length fails instead of consuming the next
/// descriptor.
pub(crate) fn parse_splice_descriptor(
    reader: &mut BitReader,
) -> DecodeResult<(SpliceDescriptor, usize)> {
    let tag = reader.read_bits(8)? as u8;
    let length = reader.read_bits(8)? as usize;
    let payload = reader.read_bytes(length)?;
    trace!(tag, length, "splice descriptor");

    let descriptor = match parse_identified(SpliceDescriptorTag::from(tag), &payload)? {
        Some(descriptor) => descriptor,
        None => SpliceDescriptor::Unknown { tag, data: payload },
    };

    Ok((descriptor, 2 + length))
}

/// Decodes a payload that opens with `CUEI`. Returns `None` for tags without
/// a known layout.
fn parse_identified(
    tag: SpliceDescriptorTag,
    payload: &[u8],
) -> DecodeResult<Option<SpliceDescriptor>> {
    if matches!(
        tag,
        SpliceDescriptorTag::Reserved(_) | SpliceDescriptorTag::DVB(_)
    ) {
        return Ok(None);
    }

    let mut reader = BitReader::new(payload);
    let identifier = reader.read_bits(32)? as u32;
    if identifier != CUEI {
        return Err(DecodeError::InvalidIdentifier(identifier));
    }

    let descriptor = match tag {
        SpliceDescriptorTag::Avail => SpliceDescriptor::Avail(AvailDescriptor {
            provider_avail_id: reader.read_bits(32)? as u32,
        }),
        SpliceDescriptorTag::DTMF => SpliceDescriptor::Dtmf(parse_dtmf(&mut reader)?),
        SpliceDescriptorTag::Segmentation => {
            SpliceDescriptor::Segmentation(parse_segmentation_descriptor(&mut reader)?)
        }
        SpliceDescriptorTag::Time => SpliceDescriptor::Time(TimeDescriptor {
            tai_seconds: reader.read_bits(48)?,
            tai_ns: reader.read_bits(32)? as u32,
            utc_offset: reader.read_bits(16)? as u16,
        }),
        SpliceDescriptorTag::Audio => SpliceDescriptor::Audio(parse_audio(&mut reader)?),
        SpliceDescriptorTag::Reserved(_) | SpliceDescriptorTag::DVB(_) => return Ok(None),
    };

    if reader.remaining_bits() > 0 {
        warn!(
            tag = u8::from(tag),
            trailing_bits = reader.remaining_bits(),
            "descriptor has trailing bytes after its fields; they are dropped"
        );
    }

    Ok(Some(descriptor))
}

fn parse_dtmf(reader: &mut BitReader) -> DecodeResult<DtmfDescriptor> {
    let preroll = reader.read_bits(8)? as u8;
    let dtmf_count = reader.read_bits(3)? as usize;
    reader.skip_bits(5)?;
    let chars = reader.read_bytes(dtmf_count)?;
    Ok(DtmfDescriptor {
        preroll,
        dtmf_chars: chars.into_iter().map(char::from).collect(),
    })
}

fn parse_audio(reader: &mut BitReader) -> DecodeResult<AudioDescriptor> {
    let audio_count = reader.read_bits(4)? as usize;
    reader.skip_bits(4)?;
    let mut components = Vec::with_capacity(audio_count);
    for _ in 0..audio_count {
        components.push(AudioComponent {
            component_tag: reader.read_bits(8)? as u8,
            iso_code: reader.read_bits(24)? as u32,
            bit_stream_mode: reader.read_bits(3)? as u8,
            num_channels: reader.read_bits(4)? as u8,
            full_srvc_audio: reader.read_flag()?,
        });
    }
    Ok(AudioDescriptor { components })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_avail_descriptor() {
        let data = [0x00, 0x08, 0x43, 0x55, 0x45, 0x49, 0x00, 0x00, 0x01, 0x35];
        let mut reader = BitReader::new(&data);
        let (descriptor, size) = parse_splice_descriptor(&mut reader).unwrap();
        assert_eq!(
            descriptor,
            SpliceDescriptor::Avail(AvailDescriptor {
                provider_avail_id: 0x135
            })
        );
        assert_eq!(size, 10);
        assert_eq!(descriptor.tag(), SpliceDescriptorTag::Avail);
    }

    #[test]
    fn test_parse_dtmf_descriptor() {
        let data = [
            0x01, 0x0a, 0x43, 0x55, 0x45, 0x49, 0xb1, 0x9f, 0x31, 0x32, 0x31, 0x23,
        ];
        let mut reader = BitReader::new(&data);
        let (descriptor, _) = parse_splice_descriptor(&mut reader).unwrap();
        assert_eq!(
            descriptor,
            SpliceDescriptor::Dtmf(DtmfDescriptor {
                preroll: 0xb1,
                dtmf_chars: "121#".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_time_and_audio_descriptors() {
        let data = [
            0x03, 0x10, 0x43, 0x55, 0x45, 0x49, 0x00, 0x00, 0x5f, 0x5e, 0x10, 0x00, 0x00, 0x00,
            0x00, 0x01, 0x00, 0x25,
        ];
        let mut reader = BitReader::new(&data);
        let (descriptor, _) = parse_splice_descriptor(&mut reader).unwrap();
        assert_eq!(
            descriptor,
            SpliceDescriptor::Time(TimeDescriptor {
                tai_seconds: 0x5f5e1000,
                tai_ns: 1,
                utc_offset: 37,
            })
        );

        // one component: tag 0x10, "eng", bsmod 0, 2 channels, full service
        let data = [
            0x04, 0x0a, 0x43, 0x55, 0x45, 0x49, 0x1f, 0x10, 0x65, 0x6e, 0x67, 0x05,
        ];
        let mut reader = BitReader::new(&data);
        let (descriptor, _) = parse_splice_descriptor(&mut reader).unwrap();
        assert_eq!(
            descriptor,
            SpliceDescriptor::Audio(AudioDescriptor {
                components: vec![AudioComponent {
                    component_tag: 0x10,
                    iso_code: 0x656e67,
                    bit_stream_mode: 0,
                    num_channels: 2,
                    full_srvc_audio: true,
                }],
            })
        );
    }

    #[test]
    fn test_unknown_tag_keeps_payload() {
        let data = [0x7f, 0x03, 0xde, 0xad, 0xbe, 0x00];
        let mut reader = BitReader::new(&data);
        let (descriptor, size) = parse_splice_descriptor(&mut reader).unwrap();
        assert_eq!(
            descriptor,
            SpliceDescriptor::Unknown {
                tag: 0x7f,
                data: vec![0xde, 0xad, 0xbe],
            }
        );
        assert_eq!(size, 5);
        assert_eq!(reader.remaining_bits(), 8);
    }

    #[test]
    fn test_known_tag_requires_cuei() {
        let data = [0x00, 0x08, 0x41, 0x42, 0x43, 0x44, 0x00, 0x00, 0x00, 0x01];
        let mut reader = BitReader::new(&data);
        assert_eq!(
            parse_splice_descriptor(&mut reader),
            Err(DecodeError::InvalidIdentifier(0x41424344))
        );
    }

    #[test]
    fn test_field_past_declared_length_fails() {
        // avail descriptor declaring 6 bytes cannot hold provider_avail_id
        let data = [
            0x00, 0x06, 0x43, 0x55, 0x45, 0x49, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut reader = BitReader::new(&data);
        assert!(matches!(
            parse_splice_descriptor(&mut reader),
            Err(DecodeError::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_tag_conversion() {
        assert_eq!(SpliceDescriptorTag::from(0x02), SpliceDescriptorTag::Segmentation);
        assert_eq!(SpliceDescriptorTag::from(0x7f), SpliceDescriptorTag::Reserved(0x7f));
        assert_eq!(SpliceDescriptorTag::from(0xf0), SpliceDescriptorTag::DVB(0xf0));
        assert_eq!(u8::from(SpliceDescriptorTag::DVB(0xf0)), 0xf0);
    }
}
