//! Encoding implementations for SCTE-35 descriptors.
//!
//! Each payload is written to its own writer first so `descriptor_length` is
//! the exact byte count that follows it.

use crate::descriptors::*;
use crate::encoding::error::{EncodingError, check_width};
use crate::encoding::{BitWriter, Encodable, EncodingResult};

impl Encodable for SpliceDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        let mut payload = BitWriter::with_capacity(self.encoded_size().saturating_sub(2));

        match self {
            SpliceDescriptor::Unknown { data, .. } => payload.write_bytes(data)?,
            _ => {
                payload.write_bits(CUEI as u64, 32)?;
                match self {
                    SpliceDescriptor::Avail(avail) => {
                        payload.write_bits(avail.provider_avail_id as u64, 32)?
                    }
                    SpliceDescriptor::Dtmf(dtmf) => dtmf.encode_payload(&mut payload)?,
                    SpliceDescriptor::Segmentation(segmentation) => {
                        segmentation.encode_payload(&mut payload)?
                    }
                    SpliceDescriptor::Time(time) => {
                        payload.write_bits(time.tai_seconds, 48)?;
                        payload.write_bits(time.tai_ns as u64, 32)?;
                        payload.write_bits(time.utc_offset as u64, 16)?;
                    }
                    SpliceDescriptor::Audio(audio) => audio.encode_payload(&mut payload)?,
                    SpliceDescriptor::Unknown { .. } => {}
                }
            }
        }

        let payload = payload.finish();
        let descriptor_length = check_width("descriptor_length", payload.len(), 8)?;

        writer.write_bits(u8::from(self.tag()) as u64, 8)?;
        writer.write_bits(descriptor_length, 8)?;
        writer.write_bytes(&payload)
    }

    fn encoded_size(&self) -> usize {
        let payload = match self {
            SpliceDescriptor::Avail(_) => 4 + 4,
            SpliceDescriptor::Dtmf(dtmf) => 4 + 2 + dtmf.dtmf_chars.chars().count(),
            SpliceDescriptor::Segmentation(segmentation) => 4 + segmentation.payload_size(),
            SpliceDescriptor::Time(_) => 4 + 12,
            SpliceDescriptor::Audio(audio) => 4 + 1 + audio.components.len() * 5,
            SpliceDescriptor::Unknown { data, .. } => data.len(),
        };
        2 + payload
    }
}

impl DtmfDescriptor {
    fn encode_payload(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        let dtmf_count = check_width("dtmf_count", self.dtmf_chars.chars().count(), 3)?;
        writer.write_bits(self.preroll as u64, 8)?;
        writer.write_bits(dtmf_count, 3)?;
        writer.write_bits(0x1F, 5)?;
        for c in self.dtmf_chars.chars() {
            let byte = check_width("dtmf_char", c as usize, 8)?;
            writer.write_bits(byte, 8)?;
        }
        Ok(())
    }
}

impl AudioDescriptor {
    fn encode_payload(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(check_width("audio_count", self.components.len(), 4)?, 4)?;
        writer.write_bits(0x0F, 4)?;
        for component in &self.components {
            writer.write_bits(component.component_tag as u64, 8)?;
            writer.write_bits(component.iso_code as u64, 24)?;
            writer.write_bits(component.bit_stream_mode as u64, 3)?;
            writer.write_bits(component.num_channels as u64, 4)?;
            writer.write_flag(component.full_srvc_audio)?;
        }
        Ok(())
    }
}

impl SegmentationDescriptor {
    fn encode_payload(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.segmentation_event_id as u64, 32)?;
        writer.write_flag(self.segmentation_event_cancel_indicator)?;
        writer.write_flag(self.segmentation_event_id_compliance_indicator)?;
        writer.write_bits(0x3F, 6)?;

        if self.segmentation_event_cancel_indicator {
            return Ok(());
        }

        writer.write_flag(self.program_segmentation_flag())?;
        writer.write_flag(self.segmentation_duration_flag())?;
        writer.write_flag(self.delivery_not_restricted_flag())?;

        match &self.delivery_restrictions {
            Some(restrictions) => {
                writer.write_flag(restrictions.web_delivery_allowed_flag)?;
                writer.write_flag(restrictions.no_regional_blackout_flag)?;
                writer.write_flag(restrictions.archive_allowed_flag)?;
                writer.write_bits(restrictions.device_restrictions as u64, 2)?;
            }
            None => writer.write_bits(0x1F, 5)?,
        }

        if let Some(components) = &self.components {
            writer.write_bits(check_width("component_count", components.len(), 8)?, 8)?;
            for component in components {
                writer.write_bits(component.component_tag as u64, 8)?;
                writer.write_bits(0x7F, 7)?;
                writer.write_bits(component.pts_offset, 33)?;
            }
        }

        if let Some(duration) = self.segmentation_duration {
            if duration >> 40 != 0 {
                return Err(EncodingError::ValueTooLarge {
                    field: "segmentation_duration",
                    max_value: (1 << 40) - 1,
                    actual_value: duration,
                });
            }
            writer.write_bits(duration, 40)?;
        }

        let upid = &self.segmentation_upid;
        writer.write_bits(upid.upid_type as u64, 8)?;
        writer.write_bits(check_width("segmentation_upid_length", upid.value.len(), 8)?, 8)?;
        writer.write_bytes(&upid.value)?;

        writer.write_bits(self.segmentation_type_id as u64, 8)?;
        writer.write_bits(self.segment_num as u64, 8)?;
        writer.write_bits(self.segments_expected as u64, 8)?;

        if let Some(sub_segment) = &self.sub_segment {
            writer.write_bits(sub_segment.sub_segment_num as u64, 8)?;
            writer.write_bits(sub_segment.sub_segments_expected as u64, 8)?;
        }

        Ok(())
    }

    /// Payload size after the identifier.
    fn payload_size(&self) -> usize {
        let mut size = 5; // segmentation_event_id + cancel byte
        if self.segmentation_event_cancel_indicator {
            return size;
        }

        size += 1; // flags byte
        if let Some(components) = &self.components {
            size += 1 + components.len() * 6;
        }
        if self.segmentation_duration.is_some() {
            size += 5;
        }
        size += 2 + self.segmentation_upid.value.len();
        size += 3; // type id, segment_num, segments_expected
        if self.sub_segment.is_some() {
            size += 2;
        }
        size
    }
}
