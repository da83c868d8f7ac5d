use crate::bit_reader::BitReader;
use crate::error::DecodeResult;
use crate::time::ticks_to_duration;
use crate::upid::SegmentationUpid;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segmentation descriptor (tag 0x02).
///
/// Marks program and segment boundaries such as ad break starts and ends.
/// When `segmentation_event_cancel_indicator` is set only the event id and
/// compliance bit are on the wire and the remaining fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentationDescriptor {
    pub segmentation_event_id: u32,
    pub segmentation_event_cancel_indicator: bool,
    pub segmentation_event_id_compliance_indicator: bool,
    /// `None` encodes `delivery_not_restricted_flag` = 1.
    pub delivery_restrictions: Option<DeliveryRestrictions>,
    /// `None` encodes `program_segmentation_flag` = 1.
    pub components: Option<Vec<SegmentationComponent>>,
    /// 40-bit duration in 90kHz ticks.
    pub segmentation_duration: Option<u64>,
    pub segmentation_upid: SegmentationUpid,
    pub segmentation_type_id: u8,
    pub segment_num: u8,
    pub segments_expected: u8,
    pub sub_segment: Option<SubSegment>,
}

impl SegmentationDescriptor {
    pub fn program_segmentation_flag(&self) -> bool {
        self.components.is_none()
    }

    pub fn segmentation_duration_flag(&self) -> bool {
        self.segmentation_duration.is_some()
    }

    pub fn delivery_not_restricted_flag(&self) -> bool {
        self.delivery_restrictions.is_none()
    }

    pub fn segmentation_type(&self) -> SegmentationType {
        SegmentationType::from_id(self.segmentation_type_id)
    }

    /// The segmentation duration as a `Duration`, if present.
    pub fn duration(&self) -> Option<Duration> {
        self.segmentation_duration.map(ticks_to_duration)
    }
}

/// Delivery restriction flags, present when `delivery_not_restricted_flag` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeliveryRestrictions {
    pub web_delivery_allowed_flag: bool,
    pub no_regional_blackout_flag: bool,
    pub archive_allowed_flag: bool,
    pub device_restrictions: DeviceRestrictions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DeviceRestrictions {
    /// This Segment is restricted for a class of devices defined by an out of band message that
    /// describes which devices are excluded.
    RestrictGroup0 = 0b00,

    /// This Segment is restricted for a class of devices defined by an out of band message that
    /// describes which devices are excluded.
    RestrictGroup1 = 0b01,

    /// This Segment is restricted for a class of devices defined by an out of band message that
    /// describes which devices are excluded.
    RestrictGroup2 = 0b10,

    /// This Segment has no device restrictions.
    #[default]
    None = 0b11,
}

impl From<u8> for DeviceRestrictions {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => DeviceRestrictions::RestrictGroup0,
            0b01 => DeviceRestrictions::RestrictGroup1,
            0b10 => DeviceRestrictions::RestrictGroup2,
            _ => DeviceRestrictions::None,
        }
    }
}

/// Component entry of a component-level segmentation descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentationComponent {
    pub component_tag: u8,
    /// 33-bit offset in 90kHz ticks.
    pub pts_offset: u64,
}

/// Sub-segment fields carried by placement opportunity starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubSegment {
    pub sub_segment_num: u8,
    pub sub_segments_expected: u8,
}

/// Parses the segmentation payload following the `CUEI` identifier.
///
/// `reader` is bounded to the descriptor's declared length.
pub(crate) fn parse_segmentation_descriptor(
    reader: &mut BitReader,
) -> DecodeResult<SegmentationDescriptor> {
    let segmentation_event_id = reader.read_bits(32)? as u32;
    let segmentation_event_cancel_indicator = reader.read_flag()?;
    let segmentation_event_id_compliance_indicator = reader.read_flag()?;
    reader.skip_bits(6)?;

    if segmentation_event_cancel_indicator {
        return Ok(SegmentationDescriptor {
            segmentation_event_id,
            segmentation_event_cancel_indicator,
            segmentation_event_id_compliance_indicator,
            ..Default::default()
        });
    }

    let program_segmentation_flag = reader.read_flag()?;
    let segmentation_duration_flag = reader.read_flag()?;
    let delivery_not_restricted_flag = reader.read_flag()?;

    let delivery_restrictions = if delivery_not_restricted_flag {
        reader.skip_bits(5)?;
        None
    } else {
        Some(DeliveryRestrictions {
            web_delivery_allowed_flag: reader.read_flag()?,
            no_regional_blackout_flag: reader.read_flag()?,
            archive_allowed_flag: reader.read_flag()?,
            device_restrictions: DeviceRestrictions::from(reader.read_bits(2)? as u8),
        })
    };

    let components = if program_segmentation_flag {
        None
    } else {
        let component_count = reader.read_bits(8)? as usize;
        let mut components = Vec::with_capacity(component_count);
        for _ in 0..component_count {
            let component_tag = reader.read_bits(8)? as u8;
            reader.skip_bits(7)?;
            components.push(SegmentationComponent {
                component_tag,
                pts_offset: reader.read_bits(33)?,
            });
        }
        Some(components)
    };

    let segmentation_duration = if segmentation_duration_flag {
        Some(reader.read_bits(40)?)
    } else {
        None
    };

    let upid_type = reader.read_bits(8)? as u8;
    let upid_length = reader.read_bits(8)? as usize;
    let segmentation_upid = SegmentationUpid {
        upid_type,
        value: reader.read_bytes(upid_length)?,
    };

    let segmentation_type_id = reader.read_bits(8)? as u8;
    let segment_num = reader.read_bits(8)? as u8;
    let segments_expected = reader.read_bits(8)? as u8;

    let sub_segment = if SegmentationType::from_id(segmentation_type_id).has_sub_segments()
        && reader.remaining_bits() >= 16
    {
        Some(SubSegment {
            sub_segment_num: reader.read_bits(8)? as u8,
            sub_segments_expected: reader.read_bits(8)? as u8,
        })
    } else {
        None
    };

    Ok(SegmentationDescriptor {
        segmentation_event_id,
        segmentation_event_cancel_indicator,
        segmentation_event_id_compliance_indicator,
        delivery_restrictions,
        components,
        segmentation_duration,
        segmentation_upid,
        segmentation_type_id,
        segment_num,
        segments_expected,
        sub_segment,
    })
}

/// Typed view of `segmentation_type_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentationType {
    #[default]
    NotIndicated,
    ContentIdentification,
    ProgramStart,
    ProgramEnd,
    ProgramEarlyTermination,
    ProgramBreakaway,
    ProgramResumption,
    ProgramRunoverPlanned,
    ProgramRunoverUnplanned,
    ProgramOverlapStart,
    ProgramBlackoutOverride,
    ProgramJoin,
    ChapterStart,
    ChapterEnd,
    BreakStart,
    BreakEnd,
    OpeningCreditStartDeprecated,
    OpeningCreditEndDeprecated,
    ClosingCreditStartDeprecated,
    ClosingCreditEndDeprecated,
    ProviderAdvertisementStart,
    ProviderAdvertisementEnd,
    DistributorAdvertisementStart,
    DistributorAdvertisementEnd,
    ProviderPlacementOpportunityStart,
    ProviderPlacementOpportunityEnd,
    DistributorPlacementOpportunityStart,
    DistributorPlacementOpportunityEnd,
    ProviderOverlayPlacementOpportunityStart,
    ProviderOverlayPlacementOpportunityEnd,
    DistributorOverlayPlacementOpportunityStart,
    DistributorOverlayPlacementOpportunityEnd,
    ProviderPromoStart,
    ProviderPromoEnd,
    DistributorPromoStart,
    DistributorPromoEnd,
    UnscheduledEventStart,
    UnscheduledEventEnd,
    AlternateContentOpportunityStart,
    AlternateContentOpportunityEnd,
    ProviderAdBlockStart,
    ProviderAdBlockEnd,
    DistributorAdBlockStart,
    DistributorAdBlockEnd,
    NetworkStart,
    NetworkEnd,
    /// Any id not listed above.
    Reserved(u8),
}

impl SegmentationType {
    /// Returns the numeric identifier for this segmentation type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scte35_cue::SegmentationType;
    ///
    /// assert_eq!(SegmentationType::ProviderAdvertisementStart.id(), 0x30);
    /// assert_eq!(SegmentationType::ProgramStart.id(), 0x10);
    /// ```
    pub fn id(&self) -> u8 {
        use SegmentationType::*;
        match self {
            NotIndicated => 0x00,
            ContentIdentification => 0x01,
            ProgramStart => 0x10,
            ProgramEnd => 0x11,
            ProgramEarlyTermination => 0x12,
            ProgramBreakaway => 0x13,
            ProgramResumption => 0x14,
            ProgramRunoverPlanned => 0x15,
            ProgramRunoverUnplanned => 0x16,
            ProgramOverlapStart => 0x17,
            ProgramBlackoutOverride => 0x18,
            ProgramJoin => 0x19,
            ChapterStart => 0x20,
            ChapterEnd => 0x21,
            BreakStart => 0x22,
            BreakEnd => 0x23,
            OpeningCreditStartDeprecated => 0x24,
            OpeningCreditEndDeprecated => 0x25,
            ClosingCreditStartDeprecated => 0x26,
            ClosingCreditEndDeprecated => 0x27,
            ProviderAdvertisementStart => 0x30,
            ProviderAdvertisementEnd => 0x31,
            DistributorAdvertisementStart => 0x32,
            DistributorAdvertisementEnd => 0x33,
            ProviderPlacementOpportunityStart => 0x34,
            ProviderPlacementOpportunityEnd => 0x35,
            DistributorPlacementOpportunityStart => 0x36,
            DistributorPlacementOpportunityEnd => 0x37,
            ProviderOverlayPlacementOpportunityStart => 0x38,
            ProviderOverlayPlacementOpportunityEnd => 0x39,
            DistributorOverlayPlacementOpportunityStart => 0x3A,
            DistributorOverlayPlacementOpportunityEnd => 0x3B,
            ProviderPromoStart => 0x3C,
            ProviderPromoEnd => 0x3D,
            DistributorPromoStart => 0x3E,
            DistributorPromoEnd => 0x3F,
            UnscheduledEventStart => 0x40,
            UnscheduledEventEnd => 0x41,
            AlternateContentOpportunityStart => 0x42,
            AlternateContentOpportunityEnd => 0x43,
            ProviderAdBlockStart => 0x44,
            ProviderAdBlockEnd => 0x45,
            DistributorAdBlockStart => 0x46,
            DistributorAdBlockEnd => 0x47,
            NetworkStart => 0x50,
            NetworkEnd => 0x51,
            Reserved(id) => *id,
        }
    }

    /// Converts a numeric segmentation type id to its typed variant.
    ///
    /// ```rust
    /// use scte35_cue::SegmentationType;
    ///
    /// assert_eq!(SegmentationType::from_id(0x30), SegmentationType::ProviderAdvertisementStart);
    /// assert_eq!(SegmentationType::from_id(0xFF), SegmentationType::Reserved(0xFF));
    /// ```
    pub fn from_id(id: u8) -> Self {
        use SegmentationType::*;
        match id {
            0x00 => NotIndicated,
            0x01 => ContentIdentification,
            0x10 => ProgramStart,
            0x11 => ProgramEnd,
            0x12 => ProgramEarlyTermination,
            0x13 => ProgramBreakaway,
            0x14 => ProgramResumption,
            0x15 => ProgramRunoverPlanned,
            0x16 => ProgramRunoverUnplanned,
            0x17 => ProgramOverlapStart,
            0x18 => ProgramBlackoutOverride,
            0x19 => ProgramJoin,
            0x20 => ChapterStart,
            0x21 => ChapterEnd,
            0x22 => BreakStart,
            0x23 => BreakEnd,
            0x24 => OpeningCreditStartDeprecated,
            0x25 => OpeningCreditEndDeprecated,
            0x26 => ClosingCreditStartDeprecated,
            0x27 => ClosingCreditEndDeprecated,
            0x30 => ProviderAdvertisementStart,
            0x31 => ProviderAdvertisementEnd,
            0x32 => DistributorAdvertisementStart,
            0x33 => DistributorAdvertisementEnd,
            0x34 => ProviderPlacementOpportunityStart,
            0x35 => ProviderPlacementOpportunityEnd,
            0x36 => DistributorPlacementOpportunityStart,
            0x37 => DistributorPlacementOpportunityEnd,
            0x38 => ProviderOverlayPlacementOpportunityStart,
            0x39 => ProviderOverlayPlacementOpportunityEnd,
            0x3A => DistributorOverlayPlacementOpportunityStart,
            0x3B => DistributorOverlayPlacementOpportunityEnd,
            0x3C => ProviderPromoStart,
            0x3D => ProviderPromoEnd,
            0x3E => DistributorPromoStart,
            0x3F => DistributorPromoEnd,
            0x40 => UnscheduledEventStart,
            0x41 => UnscheduledEventEnd,
            0x42 => AlternateContentOpportunityStart,
            0x43 => AlternateContentOpportunityEnd,
            0x44 => ProviderAdBlockStart,
            0x45 => ProviderAdBlockEnd,
            0x46 => DistributorAdBlockStart,
            0x47 => DistributorAdBlockEnd,
            0x50 => NetworkStart,
            0x51 => NetworkEnd,
            id => Reserved(id),
        }
    }

    /// Placement opportunity starts may carry `sub_segment_num` and
    /// `sub_segments_expected`.
    pub fn has_sub_segments(&self) -> bool {
        use SegmentationType::*;
        matches!(
            self,
            ProviderPlacementOpportunityStart
                | DistributorPlacementOpportunityStart
                | ProviderOverlayPlacementOpportunityStart
                | DistributorOverlayPlacementOpportunityStart
        )
    }
}
