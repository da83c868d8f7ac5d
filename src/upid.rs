//! Segmentation UPID (Unique Program Identifier) types.
//!
//! The UPID of a segmentation descriptor is carried as its type byte plus the
//! raw identifier bytes, so any type (including MID and reserved ones)
//! re-encodes exactly.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The `segmentation_upid_type` values defined by SCTE-35.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegmentationUpidType {
    /// No UPID is used (0x00)
    #[default]
    NotUsed,
    /// User-defined UPID (deprecated) (0x01)
    UserDefinedDeprecated,
    /// ISCI (Industry Standard Commercial Identifier) (0x02)
    ISCI,
    /// Ad Identifier (0x03)
    AdID,
    /// UMID (Unique Material Identifier) (0x04)
    UMID,
    /// ISAN, deprecated form (0x05)
    ISANDeprecated,
    /// ISAN (International Standard Audiovisual Number) (0x06)
    ISAN,
    /// TID (Tribune Identifier) (0x07)
    TID,
    /// AiringID (0x08)
    AiringID,
    /// ADI (Advertising Digital Identification) (0x09)
    ADI,
    /// EIDR (Entertainment Identifier Registry) (0x0A)
    EIDR,
    /// ATSC Content Identifier (0x0B)
    ATSCContentIdentifier,
    /// MPU (Managed Private UPID) (0x0C)
    MPU,
    /// MID (Multiple UPID) (0x0D)
    MID,
    /// ADS Information (0x0E)
    ADSInformation,
    /// URI (Uniform Resource Identifier) (0x0F)
    URI,
    /// UUID (Universally Unique Identifier) (0x10)
    UUID,
    /// SCR (Subscriber Company Reporting) (0x11)
    SCR,
    /// Reserved or unknown UPID type
    Reserved(u8),
}

impl From<SegmentationUpidType> for u8 {
    fn from(s: SegmentationUpidType) -> Self {
        use SegmentationUpidType::*;
        match s {
            NotUsed => 0x00,
            UserDefinedDeprecated => 0x01,
            ISCI => 0x02,
            AdID => 0x03,
            UMID => 0x04,
            ISANDeprecated => 0x05,
            ISAN => 0x06,
            TID => 0x07,
            AiringID => 0x08,
            ADI => 0x09,
            EIDR => 0x0A,
            ATSCContentIdentifier => 0x0B,
            MPU => 0x0C,
            MID => 0x0D,
            ADSInformation => 0x0E,
            URI => 0x0F,
            UUID => 0x10,
            SCR => 0x11,
            Reserved(x) => x,
        }
    }
}

impl From<u8> for SegmentationUpidType {
    fn from(value: u8) -> Self {
        use SegmentationUpidType::*;
        match value {
            0x00 => NotUsed,
            0x01 => UserDefinedDeprecated,
            0x02 => ISCI,
            0x03 => AdID,
            0x04 => UMID,
            0x05 => ISANDeprecated,
            0x06 => ISAN,
            0x07 => TID,
            0x08 => AiringID,
            0x09 => ADI,
            0x0A => EIDR,
            0x0B => ATSCContentIdentifier,
            0x0C => MPU,
            0x0D => MID,
            0x0E => ADSInformation,
            0x0F => URI,
            0x10 => UUID,
            0x11 => SCR,
            x => Reserved(x),
        }
    }
}

impl SegmentationUpidType {
    /// True for types whose payload is printable text.
    pub fn is_textual(&self) -> bool {
        use SegmentationUpidType::*;
        matches!(self, ISCI | AdID | TID | ADI | URI | ADSInformation | SCR)
    }
}

/// A segmentation UPID: its type byte and raw identifier bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentationUpid {
    /// Raw `segmentation_upid_type`.
    pub upid_type: u8,
    /// Identifier bytes; `segmentation_upid_length` is derived from this.
    pub value: Vec<u8>,
}

impl SegmentationUpid {
    pub fn new(upid_type: SegmentationUpidType, value: Vec<u8>) -> Self {
        Self {
            upid_type: upid_type.into(),
            value,
        }
    }

    pub fn kind(&self) -> SegmentationUpidType {
        SegmentationUpidType::from(self.upid_type)
    }

    /// The identifier as a string, for textual types holding valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        if !self.kind().is_textual() {
            return None;
        }
        std::str::from_utf8(&self.value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upid_type_conversion() {
        for value in 0u8..=0x11 {
            assert_eq!(u8::from(SegmentationUpidType::from(value)), value);
        }
        assert_eq!(
            SegmentationUpidType::from(0x42),
            SegmentationUpidType::Reserved(0x42)
        );
        assert_eq!(SegmentationUpidType::default(), SegmentationUpidType::NotUsed);
    }

    #[test]
    fn test_upid_text() {
        let upid = SegmentationUpid::new(SegmentationUpidType::AdID, b"ABCD0123456H".to_vec());
        assert_eq!(upid.upid_type, 0x03);
        assert_eq!(upid.as_text(), Some("ABCD0123456H"));

        let airing = SegmentationUpid::new(
            SegmentationUpidType::AiringID,
            vec![0x00, 0x00, 0x00, 0x00, 0x2c, 0xa0, 0xa1, 0x8a],
        );
        assert_eq!(airing.kind(), SegmentationUpidType::AiringID);
        assert_eq!(airing.as_text(), None);
    }
}
