use super::*;
use crate::commands::{SpliceMode, TimeSignal};
use crate::descriptors::{AvailDescriptor, DeliveryRestrictions, DeviceRestrictions, SubSegment};
use data_encoding::BASE64;
use std::time::Duration;

fn scte35_14_1_time_signal() -> Cue {
    let mut cue = Cue::new(SpliceCommand::TimeSignal(TimeSignal {
        splice_time: SpliceTime::from_ticks(0x072bd0050),
    }));
    cue.info_section.cw_index = 0xff;

    let descriptor = SegmentationDescriptor {
        segmentation_event_id: 0x4800008e,
        segmentation_event_id_compliance_indicator: true,
        delivery_restrictions: Some(DeliveryRestrictions {
            web_delivery_allowed_flag: false,
            no_regional_blackout_flag: true,
            archive_allowed_flag: true,
            device_restrictions: DeviceRestrictions::None,
        }),
        segmentation_duration: Some(27630000),
        segmentation_upid: SegmentationUpid::new(
            SegmentationUpidType::AiringID,
            0x2ca0a18au64.to_be_bytes().to_vec(),
        ),
        segmentation_type_id: SegmentationType::ProviderPlacementOpportunityStart.id(),
        segment_num: 2,
        segments_expected: 0,
        sub_segment: Some(SubSegment {
            sub_segment_num: 154,
            sub_segments_expected: 201,
        }),
        ..Default::default()
    };
    cue.splice_descriptors.push(descriptor.into());
    cue
}

#[test]
fn test_time_signal_command() {
    // Time Signal example from threefive: '/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A=='
    let buffer = BASE64
        .decode(b"/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==")
        .expect("Failed to decode base64 string");

    let cue = Cue::decode(&buffer).expect("Failed to parse time_signal cue");

    assert_eq!(cue.info_section.table_id, 0xFC, "Table ID should be 0xFC");
    assert_eq!(
        cue.info_section.splice_command_type, 0x06,
        "Command type should be 0x06 (time_signal)"
    );
    assert_eq!(cue.info_section.splice_command_length, 5);

    match cue.splice_command {
        SpliceCommand::TimeSignal(ref cmd) => {
            assert!(cmd.splice_time.time_specified_flag());
            // PTS time is 1111111101, which is about 12345 seconds
            assert_eq!(cmd.splice_time.pts_time, Some(1_111_111_101));
            let duration = cmd.splice_time.to_duration().unwrap();
            assert_eq!(duration.as_secs(), 12345);
        }
        _ => panic!("Expected TimeSignal command"),
    }
    assert_eq!(cue.crc_32, 0xbb0c73f4);
}

#[test]
fn test_time_signal_with_descriptors() {
    let cue = Cue::decode_str("/DAgAAAAAAAAAP/wBQb+Qjo1vQAKAAhDVUVJAAAE0iVuWvA=").unwrap();

    assert_eq!(cue.descriptor_loop_length, 10);
    assert_eq!(
        cue.splice_descriptors,
        vec![SpliceDescriptor::Avail(AvailDescriptor {
            provider_avail_id: 0x4d2
        })]
    );
}

#[test]
fn test_splice_insert_fields() {
    let cue = Cue::decode_str("/DAlAAAAAAAAAP/wFAUAAAAEf+/+kybGyP4BSvaQAAEBAQAArky/3g==").unwrap();

    let SpliceCommand::SpliceInsert(insert) = &cue.splice_command else {
        panic!("Expected SpliceInsert command");
    };
    assert_eq!(insert.splice_event_id, 4);
    assert!(insert.out_of_network_indicator);
    assert!(!insert.splice_immediate_flag);
    assert_eq!(
        insert.splice_mode,
        SpliceMode::Program(SpliceTime::from_ticks(0x09326c6c8))
    );
    assert_eq!(
        insert.break_duration,
        Some(BreakDuration {
            auto_return: true,
            duration: 0x0014af690,
        })
    );
    assert_eq!(insert.unique_program_id, 1);
    assert_eq!(insert.avail_num, 1);
    assert_eq!(insert.avails_expected, 1);
}

#[test]
fn test_scte35_14_1_time_signal_decodes() {
    let cue = Cue::decode_str(
        "/DA2AAAAAAAA///wBQb+cr0AUAAgAh5DVUVJSAAAjn/PAAGlmbAICAAAAAAsoKGKNAIAmsm2waDx",
    )
    .unwrap();
    let mut expected = scte35_14_1_time_signal();
    expected.encode().unwrap();
    assert_eq!(cue, expected);

    let segmentation = cue.segmentation_descriptors().next().unwrap();
    assert_eq!(segmentation.duration(), Some(Duration::from_secs(307)));
    assert_eq!(segmentation.segmentation_upid.kind(), SegmentationUpidType::AiringID);
}

#[test]
fn write_splice_null_as_base64() {
    let mut cue = Cue::new(SpliceCommand::SpliceNull);
    assert_eq!(cue.encode_base64().unwrap(), "/DARAAAAAAAAAP/wAAAAAHpPv/8=");
}

#[test]
fn write_splice_null_as_hex() {
    let mut cue = Cue::new(SpliceCommand::SpliceNull);
    assert_eq!(
        cue.encode_hex().unwrap(),
        "0xfc301100000000000000fff0000000007a4fbfff"
    );
}

#[test]
fn compliance_scte35_14_1_time_signal_as_base64() {
    assert_eq!(
        scte35_14_1_time_signal().encode_base64().unwrap(),
        // This example was encoded using the threefive Python library
        "/DA2AAAAAAAA///wBQb+cr0AUAAgAh5DVUVJSAAAjn/PAAGlmbAICAAAAAAsoKGKNAIAmsm2waDx"
    );
}

#[test]
fn compliance_scte35_14_1_time_signal_as_hex() {
    assert_eq!(
        scte35_14_1_time_signal().encode_hex().unwrap(),
        "0xfc3036000000000000fffff00506fe72bd00500020021e435545494800008e7fcf0001a599b00808000000002ca0a18a3402009ac9b6c1a0f1"
    );
}

#[test]
fn test_encode_refreshes_derived_fields() {
    let mut cue = scte35_14_1_time_signal();
    let bytes = cue.encode().unwrap();

    assert_eq!(cue.info_section.section_length, 0x36);
    assert_eq!(cue.info_section.splice_command_length, 5);
    assert_eq!(cue.info_section.splice_command_type, 0x06);
    assert_eq!(cue.descriptor_loop_length, 0x20);
    assert_eq!(bytes.len(), 3 + cue.info_section.section_length as usize);

    let crc_offset = bytes.len() - 4;
    assert_eq!(cue.crc_32, crate::crc::calculate_crc(&bytes[..crc_offset]));
    assert_eq!(&bytes[crc_offset..], &cue.crc_32.to_be_bytes());
}

#[test]
fn test_adjust_pts() {
    let mut cue = Cue::decode_str("/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==").unwrap();
    let bytes = cue.adjust_pts(10.0).unwrap();
    assert_eq!(cue.info_section.pts_adjustment, 900_000);

    let decoded = Cue::decode_bytes_with(&bytes, &DecodeOptions::strict()).unwrap();
    assert_eq!(decoded.info_section.pts_adjustment, 900_000);
    assert_eq!(decoded.splice_command, cue.splice_command);

    cue.adjust_pts(-2.5).unwrap();
    assert_eq!(cue.info_section.pts_adjustment, 675_000);
}

#[test]
fn test_adjust_pts_wraps_at_33_bits() {
    let mut cue = Cue::new(SpliceCommand::SpliceNull);
    cue.adjust_pts_ticks(-1).unwrap();
    assert_eq!(cue.info_section.pts_adjustment, (1 << 33) - 1);
    cue.adjust_pts_ticks(2).unwrap();
    assert_eq!(cue.info_section.pts_adjustment, 1);
}

#[test]
fn test_wrong_table_id_fails() {
    let mut buffer = BASE64.decode(b"/DARAAAAAAAAAP/wAAAAAHpPv/8=").unwrap();
    buffer[0] = 0xfd;
    assert_eq!(Cue::decode(&buffer), Err(DecodeError::InvalidTableId(0xfd)));
}

#[test]
fn test_unknown_descriptor_tag_round_trips() {
    let mut cue = Cue::new(SpliceCommand::TimeSignal(TimeSignal {
        splice_time: SpliceTime::from_ticks(90_000),
    }));
    cue.splice_descriptors = vec![
        SpliceDescriptor::Unknown {
            tag: 0x7f,
            data: vec![0x01, 0x02, 0x03, 0x04, 0x05],
        },
        SpliceDescriptor::Avail(AvailDescriptor {
            provider_avail_id: 9,
        }),
    ];
    let bytes = cue.encode().unwrap();
    assert_eq!(cue.descriptor_loop_length, 7 + 10);

    let decoded = Cue::decode(&bytes).unwrap();
    assert_eq!(decoded.splice_descriptors, cue.splice_descriptors);

    let mut decoded = decoded;
    assert_eq!(decoded.encode().unwrap(), bytes);
}

#[test]
fn test_unknown_command_round_trips() {
    let mut cue = Cue::new(SpliceCommand::Unknown {
        command_type: 0x42,
        data: vec![0xca, 0xfe],
    });
    let bytes = cue.encode().unwrap();
    assert_eq!(cue.info_section.splice_command_type, 0x42);
    assert_eq!(cue.info_section.splice_command_length, 2);
    assert_eq!(Cue::decode(&bytes).unwrap(), cue);
}

#[test]
fn test_upid_adid_example_invalid_crc() {
    let adid = "/DA4AAAAAAAA///wBQb+AKpFLgAiAiBDVUVJAAAAA3//AAApPWwDDEFCQ0QwMTIzNDU2SHAAAFkTm+A=";

    let cue = Cue::decode_str(adid).unwrap();
    let segmentation = cue.segmentation_descriptors().next().unwrap();
    assert_eq!(segmentation.segmentation_upid.kind(), SegmentationUpidType::AdID);
    assert_eq!(segmentation.segmentation_upid.as_text(), Some("ABCD0123456H"));

    let strict = DecodeOptions::strict().with_input_format(InputFormat::Base64);
    assert!(matches!(
        Cue::decode_with(adid, &strict),
        Err(DecodeError::CrcMismatch { .. })
    ));
}

#[test]
fn test_decode_from_hex_text() {
    let cue = Cue::decode_str("0xfc301100000000000000fff0000000007a4fbfff").unwrap();
    assert_eq!(cue.splice_command, SpliceCommand::SpliceNull);

    let hex = DecodeOptions::default().with_input_format(InputFormat::Hex);
    assert_eq!(
        Cue::decode_with("/DARAAAAAAAAAP/wAAAAAHpPv/8=", &hex),
        Err(DecodeError::InvalidInput)
    );
}

#[test]
fn test_packet_data_is_carried_untouched() {
    let packet_data = PacketData {
        pid: 0x1ff,
        continuity_counter: 3,
        pcr: Some(1_000),
        pts: None,
    };
    let mut cue = Cue::new(SpliceCommand::SpliceNull).with_packet_data(packet_data);
    assert_eq!(cue.encode_base64().unwrap(), "/DARAAAAAAAAAP/wAAAAAHpPv/8=");
    assert_eq!(cue.packet_data, Some(packet_data));
}
