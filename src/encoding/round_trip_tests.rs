//! Round-trip tests for the encoder.
//!
//! Real SCTE-35 payloads are decoded and re-encoded; the output must match the
//! original bytes exactly, CRC included.

use crate::cue::Cue;
use crate::descriptors::SpliceDescriptor;
use crate::encoding::Encodable;
use data_encoding::BASE64;

fn assert_round_trip(base64_payload: &str, description: &str) {
    let original_bytes = BASE64
        .decode(base64_payload.as_bytes())
        .expect("Failed to decode base64 payload");

    let mut cue = Cue::decode(&original_bytes).expect("Failed to parse SCTE-35 message");
    let decoded = cue.clone();

    let encoded_bytes = cue.encode().expect("Failed to encode SCTE-35 message");
    assert_eq!(
        original_bytes,
        encoded_bytes,
        "Round-trip failed for {description}: original {} bytes, encoded {} bytes",
        original_bytes.len(),
        encoded_bytes.len()
    );

    // Derived fields were already correct, so encoding changed nothing.
    assert_eq!(cue, decoded, "Derived fields drifted for {description}");

    // Encoding again without mutation is byte-identical.
    assert_eq!(cue.encode().unwrap(), encoded_bytes);
    assert_eq!(cue.encode_base64().unwrap(), base64_payload);

    // And the re-encoded bytes decode to the same object graph.
    assert_eq!(Cue::decode(&encoded_bytes).unwrap(), decoded);
}

#[test]
fn test_splice_null() {
    assert_round_trip("/DARAAAAAAAAAP/wAAAAAHpPv/8=", "splice null");
}

#[test]
fn test_time_signal() {
    assert_round_trip("/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==", "time signal");
}

#[test]
fn test_time_signal_with_avail_descriptor() {
    assert_round_trip(
        "/DAgAAAAAAAAAP/wBQb+Qjo1vQAKAAhDVUVJAAAE0iVuWvA=",
        "time signal with avail descriptor",
    );
}

#[test]
fn test_splice_insert() {
    assert_round_trip(
        "/DAlAAAAAAAAAP/wFAUAAAAEf+/+kybGyP4BSvaQAAEBAQAArky/3g==",
        "splice insert with break duration",
    );
}

#[test]
fn test_splice_insert_with_break_duration() {
    assert_round_trip(
        "/DAvAAAAAAAA///wFAVIAACPf+/+c2nALv4AUsz1AAAAAAAKAAhDVUVJAAABNWLbowo=",
        "splice insert with break duration and avail descriptor",
    );
}

#[test]
fn test_splice_insert_without_duration() {
    assert_round_trip(
        "/DAqAAAAAAAAAP/wDwUAAHn+f8/+QubGOQAAAAAACgAIQ1VFSQAAAADizteX",
        "splice insert without duration",
    );
}

#[test]
fn test_placement_opportunity_with_sub_segments() {
    assert_round_trip(
        "/DA2AAAAAAAA///wBQb+cr0AUAAgAh5DVUVJSAAAjn/PAAGlmbAICAAAAAAsoKGKNAIAmsm2waDx",
        "time signal with placement opportunity start",
    );
}

#[test]
fn test_placement_opportunity_without_sub_segments() {
    assert_round_trip(
        "/DA0AAAAAAAA///wBQb+cr0AUAAeAhxDVUVJSAAAjn/PAAGlmbAICAAAAAAsoKGKNAIAmsnRfg==",
        "placement opportunity start without sub-segment fields",
    );
}

#[test]
fn test_segmentation_with_empty_upid() {
    assert_round_trip(
        "/DAnAAAAAAAAAP/wBQb+AA27oAARAg9DVUVJAAAAAX+HCQA0AAE0xUZn",
        "segmentation descriptor with an empty ADI upid",
    );
}

#[test]
fn test_multiple_segmentation_descriptors() {
    assert_round_trip(
        "/DBIAAAAAAAA///wBQb+ek2ItgAyAhdDVUVJSAAAGH+fCAgAAAAALMvDRBEAAAIXQ1VFSUgAABl/nwgIAAAAACyk26AQAACZcuND",
        "two segmentation descriptors",
    );
    assert_round_trip(
        "/DBIAAAAAAAAAP/wBQb/tB67hgAyAhdDVUVJQAABEn+fCAgAAAAALzE8BTUAAAIXQ1VFSUAAAEV/nwgIAAAAAC8xPN4jAAAfiOPE",
        "two segmentation descriptors with a high PTS",
    );
    assert_round_trip(
        "/DBhAAAAAAAA///wBQb+qM1E7QBLAhdDVUVJSAAArX+fCAgAAAAALLLXnTUCAAIXQ1VFSUgAACZ/nwgIAAAAACyy150RAAACF0NVRUlIAAAnf58ICAAAAAAsstezEAAAihiGnw==",
        "three segmentation descriptors",
    );
}

#[test]
fn test_descriptor_loop_length_matches_encoded_descriptors() {
    let bytes = BASE64
        .decode(b"/DBhAAAAAAAA///wBQb+qM1E7QBLAhdDVUVJSAAArX+fCAgAAAAALLLXnTUCAAIXQ1VFSUgAACZ/nwgIAAAAACyy150RAAACF0NVRUlIAAAnf58ICAAAAAAsstezEAAAihiGnw==")
        .unwrap();
    let cue = Cue::decode(&bytes).unwrap();
    let total: usize = cue
        .splice_descriptors
        .iter()
        .map(SpliceDescriptor::encoded_size)
        .sum();
    assert_eq!(cue.splice_descriptors.len(), 3);
    assert_eq!(cue.descriptor_loop_length as usize, total);
}

#[test]
fn test_alignment_stuffing_is_preserved() {
    // splice null with two stuffing bytes before the CRC
    let mut cue = Cue::decode_str("/DARAAAAAAAAAP/wAAAAAHpPv/8=").unwrap();
    cue.alignment_stuffing = vec![0xff, 0xff];
    let bytes = cue.encode().unwrap();
    assert_eq!(cue.info_section.section_length, 0x13);
    assert_eq!(bytes.len(), 22);

    let decoded = Cue::decode(&bytes).unwrap();
    assert_eq!(decoded.alignment_stuffing, vec![0xff, 0xff]);
    assert_eq!(decoded, cue);
}
