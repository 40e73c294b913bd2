//! Property-based tests for the EBML codecs.
//!
//! Uses proptest to check VarInt and element-ID round trips and that the
//! scanner never panics on arbitrary input.

use proptest::prelude::*;
use webmfix_core::format::{
    DURATION_ID, INFO_ID, MAX_VINT_VALUE, SEGMENT_ID, TIMECODE_SCALE_ID,
};
use webmfix_core::vint::{decode_var_int, encode_element_id, encode_var_int, read_element_id};
use webmfix_core::{patch, scan_element};

// =============================================================================
// Fixed cases
// =============================================================================

#[test]
fn var_int_known_widths() {
    let cases: [(u64, usize); 8] = [
        (0, 1),
        (1, 1),
        (126, 1),
        (127, 2),
        (128, 2),
        (16383, 3),
        (16384, 3),
        ((1 << 49) - 1, 8),
    ];
    for (value, width) in cases {
        let bytes = encode_var_int(value).unwrap();
        assert_eq!(bytes.len(), width, "width of {value}");
        assert_eq!(decode_var_int(&bytes, 0).unwrap(), (value, width));
    }
}

#[test]
fn protocol_ids_round_trip() {
    for (id, width) in [(SEGMENT_ID, 4), (INFO_ID, 4), (TIMECODE_SCALE_ID, 3), (DURATION_ID, 2)] {
        let bytes = encode_element_id(id).unwrap();
        assert_eq!(read_element_id(&bytes, 0).unwrap(), (id, width));
    }
    assert_eq!(encode_element_id(SEGMENT_ID).unwrap(), vec![0x18, 0x53, 0x80, 0x67]);
}

// =============================================================================
// Round trips
// =============================================================================

proptest! {
    /// Every representable value decodes back with the width it was given.
    #[test]
    fn roundtrip_var_int(value in 0u64..=MAX_VINT_VALUE) {
        let bytes = encode_var_int(value).unwrap();
        let (decoded, width) = decode_var_int(&bytes, 0).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(width, bytes.len());
    }

    /// The chosen width is minimal: one octet less could not carry the value.
    #[test]
    fn var_int_width_is_minimal(value in 0u64..=MAX_VINT_VALUE) {
        let width = encode_var_int(value).unwrap().len();
        if width > 1 {
            let smaller_max = (1u64 << (7 * (width - 1))) - 2;
            prop_assert!(value > smaller_max);
        }
    }

    /// Decoding at an offset ignores the surrounding bytes.
    #[test]
    fn var_int_at_offset(prefix in proptest::collection::vec(any::<u8>(), 0..16), value in 0u64..1_000_000) {
        let mut buf = prefix.clone();
        buf.extend(encode_var_int(value).unwrap());
        buf.extend_from_slice(&[0xAA, 0xBB]);
        let (decoded, _) = decode_var_int(&buf, prefix.len()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    /// Scanning and patching arbitrary bytes never panics.
    #[test]
    fn arbitrary_input_is_safe(bytes in proptest::collection::vec(any::<u8>(), 0..256), pos in 0usize..300) {
        let _ = scan_element(&bytes, pos);
        let outcome = patch(&bytes, 1000.0, None);
        if !outcome.is_patched() {
            prop_assert!(std::ptr::eq(outcome.as_bytes(), bytes.as_slice()));
        }
    }
}
