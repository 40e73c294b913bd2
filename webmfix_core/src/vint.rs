//! EBML variable-length integers.
//!
//! Both element sizes and element IDs use the same leading-bit width marker:
//!
//! ```text
//! 1xxxxxxx                    1 octet,  7 data bits
//! 01xxxxxx xxxxxxxx           2 octets, 14 data bits
//! 001xxxxx xxxxxxxx xxxxxxxx  3 octets, 21 data bits
//! ...
//! 00000001 xxxxxxxx ...       8 octets, 56 data bits
//! ```
//!
//! Sizes drop the marker bit from the value. IDs keep it: an ID is the raw
//! octets read as a big-endian integer.

use crate::error::EbmlError;
use crate::format::{MAX_ID_WIDTH, MAX_VINT_WIDTH};

/// Width announced by a leading octet, or `None` for `0x00`.
#[inline]
fn marker_width(first: u8) -> Option<usize> {
    match first {
        0 => None,
        b => Some(b.leading_zeros() as usize + 1),
    }
}

/// Decode a VarInt size at `pos`, returning `(value, width)`.
pub fn decode_var_int(buf: &[u8], pos: usize) -> Result<(u64, usize), EbmlError> {
    let first = *buf.get(pos).ok_or(EbmlError::TruncatedVarInt { offset: pos })?;
    let width = marker_width(first).ok_or(EbmlError::InvalidVarIntMarker { offset: pos })?;

    let digits = buf
        .get(pos + 1..pos + width)
        .ok_or(EbmlError::TruncatedVarInt { offset: pos })?;

    // width 8 leaves no data bits in the first octet
    let mask = (0xFFu16 >> width) as u8;
    let value = digits
        .iter()
        .fold((first & mask) as u64, |acc, &b| (acc << 8) | b as u64);

    Ok((value, width))
}

/// Smallest VarInt width able to carry `value` without hitting the
/// all-ones pattern of that width.
pub fn var_int_width(value: u64) -> Result<usize, EbmlError> {
    (1..=MAX_VINT_WIDTH)
        .find(|&w| value < (1u64 << (7 * w)) - 1)
        .ok_or(EbmlError::VarIntOverflow { value })
}

/// Encode `value` as a minimal-width VarInt size.
///
/// Fails for values above [`crate::format::MAX_VINT_VALUE`]; the unknown-size
/// pattern is never emitted.
pub fn encode_var_int(value: u64) -> Result<Vec<u8>, EbmlError> {
    let width = var_int_width(value)?;

    let be = value.to_be_bytes();
    let mut out = be[8 - width..].to_vec();
    out[0] |= 0x80 >> (width - 1);
    Ok(out)
}

/// Read an element ID at `pos`, returning `(id, width)`.
pub fn read_element_id(buf: &[u8], pos: usize) -> Result<(u32, usize), EbmlError> {
    let first = *buf.get(pos).ok_or(EbmlError::TruncatedElementId { offset: pos })?;
    let width = marker_width(first)
        .filter(|&w| w <= MAX_ID_WIDTH)
        .ok_or(EbmlError::InvalidElementIdMarker { offset: pos })?;

    let raw = buf
        .get(pos..pos + width)
        .ok_or(EbmlError::TruncatedElementId { offset: pos })?;

    let id = raw.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
    Ok((id, width))
}

/// Serialize an element ID as its minimal big-endian octets.
///
/// The marker bits are already part of the numeric constant, so `0x18538067`
/// becomes `18 53 80 67`. IDs whose marker does not match their octet count
/// are rejected.
pub fn encode_element_id(id: u32) -> Result<Vec<u8>, EbmlError> {
    let be = id.to_be_bytes();
    let start = be
        .iter()
        .position(|&b| b != 0)
        .ok_or(EbmlError::InvalidElementId { id })?;
    let bytes = &be[start..];

    match marker_width(bytes[0]) {
        Some(w) if w == bytes.len() => Ok(bytes.to_vec()),
        _ => Err(EbmlError::InvalidElementId { id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MAX_VINT_VALUE;

    #[test]
    fn sentinel_boundary_bumps_width() {
        // 0x7F is the 1-octet unknown-size pattern
        assert_eq!(encode_var_int(126).unwrap(), vec![0xFE]);
        assert_eq!(encode_var_int(127).unwrap(), vec![0x40, 0x7F]);
        assert_eq!(encode_var_int(0x3FFE).unwrap(), vec![0x7F, 0xFE]);
        assert_eq!(encode_var_int(0x3FFF).unwrap(), vec![0x20, 0x3F, 0xFF]);
    }

    #[test]
    fn eight_octet_sentinel_is_rejected() {
        let max = encode_var_int(MAX_VINT_VALUE).unwrap();
        assert_eq!(max, vec![0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(
            encode_var_int(MAX_VINT_VALUE + 1),
            Err(EbmlError::VarIntOverflow { value: MAX_VINT_VALUE + 1 })
        );
    }

    #[test]
    fn decode_accepts_unknown_size_pattern() {
        let buf = [0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(decode_var_int(&buf, 0).unwrap(), ((1u64 << 56) - 1, 8));
    }

    #[test]
    fn decode_rejects_zero_and_truncation() {
        assert_eq!(
            decode_var_int(&[0x00, 0x81], 0),
            Err(EbmlError::InvalidVarIntMarker { offset: 0 })
        );
        assert_eq!(
            decode_var_int(&[0x81, 0x40], 1),
            Err(EbmlError::TruncatedVarInt { offset: 1 })
        );
        assert_eq!(decode_var_int(&[], 0), Err(EbmlError::TruncatedVarInt { offset: 0 }));
    }

    #[test]
    fn element_id_width_is_capped() {
        assert_eq!(
            read_element_id(&[0x08, 0, 0, 0, 0], 0),
            Err(EbmlError::InvalidElementIdMarker { offset: 0 })
        );
        assert_eq!(
            read_element_id(&[0x1A, 0x45], 0),
            Err(EbmlError::TruncatedElementId { offset: 0 })
        );
    }

    #[test]
    fn non_canonical_ids_are_rejected() {
        assert!(encode_element_id(0).is_err());
        assert!(encode_element_id(0x0100).is_err());
        assert!(encode_element_id(0x0100_0000).is_err());
        assert!(encode_element_id(0x0A45_DFA3).is_err());
        assert_eq!(encode_element_id(0xEC).unwrap(), vec![0xEC]);
    }
}
