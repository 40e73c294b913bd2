//! Payload encodings for EBML unsigned-integer and float elements.

/// Minimal big-endian encoding; zero is a single `0x00`.
pub fn encode_uint(value: u64) -> Vec<u8> {
    let be = value.to_be_bytes();
    let start = be.iter().position(|&b| b != 0).unwrap_or(7);
    be[start..].to_vec()
}

/// 8-octet big-endian IEEE-754. Matroska requires Duration as a binary float.
pub fn encode_f64(value: f64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode a big-endian unsigned payload of 0–8 octets. An empty payload is 0.
pub fn decode_uint(payload: &[u8]) -> Option<u64> {
    if payload.len() > 8 {
        return None;
    }
    Some(payload.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

/// Decode a 4- or 8-octet big-endian float payload.
pub fn decode_float(payload: &[u8]) -> Option<f64> {
    match payload.len() {
        4 => Some(f32::from_be_bytes(payload.try_into().ok()?) as f64),
        8 => Some(f64::from_be_bytes(payload.try_into().ok()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_is_minimal() {
        assert_eq!(encode_uint(0), vec![0x00]);
        assert_eq!(encode_uint(1000), vec![0x03, 0xE8]);
        assert_eq!(encode_uint(1_000_000), vec![0x0F, 0x42, 0x40]);
        assert_eq!(encode_uint(u64::MAX), vec![0xFF; 8]);
    }

    #[test]
    fn float_payloads() {
        assert_eq!(encode_f64(4321.0), [0x40, 0xB0, 0xE1, 0x00, 0, 0, 0, 0]);
        assert_eq!(decode_float(&encode_f64(9999.5)), Some(9999.5));
        assert_eq!(decode_float(&1.5f32.to_be_bytes()), Some(1.5));
        assert_eq!(decode_float(&[0x00; 3]), None);
    }
}
