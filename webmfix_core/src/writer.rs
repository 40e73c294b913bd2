use crate::error::EbmlError;
use crate::format::{DURATION_ID, TIMECODE_SCALE_ID};
use crate::reader::Children;
use crate::scalar::{encode_f64, encode_uint};
use crate::vint::{encode_element_id, encode_var_int};

/// Serialize one element: ID, minimal VarInt size, payload.
pub fn write_element(id: u32, payload: &[u8]) -> Result<Vec<u8>, EbmlError> {
    let id_bytes = encode_element_id(id)?;
    let size_bytes = encode_var_int(payload.len() as u64)?;

    let mut out = Vec::with_capacity(id_bytes.len() + size_bytes.len() + payload.len());
    out.extend_from_slice(&id_bytes);
    out.extend_from_slice(&size_bytes);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Rebuild the payload of an `Info` element.
///
/// # Output layout
/// ```text
/// [other children, original bytes and order]
/// [TimecodeScale = timecode_scale]   ← replaces the first one found, or appended
/// [Duration = duration, 8-byte float]
/// ```
///
/// Existing `Duration` children are dropped, as are any `TimecodeScale`
/// children after the first, so rebuilding an already rebuilt payload is a
/// no-op. Scanning stops at the first child that fails to parse and the bytes
/// from there on are lost. A child whose declared size runs past `body` is
/// kept up to the end of `body` and ends the scan.
pub fn rebuild_info_payload(
    body: &[u8],
    duration: f64,
    timecode_scale: u64,
) -> Result<Vec<u8>, EbmlError> {
    let mut out = Vec::with_capacity(body.len() + 32);
    let mut has_timecode_scale = false;

    for (pos, el) in Children::new(body, 0, body.len()) {
        match el.id {
            DURATION_ID => {}
            TIMECODE_SCALE_ID => {
                if !has_timecode_scale {
                    has_timecode_scale = true;
                    out.extend(write_element(TIMECODE_SCALE_ID, &encode_uint(timecode_scale))?);
                }
            }
            _ => out.extend_from_slice(&body[pos..el.data_end_within(body.len())]),
        }
    }

    if !has_timecode_scale {
        out.extend(write_element(TIMECODE_SCALE_ID, &encode_uint(timecode_scale))?);
    }
    out.extend(write_element(DURATION_ID, &encode_f64(duration))?);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_children_keep_their_bytes() {
        // MuxingApp "ab" with a 2-octet size field, then TimecodeScale = 1000
        let body = [0x4D, 0x80, 0x40, 0x02, b'a', b'b', 0x2A, 0xD7, 0xB1, 0x82, 0x03, 0xE8];
        let out = rebuild_info_payload(&body, 1.0, 1_000_000).unwrap();
        assert_eq!(&out[..6], &body[..6]);
        assert_eq!(&out[6..13], &[0x2A, 0xD7, 0xB1, 0x83, 0x0F, 0x42, 0x40]);
        assert_eq!(&out[13..16], &[0x44, 0x89, 0x88]);
        assert_eq!(out.len(), 24);
    }

    #[test]
    fn garbage_tail_is_dropped() {
        let body = [0x4D, 0x80, 0x81, b'x', 0x00, 0xFF, 0xFF];
        let out = rebuild_info_payload(&body, 2.0, 1_000_000).unwrap();
        assert_eq!(&out[..4], &body[..4]);
        assert_eq!(out.len(), 4 + 7 + 11);
    }
}
