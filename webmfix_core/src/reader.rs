use crate::error::EbmlError;
use crate::format::Element;
use crate::vint::{decode_var_int, read_element_id};

/// Parse the element header at `pos`: an element ID followed by a VarInt size.
///
/// Only the header has to be present in `buf`; the payload may be truncated
/// or declared with the unknown-size pattern. The scanner knows nothing about
/// nesting, so callers advance by `total_len` and stop at the parent's end.
pub fn scan_element(buf: &[u8], pos: usize) -> Result<Element, EbmlError> {
    let (id, id_len) = read_element_id(buf, pos)?;
    let (data_len, size_len) = decode_var_int(buf, pos + id_len)?;
    let header_len = id_len + size_len;

    Ok(Element {
        id,
        data_start: pos + header_len,
        data_len,
        header_len,
        total_len: header_len as u64 + data_len,
    })
}

/// Sequential walk over a sibling list within `[start, end)`.
///
/// # Termination
/// The walk ends at the first position that fails to scan, or once the cursor
/// reaches `end`. Scan failures are not reported; a corrupt tail simply ends
/// the list.
///
/// Yields `(position, element)` where `position` is the first header byte.
pub struct Children<'a> {
    buf: &'a [u8],
    cursor: u64,
    end: u64,
}

impl<'a> Children<'a> {
    /// `end` is clamped to the buffer length.
    pub fn new(buf: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            buf,
            cursor: start as u64,
            end: end.min(buf.len()) as u64,
        }
    }

    /// Children of `parent`, bounded by its declared payload end.
    pub fn of(buf: &'a [u8], parent: &Element) -> Self {
        Self::new(buf, parent.data_start, parent.data_end_within(buf.len()))
    }
}

impl Iterator for Children<'_> {
    type Item = (usize, Element);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.end {
            return None;
        }
        let pos = self.cursor as usize;
        match scan_element(self.buf, pos) {
            Ok(el) => {
                self.cursor = self.cursor.saturating_add(el.total_len);
                Some((pos, el))
            }
            Err(err) => {
                tracing::debug!(offset = pos, %err, "sibling scan stopped");
                self.cursor = self.end;
                None
            }
        }
    }
}
