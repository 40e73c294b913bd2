/// Top-level EBML header element. Only skipped over, never interpreted.
pub const EBML_ID: u32 = 0x1A45_DFA3;

/// The single top-level Matroska element that holds all metadata and media.
pub const SEGMENT_ID: u32 = 0x1853_8067;

/// Segment child carrying file-level metadata.
pub const INFO_ID: u32 = 0x1549_A966;

/// Info child: nanoseconds per timestamp tick (unsigned integer).
pub const TIMECODE_SCALE_ID: u32 = 0x2A_D7B1;

/// Info child: playback length in ticks (IEEE-754 float).
pub const DURATION_ID: u32 = 0x4489;

/// Canonical TimecodeScale: one tick per millisecond.
pub const TIMECODE_SCALE_NS: u64 = 1_000_000;

/// Widest VarInt size field, in octets.
pub const MAX_VINT_WIDTH: usize = 8;

/// Widest element ID, in octets.
pub const MAX_ID_WIDTH: usize = 4;

/// Largest value an 8-octet VarInt may carry. `2^56 - 1` is the reserved
/// "unknown size" pattern and is never written.
pub const MAX_VINT_VALUE: u64 = (1 << 56) - 2;

// ── Element ────────────────────────────────────────────────────────────────

/// Parsed header of one EBML element.
///
/// Positions are absolute within the buffer that was scanned. The scanner does
/// not check that `data_start + data_len` lies inside the buffer; use
/// [`Element::data_end_within`] when slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub id: u32,
    /// Offset of the first payload byte.
    pub data_start: usize,
    /// Declared payload length.
    pub data_len: u64,
    /// Bytes taken by the ID plus the size field.
    pub header_len: usize,
    /// `header_len + data_len`.
    pub total_len: u64,
}

impl Element {
    /// Payload end, clamped to `buf_len`.
    ///
    /// Live recorders write Segment and Cluster with the unknown-size pattern,
    /// so the declared length routinely overshoots the buffer.
    pub fn data_end_within(&self, buf_len: usize) -> usize {
        let declared = (self.data_start as u64).saturating_add(self.data_len);
        declared.min(buf_len as u64) as usize
    }

    /// Whether the declared payload runs past `buf_len`.
    pub fn overruns(&self, buf_len: usize) -> bool {
        (self.data_start as u64).saturating_add(self.data_len) > buf_len as u64
    }
}
