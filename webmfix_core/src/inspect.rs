use serde::Serialize;

use crate::error::PatchError;
use crate::format::{DURATION_ID, TIMECODE_SCALE_ID};
use crate::patcher::locate;
use crate::reader::Children;
use crate::scalar::{decode_float, decode_uint};

/// Read-only view of the parts of a file the patcher touches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoReport {
    pub header_len: u64,
    pub segment_offset: usize,
    /// Declared Segment payload size; `None` for the unknown-size pattern or
    /// any size running past the end of the buffer.
    pub segment_size: Option<u64>,
    pub info_offset: usize,
    pub info_size: u64,
    pub timecode_scale: Option<u64>,
    /// Raw Duration value, in TimecodeScale ticks.
    pub duration: Option<f64>,
    /// IDs of the remaining Info children, in file order.
    pub other_children: Vec<u32>,
}

impl InfoReport {
    /// Duration in milliseconds, when both Duration and TimecodeScale are set.
    pub fn duration_ms(&self) -> Option<f64> {
        match (self.duration, self.timecode_scale) {
            (Some(d), Some(scale)) => Some(d * scale as f64 / 1_000_000.0),
            _ => None,
        }
    }
}

/// Locate `Info` the way [`crate::patch`] does and decode what it holds.
///
/// Fails with the same [`PatchError`] the patcher would report.
pub fn inspect(raw: &[u8]) -> Result<InfoReport, PatchError> {
    let layout = locate(raw)?;

    let mut report = InfoReport {
        header_len: layout.header.total_len,
        segment_offset: layout.segment_pos,
        segment_size: (!layout.segment.overruns(raw.len())).then_some(layout.segment.data_len),
        info_offset: layout.info_pos,
        info_size: layout.info.data_len,
        timecode_scale: None,
        duration: None,
        other_children: Vec::new(),
    };

    for (_, el) in Children::of(raw, &layout.info) {
        let payload = &raw[el.data_start..el.data_end_within(raw.len())];
        match el.id {
            TIMECODE_SCALE_ID => report.timecode_scale = decode_uint(payload),
            DURATION_ID => report.duration = decode_float(payload),
            other => report.other_children.push(other),
        }
    }

    Ok(report)
}
