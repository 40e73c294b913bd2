use std::borrow::Cow;

use crate::error::PatchError;
use crate::format::{Element, INFO_ID, SEGMENT_ID, TIMECODE_SCALE_NS};
use crate::logger::{emit, Logger};
use crate::reader::{scan_element, Children};
use crate::writer::{rebuild_info_payload, write_element};

/// Result of [`patch`].
///
/// A patch either produces a fresh buffer or hands back the caller's own
/// slice. `Unchanged::original` is the exact input slice (pointer-equal), so
/// callers that only care whether anything happened can compare references.
#[derive(Debug)]
pub enum PatchOutcome<'a> {
    Patched(Vec<u8>),
    Unchanged {
        original: &'a [u8],
        reason: PatchError,
    },
}

impl<'a> PatchOutcome<'a> {
    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched(_))
    }

    /// The output bytes, patched or not.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PatchOutcome::Patched(bytes) => bytes,
            PatchOutcome::Unchanged { original, .. } => original,
        }
    }

    pub fn into_bytes(self) -> Cow<'a, [u8]> {
        match self {
            PatchOutcome::Patched(bytes) => Cow::Owned(bytes),
            PatchOutcome::Unchanged { original, .. } => Cow::Borrowed(original),
        }
    }

    /// Why the patch was skipped, if it was.
    pub fn reason(&self) -> Option<PatchError> {
        match self {
            PatchOutcome::Patched(_) => None,
            PatchOutcome::Unchanged { reason, .. } => Some(*reason),
        }
    }
}

/// Where the patcher found things. Shared with the inspector.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub header: Element,
    pub segment_pos: usize,
    pub segment: Element,
    pub info_pos: usize,
    pub info: Element,
}

/// Walk `EBML header → Segment → Info`, scanning no deeper than needed.
pub(crate) fn locate(raw: &[u8]) -> Result<Layout, PatchError> {
    let header = scan_element(raw, 0).map_err(|_| PatchError::MalformedHeader)?;

    // The header's declared length positions the Segment; an absurd size
    // simply fails the next scan.
    let segment_pos =
        usize::try_from(header.total_len).map_err(|_| PatchError::MissingSegment)?;
    let segment = scan_element(raw, segment_pos)
        .ok()
        .filter(|el| el.id == SEGMENT_ID)
        .ok_or(PatchError::MissingSegment)?;
    tracing::debug!(
        offset = segment_pos,
        data_len = segment.data_len,
        clamped = segment.overruns(raw.len()),
        "found Segment"
    );

    let (info_pos, info) = Children::of(raw, &segment)
        .find(|(_, el)| el.id == INFO_ID)
        .ok_or(PatchError::MissingInfo)?;
    tracing::debug!(offset = info_pos, data_len = info.data_len, "found Info");

    Ok(Layout {
        header,
        segment_pos,
        segment,
        info_pos,
        info,
    })
}

/// Rewrite `raw` so its `Info` carries `TimecodeScale = 1_000_000` and
/// `Duration = duration_ms`.
///
/// Never fails: a buffer the patcher cannot make sense of comes back as
/// [`PatchOutcome::Unchanged`] and one diagnostic goes to `logger`.
pub fn patch<'a>(
    raw: &'a [u8],
    duration_ms: f64,
    logger: Option<&dyn Logger>,
) -> PatchOutcome<'a> {
    patch_with_scale(raw, duration_ms, TIMECODE_SCALE_NS, logger)
}

/// [`patch`] with an explicit TimecodeScale. `duration` is in ticks of
/// `timecode_scale` nanoseconds.
pub fn patch_with_scale<'a>(
    raw: &'a [u8],
    duration: f64,
    timecode_scale: u64,
    logger: Option<&dyn Logger>,
) -> PatchOutcome<'a> {
    match splice(raw, duration, timecode_scale) {
        Ok(bytes) => {
            let message = if timecode_scale == TIMECODE_SCALE_NS {
                format!("Duration patched to {} ms", duration)
            } else {
                format!("Duration patched to {} ticks of {} ns", duration, timecode_scale)
            };
            emit(logger, &message);
            tracing::debug!(before = raw.len(), after = bytes.len(), "patched");
            PatchOutcome::Patched(bytes)
        }
        Err(reason) => {
            emit(logger, &reason.to_string());
            tracing::debug!(%reason, "left unchanged");
            PatchOutcome::Unchanged {
                original: raw,
                reason,
            }
        }
    }
}

fn splice(raw: &[u8], duration: f64, timecode_scale: u64) -> Result<Vec<u8>, PatchError> {
    let Layout {
        segment_pos,
        segment,
        info_pos,
        info,
        ..
    } = locate(raw)?;

    let segment_end = segment.data_end_within(raw.len());
    let info_end = info.data_end_within(raw.len()).min(segment_end);

    let info_body =
        rebuild_info_payload(&raw[info.data_start..info_end], duration, timecode_scale)?;
    let new_info = write_element(INFO_ID, &info_body)?;

    // Info may claim more bytes than its Segment holds; never read past either.
    let after_info = &raw[info_end..segment_end];
    let mut segment_body =
        Vec::with_capacity((info_pos - segment.data_start) + new_info.len() + after_info.len());
    segment_body.extend_from_slice(&raw[segment.data_start..info_pos]);
    segment_body.extend_from_slice(&new_info);
    segment_body.extend_from_slice(after_info);

    let new_segment = write_element(SEGMENT_ID, &segment_body)?;

    // Empty when the Segment was clamped to the end of the buffer.
    let trailing = &raw[segment_end..];

    let mut out = Vec::with_capacity(segment_pos + new_segment.len() + trailing.len());
    out.extend_from_slice(&raw[..segment_pos]);
    out.extend_from_slice(&new_segment);
    out.extend_from_slice(trailing);
    Ok(out)
}
