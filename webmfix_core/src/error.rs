use thiserror::Error;

/// Failures of the low-level EBML codecs and the element scanner.
///
/// Offsets are absolute positions within the buffer being decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EbmlError {
    /// A VarInt size ran past the end of the buffer.
    #[error("truncated VarInt at offset {offset}")]
    TruncatedVarInt { offset: usize },

    /// First octet of a VarInt was zero (width beyond 8 octets).
    #[error("invalid VarInt marker at offset {offset}")]
    InvalidVarIntMarker { offset: usize },

    /// An element ID ran past the end of the buffer.
    #[error("truncated element ID at offset {offset}")]
    TruncatedElementId { offset: usize },

    /// First octet of an element ID was zero or announced more than 4 octets.
    #[error("invalid element ID marker at offset {offset}")]
    InvalidElementIdMarker { offset: usize },

    /// The value needs the reserved all-ones pattern or more than 8 octets.
    #[error("value {value} does not fit an 8-octet VarInt")]
    VarIntOverflow { value: u64 },

    /// The numeric ID is not a canonical 1–4 octet EBML ID.
    #[error("0x{id:X} is not a valid EBML element ID")]
    InvalidElementId { id: u32 },
}

/// Reasons a patch was not applied.
///
/// The `Display` strings are the diagnostics handed to the patch logger.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchError {
    #[error("No EBML header found")]
    MalformedHeader,

    #[error("Segment element not found at expected position")]
    MissingSegment,

    #[error("Info element not found inside Segment")]
    MissingInfo,

    #[error("failed to re-encode element: {0}")]
    Encode(#[from] EbmlError),
}
