pub mod error;
pub mod format;
pub mod inspect;
pub mod logger;
pub mod patcher;
pub mod reader;
pub mod scalar;
pub mod vint;
pub mod writer;

pub use error::{EbmlError, PatchError};
pub use format::Element;
pub use inspect::{inspect, InfoReport};
pub use logger::{Logger, MemoryLogger};
pub use patcher::{patch, patch_with_scale, PatchOutcome};
pub use reader::{scan_element, Children};
