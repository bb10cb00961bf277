use thiserror::Error;

use super::metadata::{ECLevel, Version};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("version not found")]
    VersionNotFound(#[from] CapacityError),
    #[error("data too long: {bits} bits exceed capacity {capacity} of version {version}")]
    DataTooLong { version: Version, bits: usize, capacity: usize },
    #[error("invalid version {0}")]
    InvalidVersion(usize),
    #[error("invalid masking pattern {0}")]
    InvalidMaskingPattern(u8),
}

/// Why the capacity planner could not settle on a version.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum CapacityError {
    #[error("no version at level {ecl:?} holds {bits} bits")]
    NoCapacity { ecl: ECLevel, bits: usize },
    #[error("too large size: {bits} bits exceed the largest version at level {ecl:?}")]
    TooLargeSize { ecl: ECLevel, bits: usize },
}

pub type QRResult<T> = Result<T, QRError>;
