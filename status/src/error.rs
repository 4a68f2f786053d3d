//! Registry error information for composition, decoding and lookups

use crate::StatusWord;

/// Status registry error type
#[derive(Copy, Clone, Debug, PartialEq, displaydoc::Display)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// Invalid buffer length
    InvalidLength,

    /// Identifier {0} outside of the allowed range
    IdentifierOutOfRange(u8),

    /// Application subcategory slot {0} outside of the allowed range
    SlotOutOfRange(u8),

    /// Status code {0} is not allocated in the registry
    Unallocated(StatusWord),

    /// Unknown status range {0}
    UnknownRange(StatusWord),

    /// Unknown subcategory in status word {0}
    UnknownSubcategory(StatusWord),

    /// Legacy code {0} is unmapped
    Unmapped(StatusWord),

    /// Status code {0} is defined more than once
    Collision(StatusWord),

    /// Registry block at {0} is empty, unordered or holds out of range identifiers
    MalformedBlock(StatusWord),

    /// Invalid range or subcategory name
    InvalidName,
}

impl From<encdec::Error> for Error {
    fn from(value: encdec::Error) -> Self {
        match value {
            encdec::Error::Length => Self::InvalidLength,
            encdec::Error::Utf8 => Self::InvalidName,
        }
    }
}
