//! Ledger device status word registry.
//!
//! Devices return a two-byte status word trailing each response, `0x9000` for
//! success or a code from the registry otherwise. Codes are laid out as `0xabcd`:
//!
//! - `a`: the [Range], the top-level category (`0x1000` multiples),
//! - `b`: the subcategory within the range (`0x0100` multiples), typed per range
//!   and paired with its range through [Category],
//! - `cd`: the identifier within the subcategory, `0x01..=0x2B`.
//!
//! Ranges `0xB000` - `0xEFFF` are reserved for applications wanting the same
//! uniqueness mechanism for their own codes (see [StatusCode::compose_app]).
//! Legacy single-byte codes ([LegacyCode]) remain valid and map to a canonical
//! registry code through [legacy_to_canonical].
//!
//! Every OS code is available as an associated constant on [StatusCode], and the
//! allocation is checked at build time so collisions fail compilation.
//!
//! ## Examples
//!
//! ```
//! use ledger_status::{Category, SecuritySub, StatusCode, StatusWord};
//!
//! // Compose a code from its category and identifier
//! let c = StatusCode::compose(Category::Security(SecuritySub::Pin), 0x05);
//! assert_eq!(c, StatusCode::SEC_PIN_05);
//! assert_eq!(c.value(), 0x5505);
//!
//! // Decode a status word received from a device
//! let sw = StatusWord::from_bytes([0x55, 0x05]);
//! let d = sw.describe();
//! assert_eq!((d.category, d.subcategory), ("security", "pin"));
//! ```
//!
//! Splitting a response payload from its status word:
//!
//! ```
//! use ledger_status::split_response;
//!
//! let (data, sw) = split_response(&[0xaa, 0xbb, 0x90, 0x00]).unwrap();
//! assert_eq!(data, &[0xaa, 0xbb]);
//! assert!(sw.is_success());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub use encdec::{DecodeOwned, Encode};

mod error;
pub use error::Error;

mod range;
pub use range::{AppRange, Range, RANGE_MASK};

mod category;
pub use category::{
    ApduSub, AppSlot, Category, CryptoSub, IoSub, ParamSub, SecuritySub, Subcategory,
    TaskSub, APP_SLOT_MAX, SUBCATEGORY_MASK,
};

mod code;
pub use code::{
    Components, Description, Mnemonic, StatusCode, StatusWord, ID_MASK, ID_MAX, ID_MIN,
};

#[macro_use]
pub mod registry;

#[cfg(feature = "ble")]
pub mod ble;

mod legacy;
pub use legacy::{legacy_to_canonical, LegacyCode};

mod wire;
pub use wire::{split_response, STATUS_LEN};

/// Compose a status code from a category and identifier, see [StatusCode::compose]
pub const fn compose(category: Category, identifier: u8) -> StatusCode {
    StatusCode::compose(category, identifier)
}

/// Split a status word into category and identifier, see [StatusWord::decompose]
pub fn decompose(value: u16) -> Result<Components, Error> {
    StatusWord::new(value).decompose()
}

/// Check whether a status word signals success
pub const fn is_success(value: u16) -> bool {
    StatusWord::new(value).is_success()
}

/// Describe a status word for diagnostics, see [StatusWord::describe]
pub fn describe(value: u16) -> Description {
    StatusWord::new(value).describe()
}
