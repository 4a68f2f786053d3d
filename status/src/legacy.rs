//! Legacy status codes, retained alongside the namespaced registry.
//!
//! Legacy values are frozen for wire compatibility and remain valid outputs in
//! their own right, each is associated with one canonical registry code.

use crate::{Error, StatusCode, StatusWord};

/// Legacy single-byte status codes
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    displaydoc::Display,
    num_enum::TryFromPrimitive,
    num_enum::IntoPrimitive,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum LegacyCode {
    /// Generic exception
    Exception = 0x01,
    /// Invalid parameter
    InvalidParameter = 0x02,
    /// Security exception
    ExceptionSecurity = 0x03,
    /// Invalid state
    InvalidState = 0x04,
    /// Reset during I/O
    ExceptionIoReset = 0x05,
    /// Not enough space
    NotEnoughSpace = 0x06,
    /// Overflow exception
    ExceptionOverflow = 0x07,
    /// Invalid CRC
    InvalidCrc = 0x08,
    /// Invalid checksum
    InvalidChecksum = 0x09,
    /// Invalid counter
    InvalidCounter = 0x0A,
    /// Not supported
    NotSupported = 0x0B,
    /// Timeout
    Timeout = 0x0C,
    /// Position independent code exception
    ExceptionPic = 0x0D,
    /// Application exit
    ExceptionAppExit = 0x0E,
    /// I/O overflow
    ExceptionIoOverflow = 0x0F,
    /// I/O header exception
    ExceptionIoHeader = 0x10,
    /// I/O state exception
    ExceptionIoState = 0x11,
    /// Cross-port exception
    ExceptionCxport = 0x12,
    /// System exception
    ExceptionSystem = 0x13,
}

impl LegacyCode {
    /// All legacy codes, in value order
    pub const ALL: [LegacyCode; 19] = [
        Self::Exception,
        Self::InvalidParameter,
        Self::ExceptionSecurity,
        Self::InvalidState,
        Self::ExceptionIoReset,
        Self::NotEnoughSpace,
        Self::ExceptionOverflow,
        Self::InvalidCrc,
        Self::InvalidChecksum,
        Self::InvalidCounter,
        Self::NotSupported,
        Self::Timeout,
        Self::ExceptionPic,
        Self::ExceptionAppExit,
        Self::ExceptionIoOverflow,
        Self::ExceptionIoHeader,
        Self::ExceptionIoState,
        Self::ExceptionCxport,
        Self::ExceptionSystem,
    ];

    /// Fetch the canonical registry code associated with a legacy code
    pub const fn canonical(self) -> StatusCode {
        match self {
            Self::Exception => StatusCode::MUI_UNK_01,
            Self::InvalidParameter => StatusCode::CRY_LEN_01,
            Self::ExceptionSecurity => StatusCode::MUI_UNK_02,
            Self::InvalidState => StatusCode::CRY_VAL_01,
            Self::ExceptionIoReset => StatusCode::IOL_RST_01,
            Self::NotEnoughSpace => StatusCode::CRY_VAL_01,
            Self::ExceptionOverflow => StatusCode::MUI_UNK_03,
            Self::InvalidCrc => StatusCode::MUI_UNK_0C,
            Self::InvalidChecksum => StatusCode::MUI_UNK_0D,
            Self::InvalidCounter => StatusCode::MUI_UNK_0E,
            Self::NotSupported => StatusCode::MUI_UNK_0F,
            Self::Timeout => StatusCode::MUI_UNK_10,
            Self::ExceptionPic => StatusCode::MUI_UNK_11,
            Self::ExceptionAppExit => StatusCode::MUI_UNK_12,
            Self::ExceptionIoOverflow => StatusCode::MUI_UNK_13,
            Self::ExceptionIoHeader => StatusCode::MUI_UNK_14,
            Self::ExceptionIoState => StatusCode::MUI_UNK_15,
            Self::ExceptionCxport => StatusCode::MUI_UNK_16,
            Self::ExceptionSystem => StatusCode::MUI_UNK_17,
        }
    }

    /// Resolve a legacy code from a two-byte status word
    pub fn from_word(value: u16) -> Result<Self, Error> {
        u8::try_from(value)
            .ok()
            .and_then(|v| Self::try_from(v).ok())
            .ok_or(Error::Unmapped(StatusWord::new(value)))
    }

    /// Snake-case legacy code name
    pub fn name(&self) -> &'static str {
        (*self).into()
    }
}

/// Map a legacy status code to its canonical registry code
pub fn legacy_to_canonical(old: u16) -> Result<StatusCode, Error> {
    LegacyCode::from_word(old).map(LegacyCode::canonical)
}

// Legacy values are frozen
const _: () = {
    let mut i = 0;
    while i < LegacyCode::ALL.len() {
        assert!(LegacyCode::ALL[i] as usize == i + 1, "legacy code moved");
        i += 1;
    }
};

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn legacy_io_reset() {
        let c = legacy_to_canonical(0x5).unwrap();
        assert_eq!(c.value(), 0x1401);
        assert_eq!(c, StatusCode::IOL_RST_01);
    }

    #[test]
    fn legacy_unmapped() {
        for v in [0x00, 0x14, 0x20, 0x0105, 0x9000, 0x1401] {
            assert_eq!(
                legacy_to_canonical(v),
                Err(Error::Unmapped(StatusWord::new(v))),
                "value 0x{v:04x}"
            );
        }
    }

    #[test]
    fn legacy_domain() {
        let mapped: Vec<_> = (0x0000..=0xFFFF)
            .filter(|v| legacy_to_canonical(*v).is_ok())
            .collect();
        assert_eq!(mapped, (0x01..=0x13).collect::<Vec<u16>>());
    }

    #[test]
    fn legacy_values_frozen() {
        let expected = [
            (LegacyCode::Exception, 0x01, 0xA001),
            (LegacyCode::InvalidParameter, 0x02, 0x3101),
            (LegacyCode::ExceptionSecurity, 0x03, 0xA002),
            (LegacyCode::InvalidState, 0x04, 0x3201),
            (LegacyCode::ExceptionIoReset, 0x05, 0x1401),
            (LegacyCode::NotEnoughSpace, 0x06, 0x3201),
            (LegacyCode::ExceptionOverflow, 0x07, 0xA003),
            (LegacyCode::InvalidCrc, 0x08, 0xA00C),
            (LegacyCode::InvalidChecksum, 0x09, 0xA00D),
            (LegacyCode::InvalidCounter, 0x0A, 0xA00E),
            (LegacyCode::NotSupported, 0x0B, 0xA00F),
            (LegacyCode::Timeout, 0x0C, 0xA010),
            (LegacyCode::ExceptionPic, 0x0D, 0xA011),
            (LegacyCode::ExceptionAppExit, 0x0E, 0xA012),
            (LegacyCode::ExceptionIoOverflow, 0x0F, 0xA013),
            (LegacyCode::ExceptionIoHeader, 0x10, 0xA014),
            (LegacyCode::ExceptionIoState, 0x11, 0xA015),
            (LegacyCode::ExceptionCxport, 0x12, 0xA016),
            (LegacyCode::ExceptionSystem, 0x13, 0xA017),
        ];

        for (l, v, c) in expected {
            assert_eq!(u8::from(l), v);
            assert_eq!(l.canonical().value(), c, "{l:?}");
        }

        assert_eq!(LegacyCode::iter().count(), LegacyCode::ALL.len());
        assert!(LegacyCode::iter().eq(LegacyCode::ALL));
    }

    #[test]
    fn legacy_codes_are_not_success() {
        for l in LegacyCode::ALL {
            assert!(!StatusWord::from(l).is_success());
            assert!(!l.canonical().is_success());
        }
    }

    #[test]
    fn legacy_names() {
        assert_eq!(LegacyCode::ExceptionIoReset.name(), "exception_io_reset");
        assert_eq!(LegacyCode::ExceptionIoReset.to_string(), "Reset during I/O");
    }
}
