//! Status code ranges, the top-level category of a status code

/// Mask selecting the range nibble of a status code
pub const RANGE_MASK: u16 = 0xF000;

/// Status code ranges, occupying the most significant nibble of a status code.
///
/// Ranges up to [Range::Misc] are reserved for the operating system, the
/// `0xB000` - `0xEFFF` ranges are left for applications wanting the same
/// uniqueness mechanism for their own codes.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    displaydoc::Display,
    num_enum::TryFromPrimitive,
    num_enum::IntoPrimitive,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum Range {
    /// I/O transport issues
    Io = 0x1000,
    /// Task and scheduling issues
    Task = 0x2000,
    /// Cryptography parameter issues
    Crypto = 0x3000,
    /// OS parameter issues
    Param = 0x4000,
    /// Security issues
    Security = 0x5000,
    /// APDU command header issues
    Apdu = 0x6000,
    /// Miscellaneous unexplained issues
    Misc = 0xA000,
    /// Application reserved range 1
    App01 = 0xB000,
    /// Application reserved range 2
    App02 = 0xC000,
    /// Application reserved range 3
    App03 = 0xD000,
    /// Application reserved range 4
    App04 = 0xE000,
}

impl Range {
    /// Fetch the numeric base of the range
    pub const fn base(&self) -> u16 {
        *self as u16
    }

    /// Check whether the range is reserved for applications
    pub const fn is_application(&self) -> bool {
        matches!(self, Self::App01 | Self::App02 | Self::App03 | Self::App04)
    }

    /// Short tag used when building code mnemonics (`SEC` in `SEC_PIN_05`)
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Io => "IOL",
            Self::Task => "TSK",
            Self::Crypto => "CRY",
            Self::Param => "PAR",
            Self::Security => "SEC",
            Self::Apdu => "APD",
            Self::Misc => "MUI",
            Self::App01 => "APP1",
            Self::App02 => "APP2",
            Self::App03 => "APP3",
            Self::App04 => "APP4",
        }
    }

    /// Snake-case name of the range, as accepted by [core::str::FromStr]
    pub fn name(&self) -> &'static str {
        (*self).into()
    }
}

/// Application reserved ranges, the operating system never assigns
/// meaning to codes within these.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    displaydoc::Display,
    num_enum::TryFromPrimitive,
    num_enum::IntoPrimitive,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum AppRange {
    /// Application reserved range 1
    App01 = 0xB000,
    /// Application reserved range 2
    App02 = 0xC000,
    /// Application reserved range 3
    App03 = 0xD000,
    /// Application reserved range 4
    App04 = 0xE000,
}

impl AppRange {
    /// Fetch the generic [Range] for an application range
    pub const fn range(&self) -> Range {
        match self {
            Self::App01 => Range::App01,
            Self::App02 => Range::App02,
            Self::App03 => Range::App03,
            Self::App04 => Range::App04,
        }
    }

    /// Convert a generic [Range] to an application range where possible
    pub const fn from_range(range: Range) -> Option<Self> {
        match range {
            Range::App01 => Some(Self::App01),
            Range::App02 => Some(Self::App02),
            Range::App03 => Some(Self::App03),
            Range::App04 => Some(Self::App04),
            _ => None,
        }
    }
}

impl From<AppRange> for Range {
    fn from(value: AppRange) -> Self {
        value.range()
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn ranges_are_aligned_and_distinct() {
        let ranges: Vec<_> = Range::iter().collect();

        for (i, a) in ranges.iter().enumerate() {
            assert_eq!(a.base() & !RANGE_MASK, 0, "{a:?} is not 0x1000 aligned");
            assert_ne!(a.base(), 0, "{a:?} uses the zero range");

            for b in &ranges[i + 1..] {
                assert_ne!(a.base(), b.base());
            }
        }
    }

    #[test]
    fn success_range_unused() {
        assert!(Range::try_from(0x9000u16).is_err());
    }

    #[test]
    fn application_ranges() {
        for r in AppRange::iter() {
            assert!(r.range().is_application());
            assert_eq!(r.range().base(), r as u16);
            assert_eq!(AppRange::from_range(r.range()), Some(r));
        }

        let os = Range::iter().filter(|r| !r.is_application()).count();
        assert_eq!(os, 7);
        assert_eq!(AppRange::from_range(Range::Security), None);
    }

    #[test]
    fn range_names() {
        assert_eq!(Range::Security.name(), "security");
        assert_eq!(Range::App02.name(), "app02");
        assert_eq!(Range::from_str("apdu"), Ok(Range::Apdu));
        assert!(Range::from_str("nope").is_err());
    }
}
