//! Subcategories and the typed (range, subcategory) [Category] pairing

use core::str::FromStr;

use crate::{
    range::{AppRange, Range, RANGE_MASK},
    Error, StatusWord,
};

/// Mask selecting the subcategory byte of a status code
pub const SUBCATEGORY_MASK: u16 = 0x0F00;

/// Largest subcategory slot available within an application range
pub const APP_SLOT_MAX: u8 = 0x0F;

/// Application subcategory slot, a single nibble (`0x0..=0xF`)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct AppSlot(u8);

impl AppSlot {
    /// Create a slot, failing where the value does not fit the subcategory nibble
    pub const fn new(slot: u8) -> Result<Self, Error> {
        if slot > APP_SLOT_MAX {
            return Err(Error::SlotOutOfRange(slot));
        }
        Ok(Self(slot))
    }

    /// Fetch the slot value
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Fetch the slot offset within an application range
    pub const fn offset(&self) -> u16 {
        (self.0 as u16) << 8
    }
}

impl TryFrom<u8> for AppSlot {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppSlot> for u8 {
    fn from(value: AppSlot) -> Self {
        value.0
    }
}

impl core::fmt::Display for AppSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Common behaviour for per-range subcategory enumerations
pub trait Subcategory:
    Copy + Into<u16> + Into<&'static str> + TryFrom<u16> + FromStr + 'static
{
    /// Range owning this subcategory
    const RANGE: Range;

    /// Short tag used when building code mnemonics (`PIN` in `SEC_PIN_05`)
    fn mnemonic(&self) -> &'static str;

    /// Subcategory offset within the owning range
    fn offset(&self) -> u16 {
        <Self as Into<u16>>::into(*self)
    }

    /// Snake-case subcategory name
    fn name(&self) -> &'static str {
        <Self as Into<&'static str>>::into(*self)
    }
}

macro_rules! subcategory_derives {
    ($(#[$meta:meta])* pub enum $name:ident { $($body:tt)* }) => {
        $(#[$meta])*
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
        pub enum $name { $($body)* }
    };
}

subcategory_derives! {
    /// I/O transport subcategories
    pub enum IoSub {
        /// Overflow issues
        Overflow = 0x0100,
        /// Header issues
        Header = 0x0200,
        /// State issues
        State = 0x0300,
        /// Reset issues
        Reset = 0x0400,
        /// BLE link issues, codes only defined with the `ble` feature
        Ble = 0x0500,
    }
}

impl Subcategory for IoSub {
    const RANGE: Range = Range::Io;

    fn mnemonic(&self) -> &'static str {
        match self {
            Self::Overflow => "OFW",
            Self::Header => "HDR",
            Self::State => "STA",
            Self::Reset => "RST",
            Self::Ble => "BLE",
        }
    }
}

subcategory_derives! {
    /// Task subcategories
    pub enum TaskSub {
        /// Stack issues
        Stack = 0x0100,
        /// Task owner issues
        Owner = 0x0200,
        /// Overflow issues
        Overflow = 0x0300,
    }
}

impl Subcategory for TaskSub {
    const RANGE: Range = Range::Task;

    fn mnemonic(&self) -> &'static str {
        match self {
            Self::Stack => "STC",
            Self::Owner => "OWN",
            Self::Overflow => "OFW",
        }
    }
}

subcategory_derives! {
    /// Cryptography parameter subcategories
    pub enum CryptoSub {
        /// Length mismatch
        Length = 0x0100,
        /// Value mismatch
        Value = 0x0200,
    }
}

impl Subcategory for CryptoSub {
    const RANGE: Range = Range::Crypto;

    fn mnemonic(&self) -> &'static str {
        match self {
            Self::Length => "LEN",
            Self::Value => "VAL",
        }
    }
}

subcategory_derives! {
    /// OS parameter subcategories
    pub enum ParamSub {
        /// Length mismatch
        Length = 0x0100,
        /// Value mismatch
        Value = 0x0200,
    }
}

impl Subcategory for ParamSub {
    const RANGE: Range = Range::Param;

    fn mnemonic(&self) -> &'static str {
        match self {
            Self::Length => "LEN",
            Self::Value => "VAL",
        }
    }
}

subcategory_derives! {
    /// Security subcategories
    pub enum SecuritySub {
        /// Application registry issues
        App = 0x0100,
        /// Integrity check issues
        Crc = 0x0200,
        /// Miscellaneous security checks
        Check = 0x0300,
        /// Key operations
        Key = 0x0400,
        /// User consent and PIN operations
        Pin = 0x0500,
        /// Secure channel operations
        Scp = 0x0600,
        /// Signature operations
        Signature = 0x0700,
        /// Memory management operations
        Memory = 0x0800,
        /// Device state issues
        State = 0x0900,
    }
}

impl Subcategory for SecuritySub {
    const RANGE: Range = Range::Security;

    fn mnemonic(&self) -> &'static str {
        match self {
            Self::App => "APP",
            Self::Crc => "CRC",
            Self::Check => "CHK",
            Self::Key => "KEY",
            Self::Pin => "PIN",
            Self::Scp => "SCP",
            Self::Signature => "SIG",
            Self::Memory => "MEM",
            Self::State => "STA",
        }
    }
}

subcategory_derives! {
    /// APDU command header subcategories
    pub enum ApduSub {
        /// Other header checks
        Header = 0x0500,
        /// Operating system state
        State = 0x0600,
        /// Length issues
        Length = 0x0700,
        /// Transmitted data issues
        Data = 0x0800,
        /// Instruction issues
        Instruction = 0x0D00,
        /// Class issues
        Class = 0x0E00,
    }
}

impl Subcategory for ApduSub {
    const RANGE: Range = Range::Apdu;

    fn mnemonic(&self) -> &'static str {
        match self {
            Self::Header => "HDR",
            Self::State => "STA",
            Self::Length => "LEN",
            Self::Data => "DAT",
            Self::Instruction => "INS",
            Self::Class => "CLA",
        }
    }
}

/// A (range, subcategory) pair, subcategories are typed per range so
/// mismatched pairings are rejected at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Input / output (`0x1000`)
    Io(IoSub),
    /// Task management (`0x2000`)
    Task(TaskSub),
    /// Cryptographic parameters (`0x3000`)
    Crypto(CryptoSub),
    /// OS parameters (`0x4000`)
    Param(ParamSub),
    /// Security checks (`0x5000`)
    Security(SecuritySub),
    /// APDU handling (`0x6000`)
    Apdu(ApduSub),
    /// Unclassified issues, this range has no subcategories
    Misc,
    /// Application defined subcategory slot within an application range
    App(AppRange, AppSlot),
}

impl Category {
    /// Fetch the [Range] for a category
    pub const fn range(&self) -> Range {
        match self {
            Self::Io(_) => Range::Io,
            Self::Task(_) => Range::Task,
            Self::Crypto(_) => Range::Crypto,
            Self::Param(_) => Range::Param,
            Self::Security(_) => Range::Security,
            Self::Apdu(_) => Range::Apdu,
            Self::Misc => Range::Misc,
            Self::App(r, _) => r.range(),
        }
    }

    /// Fetch the subcategory offset (a multiple of `0x0100`) within the range
    pub const fn offset(&self) -> u16 {
        match self {
            Self::Io(s) => *s as u16,
            Self::Task(s) => *s as u16,
            Self::Crypto(s) => *s as u16,
            Self::Param(s) => *s as u16,
            Self::Security(s) => *s as u16,
            Self::Apdu(s) => *s as u16,
            Self::Misc => 0,
            Self::App(_, slot) => slot.offset(),
        }
    }

    /// Fetch the category base, the sum of range and subcategory offset
    pub const fn base(&self) -> u16 {
        self.range().base() + self.offset()
    }

    /// Resolve a category from the upper byte of a status word
    pub fn from_base(value: u16) -> Result<Self, Error> {
        let base = value & (RANGE_MASK | SUBCATEGORY_MASK);
        let offset = base & SUBCATEGORY_MASK;

        let range = Range::try_from(base & RANGE_MASK)
            .map_err(|_| Error::UnknownRange(StatusWord::new(base)))?;

        let c = match range {
            Range::Io => Self::Io(sub_from_offset(base)?),
            Range::Task => Self::Task(sub_from_offset(base)?),
            Range::Crypto => Self::Crypto(sub_from_offset(base)?),
            Range::Param => Self::Param(sub_from_offset(base)?),
            Range::Security => Self::Security(sub_from_offset(base)?),
            Range::Apdu => Self::Apdu(sub_from_offset(base)?),
            Range::Misc if offset == 0 => Self::Misc,
            Range::Misc => return Err(Error::UnknownSubcategory(StatusWord::new(base))),
            _ => match AppRange::from_range(range) {
                Some(r) => Self::App(r, AppSlot((offset >> 8) as u8)),
                None => return Err(Error::UnknownRange(StatusWord::new(base))),
            },
        };

        Ok(c)
    }

    /// Snake-case name of the subcategory
    pub fn subcategory_name(&self) -> &'static str {
        match self {
            Self::Io(s) => s.name(),
            Self::Task(s) => s.name(),
            Self::Crypto(s) => s.name(),
            Self::Param(s) => s.name(),
            Self::Security(s) => s.name(),
            Self::Apdu(s) => s.name(),
            Self::Misc => "unknown",
            Self::App(..) => "application",
        }
    }

    /// Short subcategory tag used in mnemonics
    pub fn subcategory_mnemonic(&self) -> &'static str {
        match self {
            Self::Io(s) => s.mnemonic(),
            Self::Task(s) => s.mnemonic(),
            Self::Crypto(s) => s.mnemonic(),
            Self::Param(s) => s.mnemonic(),
            Self::Security(s) => s.mnemonic(),
            Self::Apdu(s) => s.mnemonic(),
            Self::Misc => "UNK",
            Self::App(..) => "APP",
        }
    }
}

/// Resolve a typed subcategory from a category base
fn sub_from_offset<S: Subcategory>(base: u16) -> Result<S, Error> {
    S::try_from(base & SUBCATEGORY_MASK)
        .map_err(|_| Error::UnknownSubcategory(StatusWord::new(base)))
}

fn parse_sub<S: Subcategory>(s: Option<&str>) -> Result<S, Error> {
    s.and_then(|s| S::from_str(s).ok()).ok_or(Error::InvalidName)
}

/// Parse categories from `range/subcategory` strings, `misc` or `app01/3` for
/// application slots
impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, '/');

        let range = parts
            .next()
            .and_then(|r| Range::from_str(r).ok())
            .ok_or(Error::InvalidName)?;
        let sub = parts.next();

        let c = match range {
            Range::Io => Self::Io(parse_sub(sub)?),
            Range::Task => Self::Task(parse_sub(sub)?),
            Range::Crypto => Self::Crypto(parse_sub(sub)?),
            Range::Param => Self::Param(parse_sub(sub)?),
            Range::Security => Self::Security(parse_sub(sub)?),
            Range::Apdu => Self::Apdu(parse_sub(sub)?),
            Range::Misc => match sub {
                None | Some("unknown") => Self::Misc,
                Some(_) => return Err(Error::InvalidName),
            },
            _ => {
                let slot = sub
                    .map(|s| s.trim_start_matches("0x"))
                    .and_then(|s| u8::from_str_radix(s, 16).ok())
                    .ok_or(Error::InvalidName)?;
                let slot = AppSlot::new(slot)?;
                match AppRange::from_range(range) {
                    Some(r) => Self::App(r, slot),
                    None => return Err(Error::InvalidName),
                }
            }
        };

        Ok(c)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Misc => write!(f, "{}", self.range().name()),
            Self::App(_, slot) => write!(f, "{}/{}", self.range().name(), slot),
            _ => write!(f, "{}/{}", self.range().name(), self.subcategory_name()),
        }
    }
}
