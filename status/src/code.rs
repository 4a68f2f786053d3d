//! Status code and status word types, composition and decomposition

use core::fmt;

use crate::{
    category::{AppSlot, Category},
    legacy::LegacyCode,
    range::{AppRange, Range},
    registry, Error,
};

/// Smallest identifier within a subcategory
pub const ID_MIN: u8 = 0x01;

/// Largest identifier within a subcategory
pub const ID_MAX: u8 = 0x2B;

/// Mask selecting the identifier byte of a status code
pub const ID_MASK: u16 = 0x00FF;

/// Raw two-byte status word, as received trailing a device response.
///
/// This may hold any value, see [StatusCode] for values belonging to the registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct StatusWord(u16);

/// Status code composed from a [Category] and identifier, or the
/// [StatusCode::SUCCESS] sentinel.
///
/// OS codes allocated in the registry are available as associated constants,
/// named `<RANGE>_<SUB>_<ID>` after the code mnemonic (ie. [StatusCode::SEC_PIN_05]).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16")
)]
#[repr(transparent)]
pub struct StatusCode(u16);

impl StatusCode {
    /// Unconditional success, not derived from any category
    pub const SUCCESS: StatusCode = StatusCode(0x9000);

    /// Compose a status code from a category and identifier.
    ///
    /// This is intended for use in constant contexts where an out-of-range
    /// identifier fails the build, see [StatusCode::try_compose] for a checked
    /// runtime alternative. Every composed code decomposes back to its parts,
    /// use [StatusCode::is_allocated] to check registry membership.
    pub const fn compose(category: Category, identifier: u8) -> Self {
        assert!(
            identifier >= ID_MIN && identifier <= ID_MAX,
            "status identifier out of range"
        );

        Self(category.base() + identifier as u16)
    }

    /// Checked status code composition
    pub fn try_compose(category: Category, identifier: u8) -> Result<Self, Error> {
        if !(ID_MIN..=ID_MAX).contains(&identifier) {
            return Err(Error::IdentifierOutOfRange(identifier));
        }

        Ok(Self(category.base() + identifier as u16))
    }

    /// Compose an application defined status code, these never collide with OS codes
    pub fn compose_app(range: AppRange, slot: u8, identifier: u8) -> Result<Self, Error> {
        Self::try_compose(Category::App(range, AppSlot::new(slot)?), identifier)
    }

    /// Fetch the numeric status code value
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Check whether this is the success sentinel
    pub const fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Split a status code into category and identifier
    pub fn decompose(&self) -> Result<Components, Error> {
        StatusWord::from(*self).decompose()
    }

    /// Check whether this is an OS code allocated in the registry
    pub fn is_allocated(&self) -> bool {
        registry::lookup(self.0).is_some()
    }

    /// Describe a status code for diagnostics
    pub fn describe(&self) -> Description {
        StatusWord::from(*self).describe()
    }

    /// Iterate over all defined OS status codes in definition order
    pub fn all() -> impl Iterator<Item = StatusCode> {
        registry::blocks().flat_map(|b| b.codes())
    }

    /// Encode a status code to big-endian wire bytes
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// Status codes are the success sentinel or any value [StatusCode::try_compose]
/// can produce, allocated or not
impl TryFrom<u16> for StatusCode {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value == Self::SUCCESS.0 {
            return Ok(Self::SUCCESS);
        }

        let c = StatusWord(value).decompose()?;
        Ok(c.code())
    }
}

impl From<StatusCode> for u16 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

impl fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusCode(0x{:04x})", self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decompose() {
            Ok(c) => write!(f, "{} (0x{:04x})", c.mnemonic(), self.0),
            Err(_) if self.is_success() => write!(f, "SUCCESS (0x{:04x})", self.0),
            Err(_) => write!(f, "0x{:04x}", self.0),
        }
    }
}

impl StatusWord {
    /// Create a status word from a raw value
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Create a status word from big-endian wire bytes
    pub const fn from_bytes(b: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(b))
    }

    /// Fetch the raw status word value
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Check whether this is the success sentinel
    pub const fn is_success(&self) -> bool {
        self.0 == StatusCode::SUCCESS.0
    }

    /// Resolve a status word to a [StatusCode], if it decomposes
    pub fn code(&self) -> Option<StatusCode> {
        StatusCode::try_from(self.0).ok()
    }

    /// Resolve a status word to a [LegacyCode], if it is one
    pub fn legacy(&self) -> Option<LegacyCode> {
        LegacyCode::from_word(self.0).ok()
    }

    /// Split a status word into category and identifier.
    ///
    /// Defined for every value [StatusCode::try_compose] accepts, whether or not
    /// the identifier is allocated (see [registry::lookup]). Legacy codes and the
    /// success sentinel fail.
    pub fn decompose(&self) -> Result<Components, Error> {
        let category = Category::from_base(self.0)?;
        let identifier = (self.0 & ID_MASK) as u8;

        if !(ID_MIN..=ID_MAX).contains(&identifier) {
            return Err(Error::IdentifierOutOfRange(identifier));
        }

        Ok(Components {
            category,
            identifier,
        })
    }

    /// Describe a status word for diagnostics, words that do not decompose
    /// collapse into the miscellaneous / unknown tag
    pub fn describe(&self) -> Description {
        if self.is_success() {
            return Description {
                category: "success",
                subcategory: "none",
                components: None,
            };
        }

        match self.decompose() {
            Ok(c) => Description {
                category: c.range().name(),
                subcategory: c.category.subcategory_name(),
                components: Some(c),
            },
            Err(_) => Description::UNKNOWN,
        }
    }
}

impl From<u16> for StatusWord {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<StatusWord> for u16 {
    fn from(value: StatusWord) -> Self {
        value.0
    }
}

impl From<StatusCode> for StatusWord {
    fn from(value: StatusCode) -> Self {
        Self(value.0)
    }
}

impl From<LegacyCode> for StatusWord {
    fn from(value: LegacyCode) -> Self {
        Self(value as u16)
    }
}

impl fmt::Debug for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusWord(0x{:04x})", self.0)
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Decomposed status code
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Components {
    /// Range and subcategory
    pub category: Category,
    /// Identifier within the category
    pub identifier: u8,
}

impl Components {
    /// Fetch the status code range
    pub const fn range(&self) -> Range {
        self.category.range()
    }

    /// Fetch the subcategory offset within the range
    pub const fn subcategory(&self) -> u16 {
        self.category.offset()
    }

    /// Re-compose the status code
    pub const fn code(&self) -> StatusCode {
        StatusCode::compose(self.category, self.identifier)
    }

    /// Fetch a displayable mnemonic for the code (ie. `SEC_PIN_05`)
    pub fn mnemonic(&self) -> Mnemonic {
        Mnemonic(*self)
    }
}

/// Status code mnemonic, `<RANGE>_<SUB>_<ID>` with the identifier in hex
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mnemonic(Components);

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.0;
        match c.category {
            Category::App(_, slot) => write!(
                f,
                "{}_{:X}_{:02X}",
                c.range().mnemonic(),
                slot.value(),
                c.identifier
            ),
            _ => write!(
                f,
                "{}_{}_{:02X}",
                c.range().mnemonic(),
                c.category.subcategory_mnemonic(),
                c.identifier
            ),
        }
    }
}

/// Status description for diagnostic output
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Description {
    /// Range name
    pub category: &'static str,
    /// Subcategory name
    pub subcategory: &'static str,
    /// Decomposed code, where available
    pub components: Option<Components>,
}

impl Description {
    /// Catch-all description for unclassified status words
    pub const UNKNOWN: Description = Description {
        category: "misc",
        subcategory: "unknown",
        components: None,
    };

    /// Check whether the description is the catch-all
    pub fn is_unknown(&self) -> bool {
        self == &Self::UNKNOWN
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.components {
            Some(c) => write!(
                f,
                "{}/{} #{:02x} ({})",
                self.category,
                self.subcategory,
                c.identifier,
                c.mnemonic()
            ),
            None => write!(f, "{}/{}", self.category, self.subcategory),
        }
    }
}
