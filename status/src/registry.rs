//! Status code registry, the full set of OS status codes and build-time checks
//! over their allocation.
//!
//! Codes are declared in blocks sharing a [Category], each block listing its
//! identifiers in definition order. Identifiers may be retired (leaving a gap)
//! but are never reused.

use crate::{
    category::{ApduSub, Category, CryptoSub, IoSub, ParamSub, SecuritySub, TaskSub},
    code::{ID_MASK, ID_MAX, ID_MIN},
    range::RANGE_MASK,
    Error, LegacyCode, StatusCode, StatusWord,
};

/// Declare a block of status codes sharing a category, emitting the [Block]
/// table entry and one associated [StatusCode] constant per identifier
macro_rules! status_block {
    (
        $(#[$meta:meta])*
        $block:ident: $category:expr => { $($name:ident = $id:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        pub const $block: $crate::registry::Block =
            $crate::registry::Block::new($category, &[$($id),*]);

        impl $crate::StatusCode {
            $(
                #[doc = concat!(
                    "`", stringify!($name), "` (",
                    stringify!($block), " identifier ", stringify!($id), ")"
                )]
                pub const $name: $crate::StatusCode = $crate::StatusCode::compose($category, $id);
            )*
        }
    };
}

/// A block of identifiers allocated within a single [Category]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    category: Category,
    ids: &'static [u8],
}

impl Block {
    /// Create a new block, identifiers must be strictly increasing
    pub const fn new(category: Category, ids: &'static [u8]) -> Self {
        Self { category, ids }
    }

    /// Fetch the category shared by codes in this block
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Fetch the identifiers defined in this block
    pub const fn ids(&self) -> &'static [u8] {
        self.ids
    }

    /// Check whether an identifier is defined in this block
    pub fn contains(&self, id: u8) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate over the status codes defined in this block
    pub fn codes(&self) -> impl Iterator<Item = StatusCode> + 'static {
        let category = self.category;
        self.ids
            .iter()
            .map(move |id| StatusCode::compose(category, *id))
    }
}

status_block! {
    /// I/O overflow issues
    IO_OVERFLOW: Category::Io(IoSub::Overflow) => {
        IOL_OFW_01 = 0x01, IOL_OFW_02 = 0x02, IOL_OFW_03 = 0x03, IOL_OFW_04 = 0x04,
        IOL_OFW_05 = 0x05,
    }
}

status_block! {
    /// I/O header issues
    IO_HEADER: Category::Io(IoSub::Header) => {
        IOL_HDR_01 = 0x01, IOL_HDR_02 = 0x02, IOL_HDR_03 = 0x03, IOL_HDR_04 = 0x04,
        IOL_HDR_05 = 0x05, IOL_HDR_06 = 0x06, IOL_HDR_07 = 0x07, IOL_HDR_08 = 0x08,
    }
}

status_block! {
    /// I/O state issues
    IO_STATE: Category::Io(IoSub::State) => {
        IOL_STA_01 = 0x01, IOL_STA_02 = 0x02, IOL_STA_03 = 0x03, IOL_STA_04 = 0x04,
    }
}

status_block! {
    /// I/O reset issues, identifier `04` is retired and `05` must not move
    IO_RESET: Category::Io(IoSub::Reset) => {
        IOL_RST_01 = 0x01, IOL_RST_02 = 0x02, IOL_RST_03 = 0x03, IOL_RST_05 = 0x05,
    }
}

status_block! {
    /// Task stack issues
    TASK_STACK: Category::Task(TaskSub::Stack) => {
        TSK_STC_01 = 0x01, TSK_STC_02 = 0x02, TSK_STC_03 = 0x03, TSK_STC_04 = 0x04,
        TSK_STC_05 = 0x05, TSK_STC_06 = 0x06, TSK_STC_07 = 0x07, TSK_STC_08 = 0x08,
    }
}

status_block! {
    /// Task owner issues
    TASK_OWNER: Category::Task(TaskSub::Owner) => {
        TSK_OWN_01 = 0x01, TSK_OWN_02 = 0x02, TSK_OWN_03 = 0x03, TSK_OWN_04 = 0x04,
    }
}

status_block! {
    /// Task overflow issues
    TASK_OVERFLOW: Category::Task(TaskSub::Overflow) => {
        TSK_OFW_01 = 0x01, TSK_OFW_02 = 0x02,
    }
}

status_block! {
    /// Cryptography length mismatch, reserved for legacy aliases
    CRYPTO_LENGTH: Category::Crypto(CryptoSub::Length) => {
        CRY_LEN_01 = 0x01,
    }
}

status_block! {
    /// Cryptography value mismatch, reserved for legacy aliases
    CRYPTO_VALUE: Category::Crypto(CryptoSub::Value) => {
        CRY_VAL_01 = 0x01,
    }
}

status_block! {
    /// OS parameter length mismatch
    PARAM_LENGTH: Category::Param(ParamSub::Length) => {
        PAR_LEN_01 = 0x01, PAR_LEN_02 = 0x02, PAR_LEN_03 = 0x03, PAR_LEN_04 = 0x04,
        PAR_LEN_05 = 0x05, PAR_LEN_06 = 0x06, PAR_LEN_07 = 0x07, PAR_LEN_08 = 0x08,
        PAR_LEN_09 = 0x09, PAR_LEN_0A = 0x0A, PAR_LEN_0B = 0x0B, PAR_LEN_0C = 0x0C,
        PAR_LEN_0D = 0x0D, PAR_LEN_0E = 0x0E, PAR_LEN_0F = 0x0F, PAR_LEN_10 = 0x10,
        PAR_LEN_11 = 0x11, PAR_LEN_12 = 0x12, PAR_LEN_13 = 0x13, PAR_LEN_14 = 0x14,
        PAR_LEN_15 = 0x15, PAR_LEN_16 = 0x16,
    }
}

status_block! {
    /// OS parameter value mismatch
    PARAM_VALUE: Category::Param(ParamSub::Value) => {
        PAR_VAL_01 = 0x01, PAR_VAL_02 = 0x02, PAR_VAL_03 = 0x03, PAR_VAL_04 = 0x04,
        PAR_VAL_05 = 0x05, PAR_VAL_06 = 0x06, PAR_VAL_07 = 0x07, PAR_VAL_08 = 0x08,
        PAR_VAL_09 = 0x09, PAR_VAL_0A = 0x0A, PAR_VAL_0B = 0x0B, PAR_VAL_0C = 0x0C,
        PAR_VAL_0D = 0x0D, PAR_VAL_0E = 0x0E, PAR_VAL_0F = 0x0F, PAR_VAL_10 = 0x10,
        PAR_VAL_11 = 0x11, PAR_VAL_12 = 0x12, PAR_VAL_13 = 0x13, PAR_VAL_14 = 0x14,
        PAR_VAL_15 = 0x15, PAR_VAL_16 = 0x16, PAR_VAL_17 = 0x17, PAR_VAL_18 = 0x18,
        PAR_VAL_19 = 0x19, PAR_VAL_1A = 0x1A, PAR_VAL_1B = 0x1B, PAR_VAL_1C = 0x1C,
        PAR_VAL_1D = 0x1D, PAR_VAL_1E = 0x1E, PAR_VAL_1F = 0x1F, PAR_VAL_20 = 0x20,
        PAR_VAL_21 = 0x21, PAR_VAL_22 = 0x22, PAR_VAL_23 = 0x23, PAR_VAL_24 = 0x24,
        PAR_VAL_25 = 0x25, PAR_VAL_26 = 0x26,
    }
}

status_block! {
    /// Application registry issues
    SECURITY_APP: Category::Security(SecuritySub::App) => {
        SEC_APP_01 = 0x01, SEC_APP_02 = 0x02, SEC_APP_03 = 0x03, SEC_APP_04 = 0x04,
        SEC_APP_05 = 0x05, SEC_APP_06 = 0x06, SEC_APP_07 = 0x07, SEC_APP_08 = 0x08,
        SEC_APP_09 = 0x09, SEC_APP_0A = 0x0A, SEC_APP_0B = 0x0B, SEC_APP_0C = 0x0C,
        SEC_APP_0D = 0x0D, SEC_APP_0E = 0x0E, SEC_APP_0F = 0x0F, SEC_APP_10 = 0x10,
        SEC_APP_11 = 0x11, SEC_APP_12 = 0x12, SEC_APP_13 = 0x13, SEC_APP_14 = 0x14,
        SEC_APP_15 = 0x15, SEC_APP_16 = 0x16, SEC_APP_17 = 0x17, SEC_APP_18 = 0x18,
        SEC_APP_19 = 0x19, SEC_APP_1A = 0x1A, SEC_APP_1B = 0x1B,
    }
}

status_block! {
    /// Integrity check issues
    SECURITY_CRC: Category::Security(SecuritySub::Crc) => {
        SEC_CRC_01 = 0x01, SEC_CRC_02 = 0x02, SEC_CRC_03 = 0x03, SEC_CRC_04 = 0x04,
        SEC_CRC_05 = 0x05, SEC_CRC_06 = 0x06, SEC_CRC_07 = 0x07, SEC_CRC_08 = 0x08,
        SEC_CRC_09 = 0x09, SEC_CRC_0A = 0x0A, SEC_CRC_0B = 0x0B, SEC_CRC_0C = 0x0C,
        SEC_CRC_0D = 0x0D, SEC_CRC_0E = 0x0E, SEC_CRC_0F = 0x0F, SEC_CRC_10 = 0x10,
        SEC_CRC_11 = 0x11, SEC_CRC_12 = 0x12, SEC_CRC_13 = 0x13, SEC_CRC_14 = 0x14,
        SEC_CRC_15 = 0x15, SEC_CRC_16 = 0x16, SEC_CRC_17 = 0x17, SEC_CRC_18 = 0x18,
        SEC_CRC_19 = 0x19, SEC_CRC_1A = 0x1A, SEC_CRC_1B = 0x1B, SEC_CRC_1C = 0x1C,
        SEC_CRC_1D = 0x1D, SEC_CRC_1E = 0x1E, SEC_CRC_1F = 0x1F, SEC_CRC_20 = 0x20,
        SEC_CRC_21 = 0x21, SEC_CRC_22 = 0x22, SEC_CRC_23 = 0x23,
    }
}

status_block! {
    /// Miscellaneous security checks
    SECURITY_CHECK: Category::Security(SecuritySub::Check) => {
        SEC_CHK_01 = 0x01, SEC_CHK_02 = 0x02, SEC_CHK_03 = 0x03, SEC_CHK_04 = 0x04,
        SEC_CHK_05 = 0x05, SEC_CHK_06 = 0x06, SEC_CHK_07 = 0x07, SEC_CHK_08 = 0x08,
        SEC_CHK_09 = 0x09, SEC_CHK_0A = 0x0A, SEC_CHK_0B = 0x0B, SEC_CHK_0C = 0x0C,
        SEC_CHK_0D = 0x0D, SEC_CHK_0E = 0x0E, SEC_CHK_0F = 0x0F, SEC_CHK_10 = 0x10,
        SEC_CHK_11 = 0x11, SEC_CHK_12 = 0x12, SEC_CHK_13 = 0x13, SEC_CHK_14 = 0x14,
        SEC_CHK_15 = 0x15, SEC_CHK_16 = 0x16, SEC_CHK_17 = 0x17, SEC_CHK_18 = 0x18,
    }
}

status_block! {
    /// Key operations
    SECURITY_KEY: Category::Security(SecuritySub::Key) => {
        SEC_KEY_01 = 0x01,
    }
}

status_block! {
    /// User consent and PIN operations
    SECURITY_PIN: Category::Security(SecuritySub::Pin) => {
        SEC_PIN_01 = 0x01, SEC_PIN_02 = 0x02, SEC_PIN_03 = 0x03, SEC_PIN_04 = 0x04,
        SEC_PIN_05 = 0x05, SEC_PIN_06 = 0x06, SEC_PIN_07 = 0x07, SEC_PIN_08 = 0x08,
        SEC_PIN_09 = 0x09, SEC_PIN_0A = 0x0A, SEC_PIN_0B = 0x0B, SEC_PIN_0C = 0x0C,
        SEC_PIN_0D = 0x0D, SEC_PIN_0E = 0x0E, SEC_PIN_0F = 0x0F, SEC_PIN_10 = 0x10,
        SEC_PIN_11 = 0x11, SEC_PIN_12 = 0x12, SEC_PIN_13 = 0x13, SEC_PIN_14 = 0x14,
        SEC_PIN_15 = 0x15,
    }
}

status_block! {
    /// Secure channel operations
    SECURITY_SCP: Category::Security(SecuritySub::Scp) => {
        SEC_SCP_01 = 0x01, SEC_SCP_02 = 0x02,
    }
}

status_block! {
    /// Signature operations
    SECURITY_SIGNATURE: Category::Security(SecuritySub::Signature) => {
        SEC_SIG_01 = 0x01, SEC_SIG_02 = 0x02, SEC_SIG_03 = 0x03, SEC_SIG_04 = 0x04,
        SEC_SIG_05 = 0x05, SEC_SIG_06 = 0x06, SEC_SIG_07 = 0x07, SEC_SIG_08 = 0x08,
        SEC_SIG_09 = 0x09, SEC_SIG_0A = 0x0A, SEC_SIG_0B = 0x0B, SEC_SIG_0C = 0x0C,
        SEC_SIG_0D = 0x0D, SEC_SIG_0E = 0x0E, SEC_SIG_0F = 0x0F,
    }
}

status_block! {
    /// Memory management operations
    SECURITY_MEMORY: Category::Security(SecuritySub::Memory) => {
        SEC_MEM_01 = 0x01, SEC_MEM_02 = 0x02, SEC_MEM_03 = 0x03, SEC_MEM_04 = 0x04,
        SEC_MEM_05 = 0x05, SEC_MEM_06 = 0x06, SEC_MEM_07 = 0x07, SEC_MEM_08 = 0x08,
        SEC_MEM_09 = 0x09, SEC_MEM_0A = 0x0A, SEC_MEM_0B = 0x0B, SEC_MEM_0C = 0x0C,
        SEC_MEM_0D = 0x0D, SEC_MEM_0E = 0x0E, SEC_MEM_0F = 0x0F, SEC_MEM_10 = 0x10,
    }
}

status_block! {
    /// Device state issues
    SECURITY_STATE: Category::Security(SecuritySub::State) => {
        SEC_STA_01 = 0x01, SEC_STA_02 = 0x02, SEC_STA_03 = 0x03, SEC_STA_04 = 0x04,
        SEC_STA_05 = 0x05, SEC_STA_06 = 0x06, SEC_STA_07 = 0x07, SEC_STA_08 = 0x08,
        SEC_STA_09 = 0x09, SEC_STA_0A = 0x0A, SEC_STA_0B = 0x0B,
    }
}

status_block! {
    /// APDU class issues
    APDU_CLASS: Category::Apdu(ApduSub::Class) => {
        APD_CLA_01 = 0x01, APD_CLA_02 = 0x02,
    }
}

status_block! {
    /// APDU instruction issues
    APDU_INSTRUCTION: Category::Apdu(ApduSub::Instruction) => {
        APD_INS_01 = 0x01, APD_INS_02 = 0x02, APD_INS_03 = 0x03, APD_INS_04 = 0x04,
        APD_INS_05 = 0x05,
    }
}

status_block! {
    /// Other APDU header checks
    APDU_HEADER: Category::Apdu(ApduSub::Header) => {
        APD_HDR_01 = 0x01, APD_HDR_02 = 0x02, APD_HDR_03 = 0x03, APD_HDR_04 = 0x04,
        APD_HDR_05 = 0x05, APD_HDR_06 = 0x06, APD_HDR_07 = 0x07, APD_HDR_08 = 0x08,
        APD_HDR_09 = 0x09, APD_HDR_0A = 0x0A, APD_HDR_0B = 0x0B, APD_HDR_0C = 0x0C,
        APD_HDR_0D = 0x0D, APD_HDR_0E = 0x0E, APD_HDR_0F = 0x0F, APD_HDR_10 = 0x10,
        APD_HDR_11 = 0x11, APD_HDR_12 = 0x12,
    }
}

status_block! {
    /// APDU length issues
    APDU_LENGTH: Category::Apdu(ApduSub::Length) => {
        APD_LEN_01 = 0x01, APD_LEN_02 = 0x02, APD_LEN_03 = 0x03, APD_LEN_04 = 0x04,
        APD_LEN_05 = 0x05, APD_LEN_06 = 0x06, APD_LEN_07 = 0x07, APD_LEN_08 = 0x08,
        APD_LEN_09 = 0x09, APD_LEN_0A = 0x0A, APD_LEN_0B = 0x0B, APD_LEN_0C = 0x0C,
        APD_LEN_0D = 0x0D, APD_LEN_0E = 0x0E, APD_LEN_0F = 0x0F, APD_LEN_10 = 0x10,
        APD_LEN_11 = 0x11, APD_LEN_12 = 0x12, APD_LEN_13 = 0x13, APD_LEN_14 = 0x14,
        APD_LEN_15 = 0x15, APD_LEN_16 = 0x16, APD_LEN_17 = 0x17, APD_LEN_18 = 0x18,
        APD_LEN_19 = 0x19, APD_LEN_1A = 0x1A, APD_LEN_1B = 0x1B, APD_LEN_1C = 0x1C,
        APD_LEN_1D = 0x1D, APD_LEN_1E = 0x1E, APD_LEN_1F = 0x1F, APD_LEN_20 = 0x20,
        APD_LEN_21 = 0x21, APD_LEN_22 = 0x22, APD_LEN_23 = 0x23, APD_LEN_24 = 0x24,
        APD_LEN_25 = 0x25, APD_LEN_26 = 0x26, APD_LEN_27 = 0x27, APD_LEN_28 = 0x28,
        APD_LEN_29 = 0x29, APD_LEN_2A = 0x2A, APD_LEN_2B = 0x2B,
    }
}

status_block! {
    /// APDU data issues
    APDU_DATA: Category::Apdu(ApduSub::Data) => {
        APD_DAT_01 = 0x01, APD_DAT_02 = 0x02, APD_DAT_03 = 0x03, APD_DAT_04 = 0x04,
        APD_DAT_05 = 0x05, APD_DAT_06 = 0x06, APD_DAT_07 = 0x07, APD_DAT_08 = 0x08,
        APD_DAT_09 = 0x09, APD_DAT_0A = 0x0A, APD_DAT_0B = 0x0B, APD_DAT_0C = 0x0C,
        APD_DAT_0D = 0x0D, APD_DAT_0E = 0x0E, APD_DAT_0F = 0x0F, APD_DAT_10 = 0x10,
        APD_DAT_11 = 0x11, APD_DAT_12 = 0x12, APD_DAT_13 = 0x13, APD_DAT_14 = 0x14,
        APD_DAT_15 = 0x15, APD_DAT_16 = 0x16, APD_DAT_17 = 0x17, APD_DAT_18 = 0x18,
    }
}

status_block! {
    /// Operating system state on APDU reception
    APDU_STATE: Category::Apdu(ApduSub::State) => {
        APD_STA_01 = 0x01, APD_STA_02 = 0x02, APD_STA_03 = 0x03, APD_STA_04 = 0x04,
        APD_STA_05 = 0x05, APD_STA_06 = 0x06, APD_STA_07 = 0x07, APD_STA_08 = 0x08,
        APD_STA_09 = 0x09, APD_STA_0A = 0x0A, APD_STA_0B = 0x0B, APD_STA_0C = 0x0C,
        APD_STA_0D = 0x0D, APD_STA_0E = 0x0E, APD_STA_0F = 0x0F, APD_STA_10 = 0x10,
        APD_STA_11 = 0x11, APD_STA_12 = 0x12, APD_STA_13 = 0x13, APD_STA_14 = 0x14,
        APD_STA_15 = 0x15, APD_STA_16 = 0x16, APD_STA_17 = 0x17, APD_STA_18 = 0x18,
        APD_STA_19 = 0x19, APD_STA_1A = 0x1A, APD_STA_1B = 0x1B, APD_STA_1C = 0x1C,
        APD_STA_1D = 0x1D, APD_STA_1E = 0x1E, APD_STA_1F = 0x1F, APD_STA_20 = 0x20,
        APD_STA_21 = 0x21, APD_STA_22 = 0x22, APD_STA_23 = 0x23, APD_STA_24 = 0x24,
        APD_STA_25 = 0x25, APD_STA_26 = 0x26, APD_STA_27 = 0x27, APD_STA_28 = 0x28,
        APD_STA_29 = 0x29, APD_STA_2A = 0x2A, APD_STA_2B = 0x2B,
    }
}

status_block! {
    /// Unclassified issues, where faults collapse when no other code applies
    MISC_UNKNOWN: Category::Misc => {
        MUI_UNK_01 = 0x01, MUI_UNK_02 = 0x02, MUI_UNK_03 = 0x03, MUI_UNK_04 = 0x04,
        MUI_UNK_05 = 0x05, MUI_UNK_06 = 0x06, MUI_UNK_07 = 0x07, MUI_UNK_08 = 0x08,
        MUI_UNK_09 = 0x09, MUI_UNK_0A = 0x0A, MUI_UNK_0B = 0x0B, MUI_UNK_0C = 0x0C,
        MUI_UNK_0D = 0x0D, MUI_UNK_0E = 0x0E, MUI_UNK_0F = 0x0F, MUI_UNK_10 = 0x10,
        MUI_UNK_11 = 0x11, MUI_UNK_12 = 0x12, MUI_UNK_13 = 0x13, MUI_UNK_14 = 0x14,
        MUI_UNK_15 = 0x15, MUI_UNK_16 = 0x16, MUI_UNK_17 = 0x17, MUI_UNK_18 = 0x18,
    }
}

/// Blocks always present in the registry
pub const CORE: &[Block] = &[
    IO_OVERFLOW,
    IO_HEADER,
    IO_STATE,
    IO_RESET,
    TASK_STACK,
    TASK_OWNER,
    TASK_OVERFLOW,
    CRYPTO_LENGTH,
    CRYPTO_VALUE,
    PARAM_LENGTH,
    PARAM_VALUE,
    SECURITY_APP,
    SECURITY_CRC,
    SECURITY_CHECK,
    SECURITY_KEY,
    SECURITY_PIN,
    SECURITY_SCP,
    SECURITY_SIGNATURE,
    SECURITY_MEMORY,
    SECURITY_STATE,
    APDU_CLASS,
    APDU_INSTRUCTION,
    APDU_HEADER,
    APDU_LENGTH,
    APDU_DATA,
    APDU_STATE,
    MISC_UNKNOWN,
];

/// Iterate over all registry blocks, including optional blocks enabled by features
pub fn blocks() -> impl Iterator<Item = &'static Block> + Clone {
    let b = CORE.iter();

    #[cfg(feature = "ble")]
    let b = b.chain(crate::ble::BLOCKS.iter());

    b
}

/// Look up a registry entry by value
pub fn lookup(value: u16) -> Option<StatusCode> {
    let base = value & !ID_MASK;
    let id = (value & ID_MASK) as u8;

    blocks()
        .find(|b| b.category.base() == base)
        .filter(|b| b.contains(id))
        .map(|b| StatusCode::compose(b.category, id))
}

/// Check a block is aligned, OS owned, and holds strictly increasing in-range identifiers
const fn block_is_well_formed(b: &Block) -> bool {
    let base = b.category.base();
    let range = b.category.range();

    if base & ID_MASK != 0
        || range.is_application()
        || range.base() == StatusCode::SUCCESS.value() & RANGE_MASK
        || b.ids.is_empty()
    {
        return false;
    }

    let mut i = 0;
    while i < b.ids.len() {
        let id = b.ids[i];
        if id < ID_MIN || id > ID_MAX {
            return false;
        }
        if i > 0 && b.ids[i - 1] >= id {
            return false;
        }
        i += 1;
    }

    true
}

/// Check that no category is allocated in both block tables
pub(crate) const fn blocks_are_disjoint(a: &[Block], b: &[Block]) -> bool {
    let mut i = 0;
    while i < a.len() {
        let mut j = 0;
        while j < b.len() {
            if a[i].category.base() == b[j].category.base() {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Check every block is well formed and each category is allocated once.
///
/// As identifiers stay below `0x0100`, distinct category bases imply globally
/// unique status codes.
pub(crate) const fn table_is_consistent(blocks: &[Block]) -> bool {
    let mut i = 0;
    while i < blocks.len() {
        if !block_is_well_formed(&blocks[i]) {
            return false;
        }

        let mut j = i + 1;
        while j < blocks.len() {
            if blocks[i].category.base() == blocks[j].category.base() {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// Registry allocation is checked at build time
const _: () = assert!(
    table_is_consistent(CORE),
    "status registry allocation collision"
);

/// Runtime check of the registry, reporting the first offending code
pub fn validate() -> Result<(), Error> {
    check_blocks(blocks())?;

    for l in LegacyCode::ALL {
        let c = l.canonical();
        if lookup(c.value()) != Some(c) {
            return Err(Error::Unallocated(c.into()));
        }
    }

    Ok(())
}

/// Check a set of blocks is well formed and allocates each code once
fn check_blocks<'a, I>(blocks: I) -> Result<(), Error>
where
    I: Iterator<Item = &'a Block> + Clone,
{
    for b in blocks.clone() {
        if !block_is_well_formed(b) {
            return Err(Error::MalformedBlock(StatusWord::new(b.category.base())));
        }
    }

    let codes = || blocks.clone().flat_map(|b| b.codes());

    // Pairwise, without allocation
    for (i, a) in codes().enumerate() {
        if a.is_success() || codes().skip(i + 1).any(|b| a == b) {
            return Err(Error::Collision(a.into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn registry_is_valid() {
        assert_eq!(validate(), Ok(()));
        assert!(table_is_consistent(CORE));
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for c in StatusCode::all() {
            assert!(seen.insert(c.value()), "duplicate code {c:?}");
        }

        #[cfg(not(feature = "ble"))]
        assert_eq!(seen.len(), 408);
        #[cfg(feature = "ble")]
        assert_eq!(seen.len(), 420);
    }

    #[test]
    fn definition_order() {
        let codes: Vec<_> = IO_RESET.codes().collect();
        assert_eq!(
            codes,
            &[
                StatusCode::IOL_RST_01,
                StatusCode::IOL_RST_02,
                StatusCode::IOL_RST_03,
                StatusCode::IOL_RST_05
            ]
        );

        assert_eq!(StatusCode::all().next(), Some(StatusCode::IOL_OFW_01));
    }

    #[test]
    fn lookup_codes() {
        assert_eq!(lookup(0x1405), Some(StatusCode::IOL_RST_05));
        assert_eq!(lookup(0x1404), None);
        assert_eq!(lookup(0x6E01), Some(StatusCode::APD_CLA_01));
        assert_eq!(lookup(0x672B), Some(StatusCode::APD_LEN_2B));
        assert_eq!(lookup(0x672C), None);
        assert_eq!(lookup(0xA018), Some(StatusCode::MUI_UNK_18));
        assert_eq!(lookup(0x9000), None);
        assert_eq!(lookup(0x0001), None);
    }

    #[test]
    fn block_capacity() {
        for b in blocks() {
            assert!(b.ids().iter().all(|id| (ID_MIN..=ID_MAX).contains(id)));
            assert_eq!(b.codes().count(), b.ids().len());
        }

        assert_eq!(APDU_LENGTH.ids().len(), ID_MAX as usize);
        assert_eq!(APDU_STATE.ids().len(), ID_MAX as usize);
    }

    #[test]
    fn consistency_checks_reject_bad_tables() {
        const DUPLICATE: &[Block] = &[IO_RESET, SECURITY_PIN, IO_RESET];
        assert!(!table_is_consistent(DUPLICATE));

        const UNORDERED: &[Block] = &[Block::new(Category::Io(IoSub::Ble), &[0x02, 0x01])];
        assert!(!table_is_consistent(UNORDERED));

        const REPEATED: &[Block] = &[Block::new(Category::Io(IoSub::Ble), &[0x01, 0x01])];
        assert!(!table_is_consistent(REPEATED));

        const EMPTY: &[Block] = &[Block::new(Category::Io(IoSub::Ble), &[])];
        assert!(!table_is_consistent(EMPTY));

        let slot = crate::AppSlot::new(0x1).unwrap();
        let app = [Block::new(Category::App(crate::AppRange::App01, slot), &[0x01])];
        assert!(!table_is_consistent(&app));

        assert!(!blocks_are_disjoint(CORE, &[MISC_UNKNOWN]));
        assert!(blocks_are_disjoint(
            CORE,
            &[Block::new(Category::Io(IoSub::Ble), &[0x01])]
        ));
    }

    #[test]
    fn check_blocks_reports_offender() {
        assert_eq!(check_blocks(CORE.iter()), Ok(()));

        let unordered = [
            IO_RESET,
            Block::new(Category::Io(IoSub::Ble), &[0x02, 0x01]),
        ];
        assert_eq!(
            check_blocks(unordered.iter()),
            Err(Error::MalformedBlock(StatusWord::new(0x1500)))
        );

        let empty = [Block::new(Category::Security(SecuritySub::Pin), &[])];
        assert_eq!(
            check_blocks(empty.iter()),
            Err(Error::MalformedBlock(StatusWord::new(0x5500)))
        );

        let out_of_range = [Block::new(Category::Misc, &[0x01, 0x2C])];
        assert_eq!(
            check_blocks(out_of_range.iter()),
            Err(Error::MalformedBlock(StatusWord::new(0xA000)))
        );

        let duplicate = [IO_RESET, SECURITY_PIN, IO_RESET];
        assert_eq!(
            check_blocks(duplicate.iter()),
            Err(Error::Collision(StatusWord::new(0x1401)))
        );
    }
}
