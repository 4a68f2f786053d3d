//! BLE transport status codes, compiled in with the `ble` feature.
//!
//! These occupy the [IoSub::Ble] subcategory, which stays allocated whether or
//! not the codes are enabled so no other code value shifts.

use crate::{
    registry::{blocks_are_disjoint, table_is_consistent, Block, CORE},
    Category, IoSub,
};

status_block! {
    /// BLE link issues
    IO_BLE: Category::Io(IoSub::Ble) => {
        IOL_BLE_01 = 0x01, IOL_BLE_02 = 0x02, IOL_BLE_03 = 0x03, IOL_BLE_04 = 0x04,
        IOL_BLE_05 = 0x05, IOL_BLE_06 = 0x06, IOL_BLE_07 = 0x07, IOL_BLE_08 = 0x08,
        IOL_BLE_09 = 0x09, IOL_BLE_0A = 0x0A, IOL_BLE_0B = 0x0B, IOL_BLE_0C = 0x0C,
    }
}

/// Blocks contributed by the BLE transport
pub const BLOCKS: &[Block] = &[IO_BLE];

const _: () = {
    assert!(table_is_consistent(BLOCKS), "BLE registry allocation collision");
    assert!(blocks_are_disjoint(CORE, BLOCKS), "BLE codes collide with core codes");
};
