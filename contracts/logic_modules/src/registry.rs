//! Code-reference resolver: maps an `implementation_ref` to the module it
//! names. Layout compatibility between the resolved module and the one it
//! replaces is not checked here; see `upgradeability::layout`.

use soroban_sdk::{BytesN, Env};
use upgradeability::ProxyError;

use crate::{LogicModule, LogicV1, LogicV2};

pub const LOGIC_V1: [u8; 32] = [
    0xb7, 0xbd, 0x2a, 0x45, 0x6d, 0xb7, 0x50, 0x1f, 0xa7, 0xf3, 0xcc, 0x4d, 0x79, 0x23, 0x87, 0xc7,
    0x65, 0x62, 0x5e, 0xc2, 0xc0, 0x86, 0xca, 0xeb, 0x3d, 0xa4, 0x98, 0x31, 0x7e, 0x40, 0xfd, 0x6e,
];

pub const LOGIC_V2: [u8; 32] = [
    0x0b, 0x34, 0x12, 0x90, 0x67, 0x44, 0xc8, 0x6d, 0x4f, 0x01, 0xbd, 0x25, 0x75, 0x24, 0x2c, 0xa8,
    0xfc, 0x41, 0x10, 0xf7, 0xcb, 0xb9, 0xb8, 0xfe, 0xc1, 0x3a, 0x5d, 0x71, 0xe9, 0xdc, 0xe6, 0x41,
];

/// Every module that ships in a release build, oldest first.
pub const RELEASED: &[[u8; 32]] = &[LOGIC_V1, LOGIC_V2];

pub fn v1_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &LOGIC_V1)
}

pub fn v2_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &LOGIC_V2)
}

pub fn resolve(implementation: &BytesN<32>) -> Result<&'static dyn LogicModule, ProxyError> {
    match implementation.to_array() {
        LOGIC_V1 => Ok(&LogicV1),
        LOGIC_V2 => Ok(&LogicV2),
        #[cfg(any(test, feature = "testutils"))]
        crate::testutils::UNGATED => Ok(&crate::testutils::UngatedV2),
        #[cfg(any(test, feature = "testutils"))]
        crate::testutils::INERT => Ok(&crate::testutils::Inert),
        #[cfg(any(test, feature = "testutils"))]
        crate::testutils::PARTIAL => Ok(&crate::testutils::PartialV2),
        _ => Err(ProxyError::UnknownImplementation),
    }
}
