//! Defective modules that only exist in test builds. They pin down the
//! trust boundary of self-authorizing upgrades: the proxy enforces
//! nothing beyond what the active module checks.

use soroban_sdk::{BytesN, Env, String};
use upgradeability::{implementation_slot, ProxyError, Slot};

use crate::v1::dispatch_base;
use crate::v2::batch_update;
use crate::{Call, Context, LogicModule, LogicV2, Reply};

pub const UNGATED: [u8; 32] = [
    0x3a, 0x12, 0x9f, 0x59, 0x32, 0x11, 0x0c, 0x63, 0xab, 0x26, 0x52, 0xc9, 0xaf, 0x02, 0x8a, 0xb3,
    0x88, 0xfd, 0x2c, 0xc2, 0x2a, 0x45, 0xe4, 0x6c, 0x87, 0x3e, 0xa1, 0x4d, 0x82, 0xea, 0x57, 0x65,
];

pub const INERT: [u8; 32] = [
    0x73, 0xa4, 0x03, 0x31, 0xa0, 0xdc, 0x3e, 0x5e, 0xf0, 0xb4, 0x00, 0xd5, 0xe3, 0xbb, 0xe7, 0x84,
    0x58, 0x8c, 0x9e, 0xc3, 0xe5, 0x8b, 0x5a, 0xe4, 0xe7, 0x8f, 0x60, 0x75, 0xf5, 0xf4, 0xbc, 0x2f,
];

pub const PARTIAL: [u8; 32] = [
    0x5e, 0x5f, 0xc0, 0xa1, 0x71, 0x6e, 0x68, 0x9b, 0x6d, 0x11, 0x06, 0x12, 0x1e, 0x00, 0x2c, 0x53,
    0x21, 0x73, 0x67, 0x01, 0x11, 0xb7, 0x50, 0xac, 0x28, 0xfe, 0xdc, 0xf2, 0xf5, 0x6f, 0x59, 0xbf,
];

pub fn ungated_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &UNGATED)
}

pub fn inert_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &INERT)
}

pub fn partial_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &PARTIAL)
}

/// Same behaviour as `LogicV2` but its upgrade gate lets anyone through.
pub struct UngatedV2;

impl LogicModule for UngatedV2 {
    fn version(&self, env: &Env) -> String {
        String::from_str(env, "2.0.0-ungated")
    }

    fn layout(&self) -> &'static [Slot] {
        LogicV2.layout()
    }

    fn proxiable_uuid(&self, env: &Env) -> Option<BytesN<32>> {
        Some(implementation_slot(env))
    }

    fn authorize_upgrade(&self, _ctx: &Context) -> Result<(), ProxyError> {
        Ok(())
    }

    fn dispatch(&self, ctx: &Context, call: Call) -> Result<Reply, ProxyError> {
        match call {
            Call::Version => Ok(Reply::Version(self.version(ctx.env))),
            other => LogicV2.dispatch(ctx, other),
        }
    }
}

/// Code that does not implement ERC-1822; the proxy must refuse it.
pub struct Inert;

impl LogicModule for Inert {
    fn version(&self, env: &Env) -> String {
        String::from_str(env, "0.0.0-inert")
    }

    fn layout(&self) -> &'static [Slot] {
        &[]
    }

    fn proxiable_uuid(&self, _env: &Env) -> Option<BytesN<32>> {
        None
    }

    fn authorize_upgrade(&self, _ctx: &Context) -> Result<(), ProxyError> {
        Err(ProxyError::Unauthorized)
    }

    fn dispatch(&self, ctx: &Context, call: Call) -> Result<Reply, ProxyError> {
        match call {
            Call::Version => Ok(Reply::Version(self.version(ctx.env))),
            _ => Err(ProxyError::InvalidArgument),
        }
    }
}

const PARTIAL_LAYOUT: &[Slot] = &[Slot::Owner, Slot::Value];

/// Runs the v2 `batch_update` with a view that is missing `Name`, so the
/// batch writes `value` and then fails on its second field.
pub struct PartialV2;

impl LogicModule for PartialV2 {
    fn version(&self, env: &Env) -> String {
        String::from_str(env, "2.0.0-partial")
    }

    fn layout(&self) -> &'static [Slot] {
        PARTIAL_LAYOUT
    }

    fn proxiable_uuid(&self, env: &Env) -> Option<BytesN<32>> {
        Some(implementation_slot(env))
    }

    fn authorize_upgrade(&self, ctx: &Context) -> Result<(), ProxyError> {
        ctx.authorize_owner(&self.slots(ctx.env)).map(|_| ())
    }

    fn dispatch(&self, ctx: &Context, call: Call) -> Result<Reply, ProxyError> {
        let slots = self.slots(ctx.env);
        match call {
            Call::BatchUpdate(value, name) => {
                batch_update(ctx, &slots, value, &name)?;
                Ok(Reply::Unit)
            }
            other => dispatch_base(self, ctx, &slots, other),
        }
    }
}
