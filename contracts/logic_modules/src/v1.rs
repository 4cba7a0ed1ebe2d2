use soroban_sdk::{Address, BytesN, Env, String};
use upgradeability::layout::LAYOUT_V1;
use upgradeability::{
    events as proxy_events, implementation_slot, stage, ProxyError, Slot, SlotSet,
};

use crate::{events, Call, Context, LogicModule, Reply};

pub const VERSION: &str = "1.0.0";
pub const DEFAULT_NAME: &str = "ContractV1";

pub struct LogicV1;

impl LogicModule for LogicV1 {
    fn version(&self, env: &Env) -> String {
        String::from_str(env, VERSION)
    }

    fn layout(&self) -> &'static [Slot] {
        LAYOUT_V1
    }

    fn proxiable_uuid(&self, env: &Env) -> Option<BytesN<32>> {
        Some(implementation_slot(env))
    }

    fn authorize_upgrade(&self, ctx: &Context) -> Result<(), ProxyError> {
        ctx.authorize_owner(&self.slots(ctx.env)).map(|_| ())
    }

    fn dispatch(&self, ctx: &Context, call: Call) -> Result<Reply, ProxyError> {
        let slots = self.slots(ctx.env);
        dispatch_base(self, ctx, &slots, call)
    }
}

/// Handles the calls every version since 1.0.0 supports. Later versions
/// route their unmatched calls here with their own, wider slot view.
pub(crate) fn dispatch_base(
    module: &dyn LogicModule,
    ctx: &Context,
    slots: &SlotSet,
    call: Call,
) -> Result<Reply, ProxyError> {
    match call {
        Call::Initialize(owner) => {
            initialize(ctx.env, slots, &owner)?;
            Ok(Reply::Unit)
        }
        Call::SetValue(value) => {
            set_value(ctx, slots, value)?;
            Ok(Reply::Unit)
        }
        Call::SetName(name) => {
            set_name(ctx, slots, &name)?;
            Ok(Reply::Unit)
        }
        Call::TransferOwnership(new_owner) => {
            transfer_ownership(ctx, slots, &new_owner)?;
            Ok(Reply::Unit)
        }
        Call::GetValue => Ok(Reply::Value(slots.value()?)),
        Call::GetName => Ok(Reply::Name(slots.name()?)),
        Call::Owner => Ok(Reply::Owner(slots.owner()?)),
        Call::Version => Ok(Reply::Version(module.version(ctx.env))),
        _ => Err(ProxyError::InvalidArgument),
    }
}

fn initialize(env: &Env, slots: &SlotSet, owner: &Address) -> Result<(), ProxyError> {
    stage::run_stage(env, 1, || {
        slots.write(Slot::Owner, owner)?;
        slots.write(Slot::Value, &0u128)?;
        slots.write(Slot::Name, &String::from_str(env, DEFAULT_NAME))
    })
}

fn set_value(ctx: &Context, slots: &SlotSet, value: u128) -> Result<(), ProxyError> {
    ctx.authorize_mutation(slots)?;
    slots.write(Slot::Value, &value)?;
    events::value_updated(ctx.env, value);
    Ok(())
}

fn set_name(ctx: &Context, slots: &SlotSet, name: &String) -> Result<(), ProxyError> {
    ctx.authorize_mutation(slots)?;
    slots.write(Slot::Name, name)?;
    events::name_updated(ctx.env, name);
    Ok(())
}

fn transfer_ownership(
    ctx: &Context,
    slots: &SlotSet,
    new_owner: &Address,
) -> Result<(), ProxyError> {
    let previous = ctx.authorize_owner(slots)?;
    slots.write(Slot::Owner, new_owner)?;
    proxy_events::ownership_transferred(ctx.env, &previous, new_owner);
    Ok(())
}
