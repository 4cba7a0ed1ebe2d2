use soroban_sdk::{BytesN, Env, String};
use upgradeability::layout::LAYOUT_V2;
use upgradeability::{implementation_slot, stage, ProxyError, Slot, SlotSet};

use crate::v1::dispatch_base;
use crate::{events, Call, Context, LogicModule, Reply};

pub const VERSION: &str = "2.0.0";

/// Version 2: everything in 1.0.0 plus the `count` slot.
pub struct LogicV2;

impl LogicModule for LogicV2 {
    fn version(&self, env: &Env) -> String {
        String::from_str(env, VERSION)
    }

    fn layout(&self) -> &'static [Slot] {
        LAYOUT_V2
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
            Call::InitializeV2 => {
                initialize_v2(ctx.env, &slots)?;
                Ok(Reply::Unit)
            }
            Call::IncrementCount => Ok(Reply::Count(increment_count(ctx, &slots)?)),
            Call::GetCount => Ok(Reply::Count(slots.count()?)),
            Call::GetValueAndCount => Ok(Reply::ValueAndCount(slots.value()?, slots.count()?)),
            Call::BatchUpdate(value, name) => {
                batch_update(ctx, &slots, value, &name)?;
                Ok(Reply::Unit)
            }
            other => dispatch_base(self, ctx, &slots, other),
        }
    }
}

/// Stage 2 initializer. Must not run twice: a second run would reset a
/// live counter.
///
/// Only `stage < 2` is required. On a proxy deployed straight onto v2
/// whose stage 1 never ran, this moves the marker from 0 to 2 and the
/// stage 1 `initialize` is locked out for good: no owner can be set, so
/// no upgrade can ever be authorized. Deploy with `Initialize` first.
fn initialize_v2(env: &Env, slots: &SlotSet) -> Result<(), ProxyError> {
    stage::run_stage(env, 2, || slots.write(Slot::Count, &0u64))
}

fn increment_count(ctx: &Context, slots: &SlotSet) -> Result<u64, ProxyError> {
    ctx.authorize_mutation(slots)?;
    let count = slots
        .count()?
        .checked_add(1)
        .ok_or(ProxyError::ArithmeticOverflow)?;
    slots.write(Slot::Count, &count)?;
    events::count_incremented(ctx.env, count);
    Ok(count)
}

/// Both writes land in the same invocation; if either fails the host
/// discards the other.
pub(crate) fn batch_update(
    ctx: &Context,
    slots: &SlotSet,
    value: u128,
    name: &String,
) -> Result<(), ProxyError> {
    ctx.authorize_mutation(slots)?;
    slots.write(Slot::Value, &value)?;
    slots.write(Slot::Name, name)?;
    events::value_updated(ctx.env, value);
    events::name_updated(ctx.env, name);
    Ok(())
}
