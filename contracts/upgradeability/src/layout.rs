//! Storage layout registry.
//!
//! Every logic module addresses the proxy's persistent fields through the
//! [`Slot`] ids declared here. The declaration order is append-only: a new
//! version may add fields after the last slot, never insert, reorder or
//! reuse an id. Each module publishes the prefix of the registry it uses
//! and the proxy only lets it touch those slots.

use soroban_sdk::contracttype;

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Slot {
    Owner = 0,
    Value = 1,
    Name = 2,
    // introduced by v2
    Count = 3,
}

impl Slot {
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Full registry in declaration order.
pub const REGISTRY: &[Slot] = &[Slot::Owner, Slot::Value, Slot::Name, Slot::Count];

pub const LAYOUT_V1: &[Slot] = &[Slot::Owner, Slot::Value, Slot::Name];

pub const LAYOUT_V2: &[Slot] = &[Slot::Owner, Slot::Value, Slot::Name, Slot::Count];

/// True when `layout` is exactly a prefix of the registry, i.e. slot `i`
/// sits at position `i` with no gaps.
pub fn is_append_only(layout: &[Slot]) -> bool {
    layout.len() <= REGISTRY.len()
        && layout
            .iter()
            .enumerate()
            .all(|(position, slot)| slot.index() as usize == position && REGISTRY[position] == *slot)
}

/// True when `next` keeps every slot of `prev` at the same position and
/// only appends after it.
pub fn is_prefix_compatible(prev: &[Slot], next: &[Slot]) -> bool {
    next.len() >= prev.len() && next[..prev.len()] == *prev
}
