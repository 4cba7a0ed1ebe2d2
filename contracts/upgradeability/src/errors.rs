use soroban_sdk::contracterror;

/// Failures surfaced by the proxy, its logic modules and the shared
/// upgrade primitives. Codes are part of the contract interface and must
/// never be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProxyError {
    /// A stage initializer ran for a stage that is already live.
    AlreadyInitialized = 1,
    /// Caller is not the owner, or no owner has been set yet.
    Unauthorized = 2,
    /// The active implementation does not know the requested call.
    InvalidArgument = 3,
    /// The call coupled to an upgrade failed; the swap was reverted.
    UpgradeRolledBack = 4,
    NotDeployed = 5,
    AlreadyDeployed = 6,
    UnknownImplementation = 7,
    NotProxiable = 8,
    UpgradesFrozen = 9,
    /// A module touched a slot outside its declared layout.
    LayoutViolation = 10,
    ArithmeticOverflow = 11,
}
