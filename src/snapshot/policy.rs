use crate::snapshot::map::is_mutable;

/// Controls which register addresses accept writes from the bus.
///
/// Consulted only for mode and configuration; every other address is
/// rejected before the policy is asked.
pub trait AccessPolicy {
    /// Returns true if the controller may write the register at `addr`.
    fn can_write(&self, addr: u8) -> bool;
}

/// Default policy: only the mode and configuration registers are writable.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutableRegisterPolicy {}

impl AccessPolicy for MutableRegisterPolicy {
    fn can_write(&self, addr: u8) -> bool {
        is_mutable(addr)
    }
}
