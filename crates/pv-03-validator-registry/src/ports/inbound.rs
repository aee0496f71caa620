//! Driving Ports (API)

use crate::domain::{ActiveSetSnapshot, Validator};
use crate::error::RegistryResult;
use shared_types::{Address, Amount, Timestamp};

/// Where a slashed amount went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlashPayout {
    /// Transferred to the slash beneficiary.
    Paid,
    /// Transfer failed; the amount sits in the slash reserve.
    Reserved,
}

/// Result of a successful slash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlashOutcome {
    pub deducted: Amount,
    pub remaining_stake: Amount,
    pub payout: SlashPayout,
}

/// Validator registry API.
///
/// Every state-changing call is atomic: it either applies completely or
/// returns an error with no effect.
pub trait ValidatorRegistryApi: Send + Sync {
    // =========================================================================
    // Validator operations
    // =========================================================================

    /// Deposit `stake` and join the active set.
    ///
    /// `public_key` is a compressed G2 point (96 bytes).
    fn register(&self, identity: Address, stake: Amount, public_key: &[u8])
        -> RegistryResult<()>;

    /// Leave the registry and receive the remaining stake.
    ///
    /// Allowed from Active or Slashed. A failed payout aborts the exit.
    fn exit(&self, identity: Address) -> RegistryResult<Amount>;

    /// Count a signature toward the validator's activity record.
    fn record_validation(&self, identity: Address, at: Timestamp) -> RegistryResult<()>;

    // =========================================================================
    // Governance operations
    // =========================================================================

    /// Deduct the slash percentage and remove `identity` from the active set.
    ///
    /// A failed payout parks the amount in the slash reserve; the slash
    /// still applies.
    fn slash(&self, caller: Address, identity: Address, reason: &str)
        -> RegistryResult<SlashOutcome>;

    /// Retry paying out the slash reserve. Returns the amount released.
    fn release_slash_reserve(&self, caller: Address) -> RegistryResult<Amount>;

    // =========================================================================
    // Queries
    // =========================================================================

    fn get_validator(&self, identity: &Address) -> Option<Validator>;

    fn is_active(&self, identity: &Address) -> bool;

    fn active_count(&self) -> usize;

    /// Active validators in active-set order.
    fn active_validators(&self) -> Vec<Address>;

    /// Immutable copy of the active set and its public keys.
    fn snapshot(&self) -> ActiveSetSnapshot;

    fn slash_reserve(&self) -> Amount;

    fn total_active_stake(&self) -> Amount;
}
