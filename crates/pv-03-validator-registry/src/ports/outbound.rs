//! Driven Ports (outbound dependencies)

use shared_types::{Address, Amount};
use thiserror::Error;

/// Treasury transfer failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct TreasuryError {
    pub reason: String,
}

impl TreasuryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Pays stake out of the registry: exit refunds and slashed amounts.
///
/// Called while the registry holds its write lock, so an implementation
/// must not call back into the registry.
pub trait StakeTreasury: Send + Sync {
    /// Move `amount` from registry custody to `to`.
    fn transfer(&self, to: Address, amount: Amount) -> Result<(), TreasuryError>;
}

impl<T: StakeTreasury + ?Sized> StakeTreasury for std::sync::Arc<T> {
    fn transfer(&self, to: Address, amount: Amount) -> Result<(), TreasuryError> {
        (**self).transfer(to, amount)
    }
}
