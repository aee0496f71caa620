//! In-memory treasury ledger.

use crate::ports::outbound::{StakeTreasury, TreasuryError};
use parking_lot::RwLock;
use shared_types::{format_address, Address, Amount};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Credits payouts to an in-memory balance table.
///
/// Transfers can be switched to fail, which exercises the deferred slash
/// payout and aborted exit paths.
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    balances: RwLock<HashMap<Address, Amount>>,
    failing: AtomicBool,
}

impl InMemoryTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent transfers fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }

    pub fn total_paid(&self) -> Amount {
        self.balances.read().values().sum()
    }
}

impl StakeTreasury for InMemoryTreasury {
    fn transfer(&self, to: Address, amount: Amount) -> Result<(), TreasuryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TreasuryError::new(format!(
                "transfer to {} rejected",
                format_address(&to)
            )));
        }
        let mut balances = self.balances.write();
        let balance = balances.entry(to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| TreasuryError::new("balance overflow"))?;
        Ok(())
    }
}
