//! Validator entity

use pv_02_signature_aggregation::BlsPublicKey;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp};

/// Lifecycle status of a validator record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidatorStatus {
    /// No stake deposited. Reported for identities with no record.
    #[default]
    Inactive,
    /// Staked and eligible to sign.
    Active,
    /// Penalized by governance; may only exit.
    Slashed,
    /// Stake withdrawn. Terminal.
    Exiting,
}

impl ValidatorStatus {
    /// Whether `exit` is permitted from this status.
    pub fn can_exit(&self) -> bool {
        matches!(self, Self::Active | Self::Slashed)
    }
}

/// A registered validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: Address,
    pub stake: Amount,
    pub status: ValidatorStatus,
    pub registered_at: Timestamp,
    pub last_active_at: Timestamp,
    pub validation_count: u64,
    pub slash_count: u32,
    /// BLS public key (compressed G2) used to verify point signatures
    pub public_key: BlsPublicKey,
}

impl Validator {
    pub fn new(address: Address, stake: Amount, public_key: BlsPublicKey, now: Timestamp) -> Self {
        Self {
            address,
            stake,
            status: ValidatorStatus::Active,
            registered_at: now,
            last_active_at: now,
            validation_count: 0,
            slash_count: 0,
            public_key,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ValidatorStatus::Active
    }

    /// Apply a slash of `percent`% and return the deducted amount.
    ///
    /// `remaining + deducted == stake before` always holds.
    pub fn apply_slash(&mut self, percent: u8) -> Amount {
        let deducted = percent_of(self.stake, percent);
        self.stake -= deducted;
        self.slash_count = self.slash_count.saturating_add(1);
        self.status = ValidatorStatus::Slashed;
        deducted
    }

    /// Zero the stake, mark Exiting and return the refund.
    pub fn withdraw(&mut self) -> Amount {
        let refund = self.stake;
        self.stake = 0;
        self.status = ValidatorStatus::Exiting;
        refund
    }

    pub fn record_validation(&mut self, at: Timestamp) {
        self.validation_count = self.validation_count.saturating_add(1);
        self.last_active_at = self.last_active_at.max(at);
    }
}

/// `floor(amount * percent / 100)` without overflowing.
pub fn percent_of(amount: Amount, percent: u8) -> Amount {
    let percent = Amount::from(percent.min(100));
    (amount / 100) * percent + (amount % 100) * percent / 100
}
