//! Validator Registry Service
//!
//! Owns validator records, the active set and the slash reserve behind one
//! lock. Every mutation holds the write lock from its first check to its
//! last write, so calls are serialized and atomic.

use crate::domain::{ActiveSet, ActiveSetSnapshot, Validator, ValidatorStatus};
use crate::error::{RegistryError, RegistryResult};
use crate::ports::inbound::{SlashOutcome, SlashPayout, ValidatorRegistryApi};
use crate::ports::outbound::StakeTreasury;
use parking_lot::RwLock;
use pv_02_signature_aggregation::BlsPublicKey;
use shared_bus::{EventPublisher, ProtocolEvent};
use shared_types::{format_address, Address, Amount, TimeSource, Timestamp, ONE_TOKEN, ZERO_ADDRESS};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry configuration
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Minimum deposit to register
    pub min_stake: Amount,
    /// Share of stake removed by a slash (0..=100)
    pub slash_percent: u8,
    /// Only this address may slash or release the reserve
    pub governance: Address,
    /// Receives slashed stake
    pub slash_beneficiary: Address,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_stake: 10 * ONE_TOKEN,
            slash_percent: 50,
            governance: ZERO_ADDRESS,
            slash_beneficiary: ZERO_ADDRESS,
        }
    }
}

/// Internal registry state
#[derive(Default)]
struct RegistryState {
    validators: HashMap<Address, Validator>,
    active: ActiveSet,
    slash_reserve: Amount,
}

/// Validator registry implementation
pub struct ValidatorRegistryService<T, E, C>
where
    T: StakeTreasury,
    E: EventPublisher,
    C: TimeSource,
{
    config: RegistryConfig,
    state: RwLock<RegistryState>,
    treasury: Arc<T>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<T, E, C> ValidatorRegistryService<T, E, C>
where
    T: StakeTreasury,
    E: EventPublisher,
    C: TimeSource,
{
    pub fn new(config: RegistryConfig, treasury: Arc<T>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            config,
            state: RwLock::new(RegistryState::default()),
            treasury,
            events,
            clock,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn ensure_governance(&self, caller: Address) -> RegistryResult<()> {
        if caller != self.config.governance {
            warn!(caller = %format_address(&caller), "governance action rejected");
            return Err(RegistryError::UnauthorizedAction(caller));
        }
        Ok(())
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl<T, E, C> ValidatorRegistryApi for ValidatorRegistryService<T, E, C>
where
    T: StakeTreasury,
    E: EventPublisher,
    C: TimeSource,
{
    fn register(
        &self,
        identity: Address,
        stake: Amount,
        public_key: &[u8],
    ) -> RegistryResult<()> {
        if stake < self.config.min_stake {
            return Err(RegistryError::InsufficientStake {
                provided: stake,
                minimum: self.config.min_stake,
            });
        }

        let now = self.now();
        {
            let mut state = self.state.write();
            if state.validators.contains_key(&identity) {
                return Err(RegistryError::DuplicateRegistration(identity));
            }

            let public_key = BlsPublicKey::from_slice(public_key).ok_or_else(|| {
                RegistryError::InvalidPublicKey {
                    reason: format!("expected 96 bytes, got {}", public_key.len()),
                }
            })?;
            public_key
                .decode()
                .map_err(|e| RegistryError::InvalidPublicKey {
                    reason: e.to_string(),
                })?;

            state
                .validators
                .insert(identity, Validator::new(identity, stake, public_key, now));
            state.active.insert(identity);

            info!(
                validator = %format_address(&identity),
                stake,
                active = state.active.len(),
                "validator registered"
            );
        }

        self.events.publish(ProtocolEvent::ValidatorRegistered {
            validator: identity,
            stake,
            registered_at: now,
        });
        Ok(())
    }

    fn exit(&self, identity: Address) -> RegistryResult<Amount> {
        let refunded = {
            let mut state = self.state.write();
            let validator = state
                .validators
                .get(&identity)
                .filter(|v| v.status.can_exit())
                .ok_or(RegistryError::ValidatorNotActive(identity))?;

            let refund = validator.stake;
            if refund > 0 {
                self.treasury
                    .transfer(identity, refund)
                    .map_err(|e| RegistryError::PayoutFailed { reason: e.reason })?;
            }

            if let Some(validator) = state.validators.get_mut(&identity) {
                validator.withdraw();
            }
            state.active.remove(&identity);

            info!(validator = %format_address(&identity), refund, "validator exited");
            refund
        };

        self.events.publish(ProtocolEvent::ValidatorExited {
            validator: identity,
            refunded,
        });
        Ok(refunded)
    }

    fn record_validation(&self, identity: Address, at: Timestamp) -> RegistryResult<()> {
        let mut state = self.state.write();
        let validator = state
            .validators
            .get_mut(&identity)
            .ok_or(RegistryError::UnknownValidator(identity))?;
        validator.record_validation(at);
        debug!(
            validator = %format_address(&identity),
            count = validator.validation_count,
            "validation recorded"
        );
        Ok(())
    }

    fn slash(
        &self,
        caller: Address,
        identity: Address,
        reason: &str,
    ) -> RegistryResult<SlashOutcome> {
        self.ensure_governance(caller)?;

        let beneficiary = self.config.slash_beneficiary;
        let (outcome, reserve_total) = {
            let mut state = self.state.write();
            let validator = state
                .validators
                .get_mut(&identity)
                .filter(|v| v.is_active())
                .ok_or(RegistryError::ValidatorNotActive(identity))?;

            let deducted = validator.apply_slash(self.config.slash_percent);
            let remaining_stake = validator.stake;
            state.active.remove(&identity);

            let payout = match self.treasury.transfer(beneficiary, deducted) {
                Ok(()) => SlashPayout::Paid,
                Err(e) => {
                    state.slash_reserve = state.slash_reserve.saturating_add(deducted);
                    warn!(
                        validator = %format_address(&identity),
                        deducted,
                        reserve = state.slash_reserve,
                        error = %e,
                        "slash payout failed, amount moved to reserve"
                    );
                    SlashPayout::Reserved
                }
            };

            info!(
                validator = %format_address(&identity),
                deducted,
                remaining_stake,
                reason,
                "validator slashed"
            );

            (
                SlashOutcome {
                    deducted,
                    remaining_stake,
                    payout,
                },
                state.slash_reserve,
            )
        };

        self.events.publish(ProtocolEvent::ValidatorSlashed {
            validator: identity,
            deducted: outcome.deducted,
            remaining_stake: outcome.remaining_stake,
            reason: reason.to_string(),
        });
        if outcome.payout == SlashPayout::Reserved {
            self.events.publish(ProtocolEvent::SlashPayoutDeferred {
                validator: identity,
                amount: outcome.deducted,
                reserve_total,
            });
        }
        Ok(outcome)
    }

    fn release_slash_reserve(&self, caller: Address) -> RegistryResult<Amount> {
        self.ensure_governance(caller)?;

        let beneficiary = self.config.slash_beneficiary;
        let released = {
            let mut state = self.state.write();
            let amount = state.slash_reserve;
            if amount == 0 {
                return Ok(0);
            }
            self.treasury
                .transfer(beneficiary, amount)
                .map_err(|e| RegistryError::PayoutFailed { reason: e.reason })?;
            state.slash_reserve = 0;
            info!(amount, "slash reserve released");
            amount
        };

        self.events.publish(ProtocolEvent::SlashReserveReleased {
            beneficiary,
            amount: released,
        });
        Ok(released)
    }

    fn get_validator(&self, identity: &Address) -> Option<Validator> {
        self.state.read().validators.get(identity).cloned()
    }

    fn is_active(&self, identity: &Address) -> bool {
        self.state.read().active.contains(identity)
    }

    fn active_count(&self) -> usize {
        self.state.read().active.len()
    }

    fn active_validators(&self) -> Vec<Address> {
        self.state.read().active.as_slice().to_vec()
    }

    fn snapshot(&self) -> ActiveSetSnapshot {
        let state = self.state.read();
        let public_keys = state
            .active
            .iter()
            .filter_map(|addr| state.validators.get(addr))
            .map(|v| (v.address, v.public_key))
            .collect();

        ActiveSetSnapshot {
            active_count: state.active.len(),
            public_keys,
            taken_at: self.now(),
        }
    }

    fn slash_reserve(&self) -> Amount {
        self.state.read().slash_reserve
    }

    fn total_active_stake(&self) -> Amount {
        let state = self.state.read();
        state
            .active
            .iter()
            .filter_map(|addr| state.validators.get(addr))
            .filter(|v| v.status == ValidatorStatus::Active)
            .map(|v| v.stake)
            .fold(0, Amount::saturating_add)
    }
}
