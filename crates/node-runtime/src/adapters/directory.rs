//! # Registry Directory Adapter
//!
//! Implements the request machine's `ValidatorDirectory` port on top of the
//! validator registry.

use pv_02_signature_aggregation::BlsPublicKey;
use pv_03_validator_registry::ValidatorRegistryApi;
use pv_04_validation_requests::ValidatorDirectory;
use shared_types::{format_address, Address, Timestamp};
use std::sync::Arc;
use tracing::warn;

/// Exposes a registry as the validator directory.
pub struct RegistryDirectory<R: ValidatorRegistryApi> {
    registry: Arc<R>,
}

impl<R: ValidatorRegistryApi> RegistryDirectory<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }
}

impl<R: ValidatorRegistryApi> ValidatorDirectory for RegistryDirectory<R> {
    fn active_count(&self) -> usize {
        self.registry.active_count()
    }

    fn is_active(&self, validator: &Address) -> bool {
        self.registry.is_active(validator)
    }

    fn public_key(&self, validator: &Address) -> Option<BlsPublicKey> {
        self.registry
            .get_validator(validator)
            .filter(|v| v.is_active())
            .map(|v| v.public_key)
    }

    fn record_validation(&self, validator: Address, at: Timestamp) {
        // The signer was active under the request lock; a failure here only
        // loses the activity counter.
        if let Err(e) = self.registry.record_validation(validator, at) {
            warn!(
                validator = %format_address(&validator),
                error = %e,
                "failed to record validation activity"
            );
        }
    }
}
