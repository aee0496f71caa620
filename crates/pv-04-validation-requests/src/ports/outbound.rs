//! Driven Ports (outbound dependencies)

use pv_02_signature_aggregation::BlsPublicKey;
use shared_types::{Address, Timestamp};

/// Read access to the validator set, plus activity accounting.
///
/// Implemented over the validator registry at the composition root; tests
/// use in-memory fakes. The request machine never holds a reference to the
/// registry itself.
pub trait ValidatorDirectory: Send + Sync {
    /// Number of active validators right now.
    fn active_count(&self) -> usize;

    fn is_active(&self, validator: &Address) -> bool;

    /// Registered public key of an active validator.
    fn public_key(&self, validator: &Address) -> Option<BlsPublicKey>;

    /// Note that `validator` signed a request at `at`.
    fn record_validation(&self, validator: Address, at: Timestamp);
}

impl<D: ValidatorDirectory + ?Sized> ValidatorDirectory for std::sync::Arc<D> {
    fn active_count(&self) -> usize {
        (**self).active_count()
    }

    fn is_active(&self, validator: &Address) -> bool {
        (**self).is_active(validator)
    }

    fn public_key(&self, validator: &Address) -> Option<BlsPublicKey> {
        (**self).public_key(validator)
    }

    fn record_validation(&self, validator: Address, at: Timestamp) {
        (**self).record_validation(validator, at)
    }
}
