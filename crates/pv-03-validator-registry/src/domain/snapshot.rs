//! Point-in-time view of the active set.

use pv_02_signature_aggregation::BlsPublicKey;
use shared_types::{Address, Timestamp};
use std::collections::HashMap;

/// Immutable copy of the active set taken when a request is created.
///
/// Later slashing or exits do not change a snapshot, so a request's quorum
/// is fixed at creation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSetSnapshot {
    pub active_count: usize,
    pub public_keys: HashMap<Address, BlsPublicKey>,
    pub taken_at: Timestamp,
}

impl ActiveSetSnapshot {
    pub fn public_key(&self, address: &Address) -> Option<&BlsPublicKey> {
        self.public_keys.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.public_keys.contains_key(address)
    }
}
