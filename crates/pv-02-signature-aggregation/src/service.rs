//! # Signature Aggregation Service
//!
//! Implements `SignatureAggregationApi` by delegating to the domain layer
//! and logging rejected input.

use crate::domain::bls;
use crate::domain::ecdsa;
use crate::domain::entities::{
    AggregationResult, BlsPublicKey, BlsSignature, EcdsaSignature, SignatureShare,
};
use crate::domain::errors::{AggregationError, SignatureResult};
use crate::ports::inbound::SignatureAggregationApi;
use pv_01_curve_arithmetic::{KeyPoint, SignaturePoint};
use shared_types::{format_address, Address, Hash};
use tracing::{debug, warn};

/// Stateless aggregation service.
#[derive(Debug, Clone, Default)]
pub struct SignatureAggregationService;

impl SignatureAggregationService {
    /// Create a new service.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureAggregationApi for SignatureAggregationService {
    fn verify_single(
        &self,
        signature: &BlsSignature,
        message_hash: &Hash,
        public_key: &BlsPublicKey,
    ) -> bool {
        let valid = bls::verify_single(signature, message_hash, public_key);
        if !valid {
            debug!("point signature rejected");
        }
        valid
    }

    fn aggregate_signatures(
        &self,
        shares: &[SignatureShare],
        message_hash: &Hash,
        public_keys: &[BlsPublicKey],
    ) -> Result<AggregationResult, AggregationError> {
        let result = bls::aggregate_signatures(shares, message_hash, public_keys)?;
        if !result.valid {
            warn!(
                folded = result.signer_count(),
                submitted = shares.len(),
                "aggregation produced an invalid proof"
            );
        }
        Ok(result)
    }

    fn verify_aggregated(
        &self,
        aggregated_signature: &SignaturePoint,
        message_hash: &Hash,
        public_keys: &[KeyPoint],
    ) -> bool {
        bls::verify_aggregated(aggregated_signature, message_hash, public_keys)
    }

    fn batch_verify(
        &self,
        signatures: &[BlsSignature],
        message_hashes: &[Hash],
        public_keys: &[BlsPublicKey],
    ) -> Result<bool, AggregationError> {
        bls::batch_verify(signatures, message_hashes, public_keys)
    }

    fn verify_classical(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
        expected: Address,
    ) -> SignatureResult<()> {
        ecdsa::verify_ecdsa_signer(message_hash, signature, expected).inspect_err(|e| {
            debug!(expected = %format_address(&expected), error = %e, "classical signature rejected");
        })
    }
}
