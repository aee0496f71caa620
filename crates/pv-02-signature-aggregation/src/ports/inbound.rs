//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the aggregation subsystem. Implementations must be
//! thread-safe (`Send + Sync`).

use crate::domain::entities::{
    AggregationResult, BlsPublicKey, BlsSignature, EcdsaSignature, SignatureShare,
};
use crate::domain::errors::{AggregationError, SignatureResult};
use pv_01_curve_arithmetic::{KeyPoint, SignaturePoint};
use shared_types::{Address, Hash};

/// Primary Signature Aggregation API.
pub trait SignatureAggregationApi: Send + Sync {
    // =========================================================================
    // Point (BLS) Operations
    // =========================================================================

    /// Verify one point signature against a validator key.
    fn verify_single(
        &self,
        signature: &BlsSignature,
        message_hash: &Hash,
        public_key: &BlsPublicKey,
    ) -> bool;

    /// Fold shares over one message into an aggregation proof.
    fn aggregate_signatures(
        &self,
        shares: &[SignatureShare],
        message_hash: &Hash,
        public_keys: &[BlsPublicKey],
    ) -> Result<AggregationResult, AggregationError>;

    /// Verify an aggregate signature against the signers' keys.
    fn verify_aggregated(
        &self,
        aggregated_signature: &SignaturePoint,
        message_hash: &Hash,
        public_keys: &[KeyPoint],
    ) -> bool;

    /// Verify independent triples; `false` on the first failure.
    ///
    /// # Performance
    /// Uses parallel processing for improved throughput.
    fn batch_verify(
        &self,
        signatures: &[BlsSignature],
        message_hashes: &[Hash],
        public_keys: &[BlsPublicKey],
    ) -> Result<bool, AggregationError>;

    // =========================================================================
    // Classical (ECDSA) Operations
    // =========================================================================

    /// Check that a secp256k1 signature recovers to `expected`.
    ///
    /// # Security
    /// - Rejects signatures with high S values (EIP-2 malleability protection)
    fn verify_classical(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
        expected: Address,
    ) -> SignatureResult<()>;
}
