//! # Signature Errors
//!
//! Error types for signature verification and aggregation.

use pv_01_curve_arithmetic::CurveError;
use thiserror::Error;

/// Errors from the classical (secp256k1) verification path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, invalid encoding)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch {
        expected: [u8; 20],
        actual: [u8; 20],
    },

    /// Secret key material was rejected
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(CurveError),
}

/// Result type for classical verification
pub type SignatureResult<T> = Result<T, SignatureError>;

/// Errors raised by aggregation and proof decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// Cannot aggregate an empty list of signatures
    #[error("Cannot aggregate empty signature list")]
    EmptyAggregation,

    /// Parallel input arrays differ in length
    #[error("Length mismatch: {signatures} signatures, {other} companions")]
    LengthMismatch { signatures: usize, other: usize },

    /// A share was produced over a different message hash
    #[error("Signature share {index} signs a different message hash")]
    MessageHashMismatch { index: usize },

    /// A point failed to decode or validate
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Serialized proof is structurally malformed
    #[error("Malformed aggregation proof: {0}")]
    MalformedProof(&'static str),
}
