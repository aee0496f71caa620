//! # Domain Entities
//!
//! Signature and key encodings exchanged with validators, plus the
//! aggregation proof stored on completed requests.

use super::errors::{SignatureError, SignatureResult};
use pv_01_curve_arithmetic::{CurveResult, KeyPoint, SignaturePoint};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Address, Hash};

/// Width of a classical `r || s || v` signature.
pub const ECDSA_SIGNATURE_LEN: usize = 65;

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse the 65-byte `r || s || v` wire form.
    pub fn from_bytes(bytes: &[u8]) -> SignatureResult<Self> {
        if bytes.len() != ECDSA_SIGNATURE_LEN {
            return Err(SignatureError::InvalidFormat);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Encode as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; ECDSA_SIGNATURE_LEN] {
        let mut out = [0u8; ECDSA_SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// BLS Types (BLS12-381, min_sig)
// =============================================================================

/// BLS signature (G1 point, compressed).
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature {
    /// G1 point (48 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 48],
}

impl BlsSignature {
    /// Wrap an already-computed point.
    pub fn from_point(point: &SignaturePoint) -> Self {
        Self {
            bytes: point.to_compressed(),
        }
    }

    /// Parse from a slice of exactly 48 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 48] = bytes.try_into().ok()?;
        Some(Self { bytes })
    }

    /// Decompress and validate (on curve, in subgroup, not identity).
    pub fn decode(&self) -> CurveResult<SignaturePoint> {
        let point = SignaturePoint::from_compressed(&self.bytes)?;
        point.validate()?;
        Ok(point)
    }
}

/// BLS public key (G2 point, compressed).
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlsPublicKey {
    /// G2 point (96 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 96],
}

impl BlsPublicKey {
    /// Wrap an already-computed point.
    pub fn from_point(point: &KeyPoint) -> Self {
        Self {
            bytes: point.to_compressed(),
        }
    }

    /// Parse from a slice of exactly 96 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 96] = bytes.try_into().ok()?;
        Some(Self { bytes })
    }

    /// Decompress and validate (on curve, in subgroup, not identity).
    pub fn decode(&self) -> CurveResult<KeyPoint> {
        let point = KeyPoint::from_compressed(&self.bytes)?;
        point.validate()?;
        Ok(point)
    }
}

// =============================================================================
// Aggregation Types
// =============================================================================

/// One validator's point signature over a request's message hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureShare {
    /// Validator that produced the share
    pub signer: Address,
    /// Message hash the share claims to sign
    pub message_hash: Hash,
    /// The signature itself
    pub signature: BlsSignature,
}

/// Aggregated proof that a set of validators signed one message hash.
///
/// `signers` keeps submission order. The aggregate point is the same for
/// any ordering of the same shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregationResult {
    /// Sum of the folded signature points
    pub aggregated_signature: SignaturePoint,
    /// Signers whose shares were folded, with their public keys
    pub signers: Vec<(Address, KeyPoint)>,
    /// Message hash every share signs
    pub message_hash: Hash,
    /// False when some share failed individual verification
    pub valid: bool,
}

impl AggregationResult {
    /// Number of signers folded into the proof.
    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Public keys in signer order.
    pub fn public_keys(&self) -> Vec<KeyPoint> {
        self.signers.iter().map(|(_, pk)| *pk).collect()
    }

    /// Signer addresses in submission order.
    pub fn signer_addresses(&self) -> Vec<Address> {
        self.signers.iter().map(|(addr, _)| *addr).collect()
    }
}
