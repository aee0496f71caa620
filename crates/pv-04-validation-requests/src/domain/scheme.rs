//! Signature schemes accepted from validators
//!
//! The scheme is chosen by byte length alone:
//!
//! | Length | Scheme | Check |
//! |--------|--------|-------|
//! | 48 | `Point` (BLS G1, compressed) | pairing against the registered key |
//! | 65 | `Classical` (secp256k1 `r \|\| s \|\| v`) | recovers to the signer |
//!
//! Which schemes are admitted is a deployment decision
//! ([`VerificationPolicy`]).

use pv_02_signature_aggregation::{BlsSignature, EcdsaSignature, ECDSA_SIGNATURE_LEN};
use serde::{Deserialize, Serialize};
use shared_types::SignatureKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const POINT_SIGNATURE_LEN: usize = 48;

/// A validator signature, tagged by scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureScheme {
    Point(BlsSignature),
    Classical(EcdsaSignature),
}

impl SignatureScheme {
    /// Classify raw bytes by length. Any other length is `None`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            POINT_SIGNATURE_LEN => BlsSignature::from_slice(bytes).map(Self::Point),
            ECDSA_SIGNATURE_LEN => EcdsaSignature::from_bytes(bytes).ok().map(Self::Classical),
            _ => None,
        }
    }

    pub fn kind(&self) -> SignatureKind {
        match self {
            Self::Point(_) => SignatureKind::Point,
            Self::Classical(_) => SignatureKind::Classical,
        }
    }
}

/// Which signature schemes validators may submit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationPolicy {
    PointOnly,
    ClassicalOnly,
    #[default]
    PointOrClassical,
}

impl VerificationPolicy {
    pub fn allows(&self, kind: SignatureKind) -> bool {
        match self {
            Self::PointOnly => kind == SignatureKind::Point,
            Self::ClassicalOnly => kind == SignatureKind::Classical,
            Self::PointOrClassical => true,
        }
    }
}

impl fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PointOnly => "point",
            Self::ClassicalOnly => "classical",
            Self::PointOrClassical => "point-or-classical",
        })
    }
}

/// Unrecognized verification policy name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown verification policy: {0} (expected point, classical or point-or-classical)")]
pub struct UnknownPolicy(pub String);

impl FromStr for VerificationPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "point-only" | "bls" => Ok(Self::PointOnly),
            "classical" | "classical-only" | "ecdsa" => Ok(Self::ClassicalOnly),
            "point-or-classical" | "any" => Ok(Self::PointOrClassical),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
