//! Scalar helpers for key derivation.

use crate::errors::{CurveError, CurveResult};
pub use bls12_381::Scalar;
use ff::Field;
use sha2::{Digest, Sha512};

/// Minimum input key material accepted by `scalar_from_ikm`.
pub const MIN_IKM_LEN: usize = 32;

const KEYGEN_SALT: &[u8] = b"PV-KEYGEN-BLS12381-V1";

/// Derive a non-zero secret scalar from input key material.
///
/// SHA-512 over a fixed salt and the IKM, reduced modulo the group order.
pub fn scalar_from_ikm(ikm: &[u8]) -> CurveResult<Scalar> {
    if ikm.len() < MIN_IKM_LEN {
        return Err(CurveError::InsufficientKeyMaterial {
            min: MIN_IKM_LEN,
            actual: ikm.len(),
        });
    }

    let mut hasher = Sha512::new();
    hasher.update(KEYGEN_SALT);
    hasher.update(ikm);
    let digest = hasher.finalize();

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&digest);
    let scalar = Scalar::from_bytes_wide(&wide);

    if bool::from(scalar.is_zero()) {
        return Err(CurveError::InvalidScalar);
    }
    Ok(scalar)
}

/// Parse a canonical big-endian scalar (the byte order used by `blst`).
pub fn scalar_from_be_bytes(bytes: &[u8; 32]) -> CurveResult<Scalar> {
    let mut le = *bytes;
    le.reverse();
    let scalar: Option<Scalar> = Scalar::from_bytes(&le).into();
    let scalar = scalar.ok_or(CurveError::InvalidScalar)?;
    if bool::from(scalar.is_zero()) {
        return Err(CurveError::InvalidScalar);
    }
    Ok(scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_ikm_rejected() {
        assert_eq!(
            scalar_from_ikm(&[1u8; 16]),
            Err(CurveError::InsufficientKeyMaterial { min: 32, actual: 16 })
        );
    }

    #[test]
    fn test_ikm_derivation_is_deterministic() {
        let a = scalar_from_ikm(&[7u8; 32]).unwrap();
        let b = scalar_from_ikm(&[7u8; 32]).unwrap();
        let c = scalar_from_ikm(&[8u8; 32]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_be_bytes_round_trip() {
        let scalar = Scalar::from(0x0102_0304u64);
        let mut be = scalar.to_bytes();
        be.reverse();
        assert_eq!(scalar_from_be_bytes(&be), Ok(scalar));
    }

    #[test]
    fn test_zero_and_non_canonical_rejected() {
        assert_eq!(scalar_from_be_bytes(&[0u8; 32]), Err(CurveError::InvalidScalar));
        assert_eq!(scalar_from_be_bytes(&[0xFF; 32]), Err(CurveError::InvalidScalar));
    }
}
