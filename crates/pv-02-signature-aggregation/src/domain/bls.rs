//! # BLS Verification and Aggregation (BLS12-381, min_sig)
//!
//! Signatures live in G1 (48 bytes compressed), public keys in G2
//! (96 bytes compressed). Messages are request message hashes mapped to G1
//! with RFC 9380 hash-to-curve under [`SIGNATURE_DST`].
//!
//! Verification equation: `e(σ, g2) == e(H(m), pk)`. For an aggregate over
//! one message the public keys are summed first.

use super::entities::{AggregationResult, BlsPublicKey, BlsSignature, SignatureShare};
use super::errors::{AggregationError, SignatureError, SignatureResult};
use pv_01_curve_arithmetic::{
    hash_to_signature_point, pairing_check, scalar_from_be_bytes, scalar_from_ikm, sum_points,
    CurveError, KeyPoint, Scalar, SignaturePoint, SIGNATURE_DST,
};
use shared_types::{Address, Hash};
use tracing::debug;
use zeroize::Zeroizing;

/// Map a message hash into the signature group.
pub fn hash_message(message_hash: &Hash) -> SignaturePoint {
    hash_to_signature_point(message_hash, SIGNATURE_DST)
}

/// Verify a single BLS signature over a message hash.
///
/// Returns `false` for undecodable input, identity points, off-curve or
/// out-of-subgroup points, and failed pairing checks.
pub fn verify_single(
    signature: &BlsSignature,
    message_hash: &Hash,
    public_key: &BlsPublicKey,
) -> bool {
    let Ok(sig) = signature.decode() else {
        return false;
    };
    let Ok(pk) = public_key.decode() else {
        return false;
    };

    verify_points(&sig, message_hash, &pk)
}

fn verify_points(signature: &SignaturePoint, message_hash: &Hash, public_key: &KeyPoint) -> bool {
    pairing_check(signature, &hash_message(message_hash), public_key)
}

/// Aggregate point signatures that all sign `message_hash`.
///
/// Each share is verified against its key before it is folded in. When a
/// share fails, aggregation stops and the partial result comes back tagged
/// `valid = false`; this is not an error.
///
/// # Errors
/// * `EmptyAggregation` if `shares` is empty
/// * `LengthMismatch` if `shares` and `public_keys` differ in length
/// * `MessageHashMismatch` if any share signs a different hash
pub fn aggregate_signatures(
    shares: &[SignatureShare],
    message_hash: &Hash,
    public_keys: &[BlsPublicKey],
) -> Result<AggregationResult, AggregationError> {
    if shares.is_empty() {
        return Err(AggregationError::EmptyAggregation);
    }
    if shares.len() != public_keys.len() {
        return Err(AggregationError::LengthMismatch {
            signatures: shares.len(),
            other: public_keys.len(),
        });
    }
    if let Some(index) = shares
        .iter()
        .position(|share| share.message_hash != *message_hash)
    {
        return Err(AggregationError::MessageHashMismatch { index });
    }

    let message_point = hash_message(message_hash);
    let mut aggregate = SignaturePoint::identity();
    let mut signers: Vec<(Address, KeyPoint)> = Vec::with_capacity(shares.len());

    for (share, key) in shares.iter().zip(public_keys) {
        let decoded = share.signature.decode().and_then(|sig| Ok((sig, key.decode()?)));
        let verified = match decoded {
            Ok((sig, pk)) if pairing_check(&sig, &message_point, &pk) => Some((sig, pk)),
            _ => None,
        };

        let Some((sig, pk)) = verified else {
            debug!(signer = ?share.signer, "share failed verification, aggregation tagged invalid");
            return Ok(AggregationResult {
                aggregated_signature: aggregate,
                signers,
                message_hash: *message_hash,
                valid: false,
            });
        };

        aggregate = aggregate + sig;
        signers.push((share.signer, pk));
    }

    Ok(AggregationResult {
        aggregated_signature: aggregate,
        signers,
        message_hash: *message_hash,
        valid: true,
    })
}

/// Verify an aggregated signature over one message against the signers'
/// public keys.
pub fn verify_aggregated(
    aggregated_signature: &SignaturePoint,
    message_hash: &Hash,
    public_keys: &[KeyPoint],
) -> bool {
    if public_keys.is_empty() {
        return false;
    }
    if !aggregated_signature.is_valid() {
        return false;
    }
    if !public_keys.iter().all(KeyPoint::is_valid) {
        return false;
    }

    let aggregate_key = sum_points(public_keys);
    verify_points(aggregated_signature, message_hash, &aggregate_key)
}

/// Verify `(signature, hash, key)` triples in parallel.
///
/// Returns `false` as soon as one triple fails.
///
/// # Errors
/// * `LengthMismatch` if the three slices differ in length
pub fn batch_verify(
    signatures: &[BlsSignature],
    message_hashes: &[Hash],
    public_keys: &[BlsPublicKey],
) -> Result<bool, AggregationError> {
    use rayon::prelude::*;

    if signatures.len() != message_hashes.len() {
        return Err(AggregationError::LengthMismatch {
            signatures: signatures.len(),
            other: message_hashes.len(),
        });
    }
    if signatures.len() != public_keys.len() {
        return Err(AggregationError::LengthMismatch {
            signatures: signatures.len(),
            other: public_keys.len(),
        });
    }

    let all_valid = signatures
        .par_iter()
        .zip(message_hashes.par_iter())
        .zip(public_keys.par_iter())
        .all(|((sig, hash), pk)| verify_single(sig, hash, pk));

    Ok(all_valid)
}

/// Aggregate multiple BLS public keys into one.
///
/// # Errors
/// * `EmptyAggregation` if the input list is empty
/// * `Curve` if any public key fails to decode or validate
pub fn aggregate_public_keys(
    public_keys: &[BlsPublicKey],
) -> Result<BlsPublicKey, AggregationError> {
    if public_keys.is_empty() {
        return Err(AggregationError::EmptyAggregation);
    }

    let points = public_keys
        .iter()
        .map(BlsPublicKey::decode)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BlsPublicKey::from_point(&sum_points(&points)))
}

// =============================================================================
// SIGNING KEYS
// =============================================================================

/// A validator's BLS secret key.
///
/// The scalar is held as its canonical byte encoding and cleared on drop.
pub struct SecretKey {
    bytes: Zeroizing<[u8; 32]>,
}

impl SecretKey {
    /// Derive a key from at least 32 bytes of input key material.
    pub fn from_ikm(ikm: &[u8]) -> SignatureResult<Self> {
        let scalar = scalar_from_ikm(ikm).map_err(SignatureError::InvalidSecretKey)?;
        Ok(Self::from_scalar(&scalar))
    }

    /// Import a big-endian scalar, the encoding used by `blst` and most
    /// key files.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> SignatureResult<Self> {
        let scalar = scalar_from_be_bytes(bytes).map_err(SignatureError::InvalidSecretKey)?;
        Ok(Self::from_scalar(&scalar))
    }

    fn from_scalar(scalar: &Scalar) -> Self {
        Self {
            bytes: Zeroizing::new(scalar.to_bytes()),
        }
    }

    fn scalar(&self) -> SignatureResult<Scalar> {
        Option::<Scalar>::from(Scalar::from_bytes(&self.bytes))
            .ok_or(SignatureError::InvalidSecretKey(CurveError::InvalidScalar))
    }

    /// The matching public key, `sk · g2`.
    pub fn public_key(&self) -> SignatureResult<BlsPublicKey> {
        let sk = self.scalar()?;
        Ok(BlsPublicKey::from_point(&KeyPoint::generator().scale(&sk)))
    }

    /// Sign a message hash, `sk · H(m)`.
    pub fn sign(&self, message_hash: &Hash) -> SignatureResult<BlsSignature> {
        let sk = self.scalar()?;
        Ok(BlsSignature::from_point(&hash_message(message_hash).scale(&sk)))
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Deterministic key for index `i`.
    pub fn keypair(i: u8) -> (SecretKey, BlsPublicKey) {
        let sk = SecretKey::from_ikm(&[i.wrapping_add(1); 32]).unwrap();
        let pk = sk.public_key().unwrap();
        (sk, pk)
    }

    pub fn address(i: u8) -> Address {
        [i.wrapping_add(1); 20]
    }

    pub fn share(i: u8, sk: &SecretKey, message_hash: &Hash) -> SignatureShare {
        SignatureShare {
            signer: address(i),
            message_hash: *message_hash,
            signature: sk.sign(message_hash).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use proptest::prelude::*;

    const HASH: Hash = [0x42; 32];

    #[test]
    fn test_bls_verify_valid() {
        let (sk, pk) = keypair(0);
        let signature = sk.sign(&HASH).unwrap();

        assert!(verify_single(&signature, &HASH, &pk));
    }

    #[test]
    fn test_bls_verify_invalid_wrong_message() {
        let (sk, pk) = keypair(0);
        let signature = sk.sign(&[1u8; 32]).unwrap();

        assert!(!verify_single(&signature, &[2u8; 32], &pk));
    }

    #[test]
    fn test_bls_verify_invalid_wrong_key() {
        let (sk1, _) = keypair(1);
        let (_, pk2) = keypair(2);
        let signature = sk1.sign(&HASH).unwrap();

        assert!(!verify_single(&signature, &HASH, &pk2));
    }

    #[test]
    fn test_bls_verify_rejects_identity_inputs() {
        let (sk, pk) = keypair(0);
        let identity_sig = BlsSignature::from_point(&SignaturePoint::identity());
        let identity_pk = BlsPublicKey::from_point(&KeyPoint::identity());

        assert!(!verify_single(&identity_sig, &HASH, &pk));
        assert!(!verify_single(&sk.sign(&HASH).unwrap(), &HASH, &identity_pk));
        assert!(!verify_single(&identity_sig, &HASH, &identity_pk));
    }

    #[test]
    fn test_bls_verify_rejects_garbage_bytes() {
        let (_, pk) = keypair(0);
        let garbage = BlsSignature { bytes: [0xFF; 48] };

        assert!(!verify_single(&garbage, &HASH, &pk));
    }

    #[test]
    fn test_bls_aggregate_empty_fails() {
        let result = aggregate_signatures(&[], &HASH, &[]);
        assert_eq!(result, Err(AggregationError::EmptyAggregation));
    }

    #[test]
    fn test_bls_aggregate_length_mismatch() {
        let (sk, pk) = keypair(0);
        let shares = vec![share(0, &sk, &HASH), share(0, &sk, &HASH)];

        let result = aggregate_signatures(&shares, &HASH, &[pk]);
        assert_eq!(
            result,
            Err(AggregationError::LengthMismatch {
                signatures: 2,
                other: 1
            })
        );
    }

    #[test]
    fn test_bls_aggregate_message_hash_mismatch() {
        let (sk0, pk0) = keypair(0);
        let (sk1, pk1) = keypair(1);
        let shares = vec![share(0, &sk0, &HASH), share(1, &sk1, &[9u8; 32])];

        let result = aggregate_signatures(&shares, &HASH, &[pk0, pk1]);
        assert_eq!(result, Err(AggregationError::MessageHashMismatch { index: 1 }));
    }

    #[test]
    fn test_bls_aggregate_and_verify() {
        let keys: Vec<_> = (0..5).map(keypair).collect();
        let shares: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, (sk, _))| share(i as u8, sk, &HASH))
            .collect();
        let pks: Vec<_> = keys.iter().map(|(_, pk)| *pk).collect();

        let result = aggregate_signatures(&shares, &HASH, &pks).unwrap();

        assert!(result.valid);
        assert_eq!(result.signer_count(), 5);
        assert_eq!(result.signer_addresses()[4], address(4));
        assert!(verify_aggregated(
            &result.aggregated_signature,
            &HASH,
            &result.public_keys()
        ));
    }

    #[test]
    fn test_bls_aggregate_stops_on_bad_share() {
        let (sk0, pk0) = keypair(0);
        let (sk1, _) = keypair(1);
        let (_, pk2) = keypair(2);
        let shares = vec![share(0, &sk0, &HASH), share(1, &sk1, &HASH)];

        // Share 1 is checked against the wrong key.
        let result = aggregate_signatures(&shares, &HASH, &[pk0, pk2]).unwrap();

        assert!(!result.valid);
        assert_eq!(result.signer_count(), 1);
    }

    #[test]
    fn test_verify_aggregated_rejects_missing_signer() {
        let keys: Vec<_> = (0..3).map(keypair).collect();
        let shares: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, (sk, _))| share(i as u8, sk, &HASH))
            .collect();
        let pks: Vec<_> = keys.iter().map(|(_, pk)| *pk).collect();
        let result = aggregate_signatures(&shares, &HASH, &pks).unwrap();

        let mut fewer = result.public_keys();
        fewer.pop();
        assert!(!verify_aggregated(&result.aggregated_signature, &HASH, &fewer));
        assert!(!verify_aggregated(&result.aggregated_signature, &HASH, &[]));
        assert!(!verify_aggregated(
            &result.aggregated_signature,
            &[0u8; 32],
            &result.public_keys()
        ));
    }

    #[test]
    fn test_batch_verify() {
        let keys: Vec<_> = (0..4).map(keypair).collect();
        let hashes: Vec<Hash> = (0..4u8).map(|i| [i; 32]).collect();
        let sigs: Vec<_> = keys
            .iter()
            .zip(&hashes)
            .map(|((sk, _), h)| sk.sign(h).unwrap())
            .collect();
        let pks: Vec<_> = keys.iter().map(|(_, pk)| *pk).collect();

        assert_eq!(batch_verify(&sigs, &hashes, &pks), Ok(true));

        let mut tampered = hashes.clone();
        tampered[2] = [0xEE; 32];
        assert_eq!(batch_verify(&sigs, &tampered, &pks), Ok(false));

        assert!(matches!(
            batch_verify(&sigs, &hashes[..3], &pks),
            Err(AggregationError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_bls_aggregate_public_keys_empty_fails() {
        let result = aggregate_public_keys(&[]);
        assert_eq!(result, Err(AggregationError::EmptyAggregation));
    }

    #[test]
    fn test_bls_aggregate_public_keys_matches_point_sum() {
        let pks: Vec<_> = (0..5).map(|i| keypair(i).1).collect();
        let points: Vec<_> = pks.iter().map(|pk| pk.decode().unwrap()).collect();

        let agg = aggregate_public_keys(&pks).unwrap();
        assert_eq!(agg.decode().unwrap(), sum_points(&points));
    }

    #[test]
    fn test_secret_key_rejects_short_ikm() {
        assert!(matches!(
            SecretKey::from_ikm(&[1u8; 8]),
            Err(SignatureError::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let (sk, _) = keypair(0);
        assert_eq!(format!("{sk:?}"), "SecretKey(..)");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_aggregation_is_order_independent(n in 1usize..=20, rotate in 0usize..20) {
            let keys: Vec<_> = (0..n as u8).map(keypair).collect();
            let shares: Vec<_> = keys
                .iter()
                .enumerate()
                .map(|(i, (sk, _))| share(i as u8, sk, &HASH))
                .collect();
            let pks: Vec<_> = keys.iter().map(|(_, pk)| *pk).collect();

            let forward = aggregate_signatures(&shares, &HASH, &pks).unwrap();

            let mut shares_rot = shares.clone();
            let mut pks_rot = pks.clone();
            shares_rot.rotate_left(rotate % n);
            pks_rot.rotate_left(rotate % n);
            shares_rot.reverse();
            pks_rot.reverse();
            let shuffled = aggregate_signatures(&shares_rot, &HASH, &pks_rot).unwrap();

            prop_assert!(forward.valid && shuffled.valid);
            prop_assert_eq!(forward.aggregated_signature, shuffled.aggregated_signature);
        }
    }
}
