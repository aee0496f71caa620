//! Bilinear pairing checks.

use crate::points::{KeyPoint, SignaturePoint};
use bls12_381::{multi_miller_loop, G1Affine, G2Affine, G2Prepared, Gt};

/// Check `Π e(p_i, q_i) == 1` with a single multi-Miller loop and one
/// final exponentiation.
pub fn pairing_product_is_identity(pairs: &[(SignaturePoint, KeyPoint)]) -> bool {
    if pairs.is_empty() {
        return false;
    }

    let g1: Vec<G1Affine> = pairs.iter().map(|(p, _)| p.to_affine()).collect();
    let g2: Vec<G2Prepared> = pairs
        .iter()
        .map(|(_, q)| G2Prepared::from(q.to_affine()))
        .collect();
    let terms: Vec<(&G1Affine, &G2Prepared)> = g1.iter().zip(g2.iter()).collect();

    multi_miller_loop(&terms).final_exponentiation() == Gt::identity()
}

/// Signature equation: `e(signature, g2) == e(message_point, public_key)`.
///
/// Evaluated as `e(signature, -g2) · e(message_point, public_key) == 1`.
/// Identity inputs are rejected outright; an identity signature with an
/// identity key would otherwise satisfy the equation for any message.
pub fn pairing_check(
    signature: &SignaturePoint,
    message_point: &SignaturePoint,
    public_key: &KeyPoint,
) -> bool {
    if signature.is_identity() || message_point.is_identity() || public_key.is_identity() {
        return false;
    }

    let neg_g2 = KeyPoint::from_inner(-bls12_381::G2Projective::from(G2Affine::generator()));
    pairing_product_is_identity(&[(*signature, neg_g2), (*message_point, *public_key)])
}
