//! Hash-to-curve for message points.

use crate::points::SignaturePoint;
use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::G1Projective;

/// Domain separation tag for validator signatures (minimal-signature-size
/// basic scheme: signatures in G1, keys in G2).
pub const SIGNATURE_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Deterministically map a message to a point in the signature group.
///
/// RFC 9380 `hash_to_curve` with `expand_message_xmd(SHA-256)` and the
/// simplified SWU map. The output is always in the prime-order subgroup.
pub fn hash_to_signature_point(message: &[u8], dst: &[u8]) -> SignaturePoint {
    let point =
        <G1Projective as HashToCurve<ExpandMsgXmd<sha2_09::Sha256>>>::hash_to_curve(message, dst);
    SignaturePoint::from_inner(point)
}
