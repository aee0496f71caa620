//! # Curve Arithmetic (PV-01)
//!
//! Point arithmetic over the two BLS12-381 groups used by validator
//! signatures:
//!
//! | Type | Group | Role | Compressed | Uncompressed |
//! |------|-------|------|-----------|--------------|
//! | `SignaturePoint` | G1 | signatures, hashed messages | 48 | 96 |
//! | `KeyPoint` | G2 | validator public keys | 96 | 192 |
//!
//! ## Security Properties
//!
//! - Full group law from `bls12_381`, so aggregation is commutative and
//!   associative: folding signatures in any order yields the same point.
//! - Decoding separates encoding errors, off-curve points and points outside
//!   the prime-order subgroup.
//! - Hash-to-curve is RFC 9380 (`expand_message_xmd` with SHA-256, SSWU).
//! - The pairing check is a genuine bilinear check computed with a single
//!   multi-Miller loop.

pub mod errors;
pub mod hashing;
pub mod pairing;
pub mod points;
pub mod scalar;

pub use errors::{CurveError, CurveResult};
pub use hashing::{hash_to_signature_point, SIGNATURE_DST};
pub use pairing::{pairing_check, pairing_product_is_identity};
pub use points::{sum_points, KeyPoint, SignaturePoint};
pub use scalar::{scalar_from_be_bytes, scalar_from_ikm, Scalar, MIN_IKM_LEN};
