//! Curve points for the two BLS12-381 groups.
//!
//! Both wrappers share one implementation (`curve_point!`) so that every
//! operation and every decoding rule is identical across groups; only the
//! underlying group and the encoding widths differ.

use crate::errors::{CurveError, CurveResult};
use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use std::iter::Sum;
use std::ops::{Add, Mul, Neg};

macro_rules! curve_point {
    (
        $(#[$meta:meta])*
        $name:ident, $proj:ty, $affine:ty, $compressed:expr, $uncompressed:expr, $lengths:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name($proj);

        impl $name {
            /// Width of the compressed encoding in bytes.
            pub const COMPRESSED_LEN: usize = $compressed;
            /// Width of the uncompressed encoding in bytes.
            pub const UNCOMPRESSED_LEN: usize = $uncompressed;

            /// The point at infinity (group identity).
            pub fn identity() -> Self {
                Self(<$proj>::identity())
            }

            /// The fixed group generator.
            pub fn generator() -> Self {
                Self(<$proj>::generator())
            }

            pub fn from_inner(point: $proj) -> Self {
                Self(point)
            }

            pub fn inner(&self) -> &$proj {
                &self.0
            }

            pub fn to_affine(&self) -> $affine {
                <$affine>::from(self.0)
            }

            /// Point doubling.
            pub fn double(&self) -> Self {
                Self(self.0.double())
            }

            /// Scalar multiplication.
            pub fn scale(&self, scalar: &Scalar) -> Self {
                Self(self.0 * scalar)
            }

            pub fn is_identity(&self) -> bool {
                bool::from(self.0.is_identity())
            }

            pub fn is_on_curve(&self) -> bool {
                bool::from(self.0.is_on_curve())
            }

            pub fn is_torsion_free(&self) -> bool {
                bool::from(self.to_affine().is_torsion_free())
            }

            /// On the curve, inside the prime-order subgroup, and not the identity.
            pub fn is_valid(&self) -> bool {
                self.validate().is_ok()
            }

            /// Like `is_valid`, but reports which check failed.
            pub fn validate(&self) -> CurveResult<()> {
                if !self.is_on_curve() {
                    return Err(CurveError::NotOnCurve);
                }
                if !self.is_torsion_free() {
                    return Err(CurveError::NotInSubgroup);
                }
                if self.is_identity() {
                    return Err(CurveError::PointAtInfinity);
                }
                Ok(())
            }

            pub fn to_compressed(&self) -> [u8; $compressed] {
                self.to_affine().to_compressed()
            }

            pub fn to_uncompressed(&self) -> [u8; $uncompressed] {
                self.to_affine().to_uncompressed()
            }

            /// Decode a compressed point, checking curve and subgroup membership.
            ///
            /// The identity decodes successfully; callers that need a proper
            /// point use `validate`.
            pub fn from_compressed(bytes: &[u8; $compressed]) -> CurveResult<Self> {
                let affine: Option<$affine> = <$affine>::from_compressed_unchecked(bytes).into();
                Self::checked(affine.ok_or(CurveError::InvalidEncoding)?)
            }

            /// Decode an uncompressed point, checking curve and subgroup membership.
            pub fn from_uncompressed(bytes: &[u8; $uncompressed]) -> CurveResult<Self> {
                Self::checked(Self::decode_uncompressed(bytes)?)
            }

            /// Decode an uncompressed point without the curve or subgroup check.
            ///
            /// Only flag bits and field-element canonicity are checked. Used
            /// when decoding persisted blobs whose points are re-validated
            /// before any cryptographic use.
            pub fn from_uncompressed_unchecked(bytes: &[u8; $uncompressed]) -> CurveResult<Self> {
                Ok(Self(<$proj>::from(Self::decode_uncompressed(bytes)?)))
            }

            /// Decode either fixed-width encoding, selected by length.
            pub fn from_slice(bytes: &[u8]) -> CurveResult<Self> {
                if let Ok(compressed) = <&[u8; $compressed]>::try_from(bytes) {
                    return Self::from_compressed(compressed);
                }
                if let Ok(uncompressed) = <&[u8; $uncompressed]>::try_from(bytes) {
                    return Self::from_uncompressed(uncompressed);
                }
                Err(CurveError::InvalidLength {
                    expected: $lengths,
                    actual: bytes.len(),
                })
            }

            fn decode_uncompressed(bytes: &[u8; $uncompressed]) -> CurveResult<$affine> {
                let affine: Option<$affine> = <$affine>::from_uncompressed_unchecked(bytes).into();
                affine.ok_or(CurveError::InvalidEncoding)
            }

            fn checked(affine: $affine) -> CurveResult<Self> {
                if !bool::from(affine.is_on_curve()) {
                    return Err(CurveError::NotOnCurve);
                }
                if !bool::from(affine.is_torsion_free()) {
                    return Err(CurveError::NotInSubgroup);
                }
                Ok(Self(<$proj>::from(affine)))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<Scalar> for $name {
            type Output = Self;

            fn mul(self, rhs: Scalar) -> Self {
                self.scale(&rhs)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::identity(), |acc, p| acc + p)
            }
        }

        impl<'a> Sum<&'a $name> for $name {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.fold(Self::identity(), |acc, p| acc + *p)
            }
        }
    };
}

curve_point!(
    /// A point in G1: signatures and hashed messages.
    SignaturePoint,
    G1Projective,
    G1Affine,
    48,
    96,
    "48 or 96"
);

curve_point!(
    /// A point in G2: validator public keys.
    KeyPoint,
    G2Projective,
    G2Affine,
    96,
    192,
    "96 or 192"
);

/// Fold points with the group law. The result does not depend on order.
pub fn sum_points<P>(points: &[P]) -> P
where
    P: Copy + Add<Output = P> + Default,
{
    points.iter().fold(P::default(), |acc, p| acc + *p)
}
