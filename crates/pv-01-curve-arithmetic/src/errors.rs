//! Curve error types.

use thiserror::Error;

/// Errors raised while decoding or constructing curve elements.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurveError {
    /// Input does not have the fixed width of any known encoding
    #[error("Invalid encoding length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Accepted length(s), rendered for the message
        expected: &'static str,
        /// Actual length in bytes
        actual: usize,
    },

    /// Flag bits or field elements are malformed
    #[error("Invalid point encoding")]
    InvalidEncoding,

    /// Coordinates do not satisfy the curve equation
    #[error("Point is not on the curve")]
    NotOnCurve,

    /// Point lies outside the prime-order subgroup
    #[error("Point is not in the prime-order subgroup")]
    NotInSubgroup,

    /// The point at infinity where a proper point is required
    #[error("Point at infinity")]
    PointAtInfinity,

    /// Scalar bytes are non-canonical or zero
    #[error("Invalid scalar")]
    InvalidScalar,

    /// Key material too short for key derivation
    #[error("Insufficient key material: need {min} bytes, got {actual}")]
    InsufficientKeyMaterial {
        /// Minimum accepted length
        min: usize,
        /// Actual length
        actual: usize,
    },
}

/// Result type for curve operations
pub type CurveResult<T> = Result<T, CurveError>;
