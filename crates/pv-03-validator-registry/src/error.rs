//! Error types for the validator registry

use shared_types::{Address, Amount};
use thiserror::Error;

/// Registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Deposit below the configured minimum
    #[error("Insufficient stake: provided {provided}, minimum {minimum}")]
    InsufficientStake { provided: Amount, minimum: Amount },

    /// A record already exists for this identity (in any status)
    #[error("Validator already registered: {0:?}")]
    DuplicateRegistration(Address),

    /// Public key does not decode to a valid G2 point
    #[error("Invalid validator public key: {reason}")]
    InvalidPublicKey { reason: String },

    /// Operation requires an Active (or, for exit, Slashed) validator
    #[error("Validator not active: {0:?}")]
    ValidatorNotActive(Address),

    /// No record exists for this identity
    #[error("Unknown validator: {0:?}")]
    UnknownValidator(Address),

    /// Caller is not the governance address
    #[error("Unauthorized action by {0:?}")]
    UnauthorizedAction(Address),

    /// Treasury refused the transfer
    #[error("Payout failed: {reason}")]
    PayoutFailed { reason: String },
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
