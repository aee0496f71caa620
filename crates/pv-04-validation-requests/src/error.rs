//! Error types for the validation request machine

use shared_types::{Address, RequestId};
use thiserror::Error;

/// Validation request errors
///
/// Every error is returned before any state changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// New requests and signatures are halted
    #[error("Validation is paused")]
    Paused,

    /// Caller lacks the required role
    #[error("Unauthorized action by {0:?}")]
    UnauthorizedAction(Address),

    /// The message hash already backed a request
    #[error("Message hash already processed")]
    MessageAlreadyProcessed,

    /// Too few active validators for any quorum
    #[error("Insufficient active validators: have {active}, need {minimum}")]
    InsufficientSignatures { active: usize, minimum: usize },

    /// No request with this id
    #[error("Unknown validation request: {0}")]
    InvalidValidationRequest(RequestId),

    /// The request deadline has passed
    #[error("Validation request {0} expired")]
    ValidationExpired(RequestId),

    /// The request already completed or was aborted
    #[error("Validation request {0} is closed")]
    ValidationClosed(RequestId),

    /// Signer is not an active validator
    #[error("Validator not active: {0:?}")]
    ValidatorNotActive(Address),

    /// Signer already signed this request
    #[error("Validator {0:?} already signed")]
    AlreadySigned(Address),

    /// Signature failed verification or has an unsupported shape
    #[error("Invalid signature")]
    InvalidSignature,

    /// The signer's registered key is missing or not a valid point
    #[error("Invalid BLS public key for {0:?}")]
    InvalidBlsPublicKey(Address),

    /// Expiry requested before the deadline or on a terminal request
    #[error("Validation request {0} cannot be expired")]
    ValidationNotExpirable(RequestId),
}

/// Result type for validation request operations
pub type ValidationResult<T> = Result<T, ValidationError>;
