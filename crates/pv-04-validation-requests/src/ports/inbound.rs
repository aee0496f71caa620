//! Driving Ports (API)

use crate::domain::request::ValidationRequestView;
use crate::error::ValidationResult;
use shared_types::{Address, Amount, Hash, PaymentId, RequestId};

/// Validation request API.
///
/// State-changing calls are serialized; each either applies completely or
/// fails with no effect.
pub trait ValidationApi: Send + Sync {
    // =========================================================================
    // Payment layer
    // =========================================================================

    /// Open a request for `message_hash`. Only trusted requesters may call.
    fn request_validation(
        &self,
        caller: Address,
        payment_id: PaymentId,
        message_hash: Hash,
        amount: Amount,
    ) -> ValidationResult<RequestId>;

    fn get_validation_request(&self, request_id: RequestId) -> Option<ValidationRequestView>;

    /// Hard gate before releasing funds. Never errors; `false` means
    /// "not authorized".
    fn verify_aggregated_signature(&self, request_id: RequestId) -> bool;

    // =========================================================================
    // Validators
    // =========================================================================

    /// Submit a co-signature (48-byte point or 65-byte classical).
    fn sign_validation(
        &self,
        caller: Address,
        request_id: RequestId,
        signature: &[u8],
    ) -> ValidationResult<()>;

    // =========================================================================
    // Anyone
    // =========================================================================

    /// Move a request past its deadline to Expired.
    fn expire_validation(&self, request_id: RequestId) -> ValidationResult<()>;

    fn get_signers(&self, request_id: RequestId) -> Option<Vec<Address>>;

    fn has_signed(&self, request_id: RequestId, validator: &Address) -> bool;

    /// Raw serialized aggregation proof of a completed request.
    fn get_aggregated_proof(&self, request_id: RequestId) -> Option<Vec<u8>>;

    // =========================================================================
    // Governance
    // =========================================================================

    fn abort_validation(
        &self,
        caller: Address,
        request_id: RequestId,
        reason: &str,
    ) -> ValidationResult<()>;

    fn pause(&self, caller: Address) -> ValidationResult<()>;

    fn unpause(&self, caller: Address) -> ValidationResult<()>;

    fn is_paused(&self) -> bool;

    fn set_high_value_threshold(&self, caller: Address, amount: Amount) -> ValidationResult<()>;

    fn high_value_threshold(&self) -> Amount;
}
