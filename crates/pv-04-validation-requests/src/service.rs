//! Validation Request Service
//!
//! Requests live in an append-only table indexed by `id - 1`. All
//! mutations hold the write lock for their full duration; completion is
//! guarded by the status check, so the proof is built exactly once.

use crate::domain::quorum::{
    quorum_percent, required_signatures, HIGH_VALUE_QUORUM_PERCENT, MIN_ACTIVE_VALIDATORS,
    STANDARD_QUORUM_PERCENT,
};
use crate::domain::request::{
    RequestStatus, SubmittedSignature, ValidationRequest, ValidationRequestView,
};
use crate::domain::scheme::{SignatureScheme, VerificationPolicy};
use crate::error::{ValidationError, ValidationResult};
use crate::ports::inbound::ValidationApi;
use crate::ports::outbound::ValidatorDirectory;
use parking_lot::RwLock;
use pv_02_signature_aggregation::{
    AggregationResult, BlsPublicKey, SignatureAggregationApi, SignatureShare,
};
use shared_bus::{EventPublisher, ProtocolEvent};
use shared_types::{
    format_address, Address, Amount, Hash, PaymentId, RequestId, TimeSource, ONE_TOKEN, ZERO_ADDRESS,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Seconds a request stays open for signatures.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Validation configuration
#[derive(Clone, Debug)]
pub struct ValidationConfig {
    /// May pause, abort and tune thresholds
    pub governance: Address,
    /// May open requests
    pub trusted_requesters: Vec<Address>,
    /// Amounts at or above this use the high-value quorum
    pub high_value_threshold: Amount,
    pub timeout_secs: u64,
    pub min_active_validators: usize,
    pub standard_threshold_percent: u8,
    pub high_value_threshold_percent: u8,
    pub verification_policy: VerificationPolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            governance: ZERO_ADDRESS,
            trusted_requesters: Vec::new(),
            high_value_threshold: 10_000 * ONE_TOKEN,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            min_active_validators: MIN_ACTIVE_VALIDATORS,
            standard_threshold_percent: STANDARD_QUORUM_PERCENT,
            high_value_threshold_percent: HIGH_VALUE_QUORUM_PERCENT,
            verification_policy: VerificationPolicy::default(),
        }
    }
}

/// Internal state
struct ValidationState {
    requests: Vec<ValidationRequest>,
    processed_hashes: HashSet<Hash>,
    paused: bool,
    high_value_threshold: Amount,
}

impl ValidationState {
    fn get(&self, id: RequestId) -> Option<&ValidationRequest> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.requests.get(index)
    }

    fn get_mut(&mut self, id: RequestId) -> Option<&mut ValidationRequest> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.requests.get_mut(index)
    }

    fn next_id(&self) -> RequestId {
        self.requests.len() as RequestId + 1
    }
}

/// Validation request machine
pub struct ValidationRequestService<D, A, E, C>
where
    D: ValidatorDirectory,
    A: SignatureAggregationApi,
    E: EventPublisher,
    C: TimeSource,
{
    config: ValidationConfig,
    state: RwLock<ValidationState>,
    directory: Arc<D>,
    aggregator: Arc<A>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<D, A, E, C> ValidationRequestService<D, A, E, C>
where
    D: ValidatorDirectory,
    A: SignatureAggregationApi,
    E: EventPublisher,
    C: TimeSource,
{
    pub fn new(
        config: ValidationConfig,
        directory: Arc<D>,
        aggregator: Arc<A>,
        events: Arc<E>,
        clock: Arc<C>,
    ) -> Self {
        let state = ValidationState {
            requests: Vec::new(),
            processed_hashes: HashSet::new(),
            paused: false,
            high_value_threshold: config.high_value_threshold,
        };
        Self {
            config,
            state: RwLock::new(state),
            directory,
            aggregator,
            events,
            clock,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn ensure_governance(&self, caller: Address) -> ValidationResult<()> {
        if caller != self.config.governance {
            warn!(caller = %format_address(&caller), "governance action rejected");
            return Err(ValidationError::UnauthorizedAction(caller));
        }
        Ok(())
    }

    /// Verify a signature under the configured policy.
    fn verify_signature(
        &self,
        caller: Address,
        message_hash: &Hash,
        signature: &[u8],
    ) -> ValidationResult<(SignatureScheme, Option<BlsPublicKey>)> {
        let scheme = SignatureScheme::from_bytes(signature)
            .filter(|s| self.config.verification_policy.allows(s.kind()))
            .ok_or(ValidationError::InvalidSignature)?;

        match &scheme {
            SignatureScheme::Point(sig) => {
                let public_key = self
                    .directory
                    .public_key(&caller)
                    .ok_or(ValidationError::InvalidBlsPublicKey(caller))?;
                if public_key.decode().is_err() {
                    return Err(ValidationError::InvalidBlsPublicKey(caller));
                }
                if !self.aggregator.verify_single(sig, message_hash, &public_key) {
                    return Err(ValidationError::InvalidSignature);
                }
                Ok((scheme, Some(public_key)))
            }
            SignatureScheme::Classical(sig) => {
                self.aggregator
                    .verify_classical(message_hash, sig, caller)
                    .map_err(|_| ValidationError::InvalidSignature)?;
                Ok((scheme, None))
            }
        }
    }

    /// Aggregate the point signatures of a request that reached quorum.
    fn build_proof(&self, request: &ValidationRequest) -> Option<AggregationResult> {
        let (shares, keys): (Vec<_>, Vec<_>) = request
            .signatures_in_order()
            .filter_map(|s| match (&s.scheme, s.public_key) {
                (SignatureScheme::Point(sig), Some(pk)) => Some((
                    SignatureShare {
                        signer: s.signer,
                        message_hash: s.message_hash,
                        signature: *sig,
                    },
                    pk,
                )),
                _ => None,
            })
            .unzip();

        match self
            .aggregator
            .aggregate_signatures(&shares, &request.message_hash, &keys)
        {
            Ok(proof) => Some(proof),
            Err(e) => {
                warn!(request_id = request.id, error = %e, "no aggregation proof built");
                None
            }
        }
    }
}

impl<D, A, E, C> ValidationApi for ValidationRequestService<D, A, E, C>
where
    D: ValidatorDirectory,
    A: SignatureAggregationApi,
    E: EventPublisher,
    C: TimeSource,
{
    fn request_validation(
        &self,
        caller: Address,
        payment_id: PaymentId,
        message_hash: Hash,
        amount: Amount,
    ) -> ValidationResult<RequestId> {
        let now = self.clock.now();
        let request = {
            let mut state = self.state.write();
            if state.paused {
                return Err(ValidationError::Paused);
            }
            if !self.config.trusted_requesters.contains(&caller) {
                warn!(caller = %format_address(&caller), "untrusted validation requester");
                return Err(ValidationError::UnauthorizedAction(caller));
            }
            if state.processed_hashes.contains(&message_hash) {
                return Err(ValidationError::MessageAlreadyProcessed);
            }

            let active = self.directory.active_count();
            if active < self.config.min_active_validators {
                return Err(ValidationError::InsufficientSignatures {
                    active,
                    minimum: self.config.min_active_validators,
                });
            }

            let is_high_value = amount >= state.high_value_threshold;
            let percent = quorum_percent(
                is_high_value,
                self.config.standard_threshold_percent,
                self.config.high_value_threshold_percent,
            );
            let required = required_signatures(active, percent);

            let id = state.next_id();
            let request = ValidationRequest::new(
                id,
                payment_id,
                message_hash,
                amount,
                required,
                is_high_value,
                now,
                now.saturating_add(self.config.timeout_secs),
            );
            let view = request.view();
            state.requests.push(request);
            state.processed_hashes.insert(message_hash);

            info!(
                request_id = id,
                payment_id,
                required_signatures = required,
                active_validators = active,
                is_high_value,
                "validation requested"
            );
            view
        };

        self.events.publish(ProtocolEvent::ValidationRequested {
            request_id: request.id,
            payment_id,
            message_hash,
            required_signatures: request.required_signatures,
            is_high_value: request.is_high_value,
            deadline: request.deadline,
        });
        Ok(request.id)
    }

    fn get_validation_request(&self, request_id: RequestId) -> Option<ValidationRequestView> {
        self.state.read().get(request_id).map(ValidationRequest::view)
    }

    fn verify_aggregated_signature(&self, request_id: RequestId) -> bool {
        let state = self.state.read();
        let Some(request) = state.get(request_id) else {
            return false;
        };
        if request.status != RequestStatus::Completed {
            return false;
        }
        let Some(blob) = request.aggregated_proof.as_deref() else {
            return false;
        };
        let Ok(proof) = AggregationResult::from_bytes(blob) else {
            debug!(request_id, "stored proof failed to decode");
            return false;
        };
        if !proof.valid || proof.message_hash != request.message_hash {
            return false;
        }
        if proof.signer_count() < request.required_signatures as usize {
            return false;
        }
        if !proof
            .signer_addresses()
            .iter()
            .all(|signer| request.has_signed(signer))
        {
            return false;
        }

        self.aggregator.verify_aggregated(
            &proof.aggregated_signature,
            &request.message_hash,
            &proof.public_keys(),
        )
    }

    fn sign_validation(
        &self,
        caller: Address,
        request_id: RequestId,
        signature: &[u8],
    ) -> ValidationResult<()> {
        let now = self.clock.now();
        let mut events = Vec::with_capacity(2);
        {
            let mut state = self.state.write();
            if state.paused {
                return Err(ValidationError::Paused);
            }

            let request = state
                .get(request_id)
                .ok_or(ValidationError::InvalidValidationRequest(request_id))?;
            if request.status == RequestStatus::Expired || request.is_past_deadline(now) {
                return Err(ValidationError::ValidationExpired(request_id));
            }
            if request.status.is_terminal() {
                return Err(ValidationError::ValidationClosed(request_id));
            }
            if !self.directory.is_active(&caller) {
                return Err(ValidationError::ValidatorNotActive(caller));
            }
            if request.has_signed(&caller) {
                return Err(ValidationError::AlreadySigned(caller));
            }

            let message_hash = request.message_hash;
            let (scheme, public_key) = self
                .verify_signature(caller, &message_hash, signature)
                .inspect_err(|e| {
                    warn!(
                        request_id,
                        validator = %format_address(&caller),
                        error = %e,
                        "signature rejected"
                    );
                })?;
            let kind = scheme.kind();

            let Some(request) = state.get_mut(request_id) else {
                return Err(ValidationError::InvalidValidationRequest(request_id));
            };
            request.add_signature(SubmittedSignature {
                signer: caller,
                message_hash,
                scheme,
                public_key,
                submitted_at: now,
            });
            self.directory.record_validation(caller, now);

            info!(
                request_id,
                validator = %format_address(&caller),
                ?kind,
                received = request.received_signatures,
                point = request.point_signatures,
                required = request.required_signatures,
                "signature accepted"
            );
            events.push(ProtocolEvent::SignatureAccepted {
                request_id,
                validator: caller,
                kind,
                received_signatures: request.received_signatures,
                required_signatures: request.required_signatures,
            });

            if request.quorum_reached(self.config.verification_policy)
                && request.status != RequestStatus::Completed
            {
                let proof = self.build_proof(request);
                let proof_valid = proof.as_ref().is_some_and(|p| p.valid);
                request.aggregated_proof = proof.as_ref().map(AggregationResult::to_bytes);
                request.transition(RequestStatus::Completed);
                request.completed_at = Some(now);

                info!(
                    request_id,
                    payment_id = request.payment_id,
                    signers = request.received_signatures,
                    proof_valid,
                    "validation completed"
                );
                events.push(ProtocolEvent::ValidationCompleted {
                    request_id,
                    payment_id: request.payment_id,
                    signers: request.received_signatures,
                    proof_valid,
                });
            }
        }

        for event in events {
            self.events.publish(event);
        }
        Ok(())
    }

    fn expire_validation(&self, request_id: RequestId) -> ValidationResult<()> {
        let now = self.clock.now();
        {
            let mut state = self.state.write();
            let request = state
                .get_mut(request_id)
                .ok_or(ValidationError::InvalidValidationRequest(request_id))?;
            if request.status.is_terminal() || !request.is_past_deadline(now) {
                return Err(ValidationError::ValidationNotExpirable(request_id));
            }
            request.transition(RequestStatus::Expired);
            info!(
                request_id,
                received = request.received_signatures,
                required = request.required_signatures,
                "validation expired"
            );
        }

        self.events
            .publish(ProtocolEvent::ValidationExpired { request_id });
        Ok(())
    }

    fn get_signers(&self, request_id: RequestId) -> Option<Vec<Address>> {
        self.state
            .read()
            .get(request_id)
            .map(|r| r.signers().to_vec())
    }

    fn has_signed(&self, request_id: RequestId, validator: &Address) -> bool {
        self.state
            .read()
            .get(request_id)
            .is_some_and(|r| r.has_signed(validator))
    }

    fn get_aggregated_proof(&self, request_id: RequestId) -> Option<Vec<u8>> {
        self.state
            .read()
            .get(request_id)
            .and_then(|r| r.aggregated_proof.clone())
    }

    fn abort_validation(
        &self,
        caller: Address,
        request_id: RequestId,
        reason: &str,
    ) -> ValidationResult<()> {
        self.ensure_governance(caller)?;
        {
            let mut state = self.state.write();
            let request = state
                .get_mut(request_id)
                .ok_or(ValidationError::InvalidValidationRequest(request_id))?;
            if !request.transition(RequestStatus::Failed) {
                return Err(ValidationError::ValidationClosed(request_id));
            }
            info!(request_id, reason, "validation aborted");
        }

        self.events.publish(ProtocolEvent::ValidationAborted {
            request_id,
            reason: reason.to_string(),
        });
        Ok(())
    }

    fn pause(&self, caller: Address) -> ValidationResult<()> {
        self.ensure_governance(caller)?;
        let changed = !std::mem::replace(&mut self.state.write().paused, true);
        if changed {
            info!(by = %format_address(&caller), "validation paused");
            self.events.publish(ProtocolEvent::Paused { by: caller });
        }
        Ok(())
    }

    fn unpause(&self, caller: Address) -> ValidationResult<()> {
        self.ensure_governance(caller)?;
        let changed = std::mem::replace(&mut self.state.write().paused, false);
        if changed {
            info!(by = %format_address(&caller), "validation unpaused");
            self.events.publish(ProtocolEvent::Unpaused { by: caller });
        }
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.state.read().paused
    }

    fn set_high_value_threshold(&self, caller: Address, amount: Amount) -> ValidationResult<()> {
        self.ensure_governance(caller)?;
        let previous = std::mem::replace(&mut self.state.write().high_value_threshold, amount);
        info!(previous, current = amount, "high-value threshold updated");
        self.events.publish(ProtocolEvent::HighValueThresholdUpdated {
            previous,
            current: amount,
        });
        Ok(())
    }

    fn high_value_threshold(&self) -> Amount {
        self.state.read().high_value_threshold
    }
}
