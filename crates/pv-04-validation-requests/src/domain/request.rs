//! Validation request entity
//!
//! State progression: Pending → InProgress → Completed, with Expired and
//! Failed as the other terminal states.

use super::scheme::{SignatureScheme, VerificationPolicy};
use pv_02_signature_aggregation::BlsPublicKey;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash, PaymentId, RequestId, SignatureKind, Timestamp};
use std::collections::HashMap;

/// Request lifecycle status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Open, no signatures yet
    #[default]
    Pending,
    /// Open, at least one signature
    InProgress,
    /// Quorum reached
    Completed,
    /// Aborted by governance
    Failed,
    /// Deadline passed and expiry was triggered
    Expired,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Expired)
    }

    /// Allowed forward transitions. No transition leaves a terminal state.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (Pending, Completed)
                | (InProgress, Completed)
                | (Pending, Expired)
                | (InProgress, Expired)
                | (Pending, Failed)
                | (InProgress, Failed)
        )
    }
}

/// An accepted validator signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedSignature {
    pub signer: Address,
    pub message_hash: Hash,
    pub scheme: SignatureScheme,
    /// Key the point signature was verified against
    pub public_key: Option<BlsPublicKey>,
    pub submitted_at: Timestamp,
}

impl SubmittedSignature {
    pub fn kind(&self) -> SignatureKind {
        self.scheme.kind()
    }
}

/// A validation request and everything collected for it.
#[derive(Clone, Debug)]
pub struct ValidationRequest {
    pub id: RequestId,
    pub payment_id: PaymentId,
    pub message_hash: Hash,
    pub amount: Amount,
    pub required_signatures: u32,
    pub received_signatures: u32,
    /// Accepted signatures that can enter the aggregate proof
    pub point_signatures: u32,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub deadline: Timestamp,
    pub is_high_value: bool,
    pub completed_at: Option<Timestamp>,
    /// Serialized aggregation proof, set once on completion
    pub aggregated_proof: Option<Vec<u8>>,
    signatures: HashMap<Address, SubmittedSignature>,
    signers: Vec<Address>,
}

impl ValidationRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RequestId,
        payment_id: PaymentId,
        message_hash: Hash,
        amount: Amount,
        required_signatures: u32,
        is_high_value: bool,
        created_at: Timestamp,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id,
            payment_id,
            message_hash,
            amount,
            required_signatures,
            received_signatures: 0,
            point_signatures: 0,
            status: RequestStatus::Pending,
            created_at,
            deadline,
            is_high_value,
            completed_at: None,
            aggregated_proof: None,
            signatures: HashMap::new(),
            signers: Vec::new(),
        }
    }

    pub fn has_signed(&self, signer: &Address) -> bool {
        self.signatures.contains_key(signer)
    }

    /// Signers in acceptance order.
    pub fn signers(&self) -> &[Address] {
        &self.signers
    }

    pub fn signature(&self, signer: &Address) -> Option<&SubmittedSignature> {
        self.signatures.get(signer)
    }

    /// Accepted signatures in acceptance order.
    pub fn signatures_in_order(&self) -> impl Iterator<Item = &SubmittedSignature> {
        self.signers.iter().filter_map(|s| self.signatures.get(s))
    }

    /// Past the deadline at `now`. The deadline itself is still open.
    pub fn is_past_deadline(&self, now: Timestamp) -> bool {
        now > self.deadline
    }

    /// Quorum under `policy`. Classical signatures only count when no
    /// point signature is admissible; otherwise the quorum is counted in
    /// signatures the aggregate proof can carry.
    pub fn quorum_reached(&self, policy: VerificationPolicy) -> bool {
        let counted = match policy {
            VerificationPolicy::ClassicalOnly => self.received_signatures,
            VerificationPolicy::PointOnly | VerificationPolicy::PointOrClassical => {
                self.point_signatures
            }
        };
        counted >= self.required_signatures
    }

    /// Record an accepted signature. Returns false for a repeat signer.
    pub fn add_signature(&mut self, signature: SubmittedSignature) -> bool {
        let signer = signature.signer;
        if self.signatures.contains_key(&signer) {
            return false;
        }
        if matches!(signature.scheme, SignatureScheme::Point(_)) {
            self.point_signatures = self.point_signatures.saturating_add(1);
        }
        self.signatures.insert(signer, signature);
        self.signers.push(signer);
        self.received_signatures = self.received_signatures.saturating_add(1);
        if self.status == RequestStatus::Pending {
            self.status = RequestStatus::InProgress;
        }
        true
    }

    /// Move to `next` if allowed. Returns whether the status changed.
    pub fn transition(&mut self, next: RequestStatus) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        true
    }

    pub fn view(&self) -> ValidationRequestView {
        ValidationRequestView {
            id: self.id,
            payment_id: self.payment_id,
            message_hash: self.message_hash,
            required_signatures: self.required_signatures,
            received_signatures: self.received_signatures,
            point_signatures: self.point_signatures,
            status: self.status,
            created_at: self.created_at,
            deadline: self.deadline,
            is_high_value: self.is_high_value,
        }
    }
}

/// Read-only summary returned to the payment layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequestView {
    pub id: RequestId,
    pub payment_id: PaymentId,
    pub message_hash: Hash,
    pub required_signatures: u32,
    pub received_signatures: u32,
    pub point_signatures: u32,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub deadline: Timestamp,
    pub is_high_value: bool,
}
