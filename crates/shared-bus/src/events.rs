//! # Protocol Events
//!
//! Lifecycle events emitted by the validator registry and the validation
//! request machine.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash, PaymentId, RequestId, SignatureKind, Timestamp};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    // =========================================================================
    // VALIDATOR REGISTRY
    // =========================================================================
    /// A validator deposited stake and joined the active set.
    ValidatorRegistered {
        validator: Address,
        stake: Amount,
        registered_at: Timestamp,
    },

    /// Governance slashed a validator and removed it from the active set.
    ValidatorSlashed {
        validator: Address,
        deducted: Amount,
        remaining_stake: Amount,
        reason: String,
    },

    /// The slash payout failed and the amount was moved into the reserve.
    SlashPayoutDeferred {
        validator: Address,
        amount: Amount,
        reserve_total: Amount,
    },

    /// The slash reserve was paid out to the beneficiary.
    SlashReserveReleased {
        beneficiary: Address,
        amount: Amount,
    },

    /// A validator left and its remaining stake was refunded.
    ValidatorExited {
        validator: Address,
        refunded: Amount,
    },

    // =========================================================================
    // VALIDATION REQUESTS
    // =========================================================================
    /// A trusted caller opened a validation request.
    ValidationRequested {
        request_id: RequestId,
        payment_id: PaymentId,
        message_hash: Hash,
        required_signatures: u32,
        is_high_value: bool,
        deadline: Timestamp,
    },

    /// A validator signature was verified and recorded.
    SignatureAccepted {
        request_id: RequestId,
        validator: Address,
        kind: SignatureKind,
        received_signatures: u32,
        required_signatures: u32,
    },

    /// Quorum was reached and the aggregated proof stored.
    ValidationCompleted {
        request_id: RequestId,
        payment_id: PaymentId,
        signers: u32,
        proof_valid: bool,
    },

    /// The deadline passed and someone called expire.
    ValidationExpired { request_id: RequestId },

    /// Governance aborted a request.
    ValidationAborted {
        request_id: RequestId,
        reason: String,
    },

    // =========================================================================
    // GOVERNANCE
    // =========================================================================
    /// New requests and signatures are halted.
    Paused { by: Address },

    /// New requests and signatures are accepted again.
    Unpaused { by: Address },

    /// The high-value classification threshold changed.
    HighValueThresholdUpdated { previous: Amount, current: Amount },
}

impl ProtocolEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ValidatorRegistered { .. }
            | Self::ValidatorSlashed { .. }
            | Self::SlashPayoutDeferred { .. }
            | Self::SlashReserveReleased { .. }
            | Self::ValidatorExited { .. } => EventTopic::Registry,

            Self::ValidationRequested { .. }
            | Self::SignatureAccepted { .. }
            | Self::ValidationCompleted { .. }
            | Self::ValidationExpired { .. }
            | Self::ValidationAborted { .. } => EventTopic::Validation,

            Self::Paused { .. }
            | Self::Unpaused { .. }
            | Self::HighValueThresholdUpdated { .. } => EventTopic::Governance,
        }
    }

    /// Short stable name, used as a log field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidatorRegistered { .. } => "validator_registered",
            Self::ValidatorSlashed { .. } => "validator_slashed",
            Self::SlashPayoutDeferred { .. } => "slash_payout_deferred",
            Self::SlashReserveReleased { .. } => "slash_reserve_released",
            Self::ValidatorExited { .. } => "validator_exited",
            Self::ValidationRequested { .. } => "validation_requested",
            Self::SignatureAccepted { .. } => "signature_accepted",
            Self::ValidationCompleted { .. } => "validation_completed",
            Self::ValidationExpired { .. } => "validation_expired",
            Self::ValidationAborted { .. } => "validation_aborted",
            Self::Paused { .. } => "paused",
            Self::Unpaused { .. } => "unpaused",
            Self::HighValueThresholdUpdated { .. } => "high_value_threshold_updated",
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Validator registration, slashing and exit.
    Registry,
    /// Validation request lifecycle.
    Validation,
    /// Pause and threshold changes.
    Governance,
    /// Wildcard.
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ProtocolEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
