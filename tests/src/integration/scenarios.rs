//! # Lifecycle Scenarios
//!
//! End-to-end flows through the registry, the directory adapter, the
//! request machine and the aggregator:
//!
//! 1. **Standard quorum**: three validators, 67%, all three must sign
//! 2. **High-value quorum**: 75% above the threshold
//! 3. **Expiry**: no signatures within the window
//! 4. **Slash then exit**: half the stake is slashed, the rest refunded

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use pv_02_signature_aggregation::{AggregationResult, SignatureAggregationApi};
    use pv_03_validator_registry::{RegistryError, SlashPayout, ValidatorRegistryApi, ValidatorStatus};
    use pv_04_validation_requests::{RequestStatus, ValidationApi, ValidationError};
    use shared_types::ONE_TOKEN;

    const H: [u8; 32] = [0x42; 32];

    // =========================================================================
    // SCENARIO A: STANDARD QUORUM
    // =========================================================================

    #[test]
    fn test_standard_quorum_requires_all_three() {
        let h = Harness::with_validators(3);
        let id = h.open(1, H, 100 * ONE_TOKEN);

        let request = h.node.requests.get_validation_request(id).unwrap();
        assert_eq!(request.required_signatures, 3);
        assert!(!request.is_high_value);

        h.sign(1, id).unwrap();
        h.sign(2, id).unwrap();
        let request = h.node.requests.get_validation_request(id).unwrap();
        assert_eq!(request.status, RequestStatus::InProgress);
        assert_eq!(request.received_signatures, 2);
        assert!(!h.node.requests.verify_aggregated_signature(id));

        h.sign(3, id).unwrap();
        assert_eq!(
            h.node.requests.get_validation_request(id).unwrap().status,
            RequestStatus::Completed
        );
        assert!(h.node.requests.verify_aggregated_signature(id));
    }

    #[test]
    fn test_completed_proof_verifies_independently() {
        let h = Harness::with_validators(3);
        let id = h.open(1, H, 100);
        for i in 1..=3 {
            h.sign(i, id).unwrap();
        }

        let blob = h.node.requests.get_aggregated_proof(id).unwrap();
        let proof = AggregationResult::from_bytes(&blob).unwrap();
        assert!(proof.valid);
        assert_eq!(proof.message_hash, H);
        assert_eq!(proof.signer_count(), 3);
        assert!(h.node.aggregator.verify_aggregated(
            &proof.aggregated_signature,
            &H,
            &proof.public_keys()
        ));
        // The same aggregate does not verify over another message.
        assert!(!h.node.aggregator.verify_aggregated(
            &proof.aggregated_signature,
            &[0x43; 32],
            &proof.public_keys()
        ));
    }

    #[test]
    fn test_signers_gain_activity_in_registry() {
        let h = Harness::with_validators(3);
        let id = h.open(1, H, 100);
        h.clock.advance(30);
        h.sign(2, id).unwrap();

        let signer = h.node.registry.get_validator(&h.validator(2).address).unwrap();
        let idle = h.node.registry.get_validator(&h.validator(1).address).unwrap();
        assert_eq!(signer.validation_count, 1);
        assert_eq!(signer.last_active_at, GENESIS + 30);
        assert_eq!(idle.validation_count, 0);
    }

    // =========================================================================
    // SCENARIO B: HIGH-VALUE QUORUM
    // =========================================================================

    #[test]
    fn test_high_value_request_completes_only_with_all_three() {
        let h = Harness::with_validators(3);
        h.node
            .requests
            .set_high_value_threshold(GOVERNANCE, 1_000)
            .unwrap();
        let id = h.open(2, H, 2_000);

        let request = h.node.requests.get_validation_request(id).unwrap();
        assert!(request.is_high_value);
        assert_eq!(request.required_signatures, 3);

        h.sign(1, id).unwrap();
        h.sign(3, id).unwrap();
        assert!(!h.node.requests.verify_aggregated_signature(id));

        h.sign(2, id).unwrap();
        assert!(h.node.requests.verify_aggregated_signature(id));
    }

    #[test]
    fn test_larger_set_needs_more_for_high_value() {
        let h = Harness::with_validators(10);
        h.node
            .requests
            .set_high_value_threshold(GOVERNANCE, 1_000)
            .unwrap();
        let standard = h.open(1, [1; 32], 999);
        let high = h.open(2, [2; 32], 1_000);

        for i in 1..=7 {
            h.sign(i, standard).unwrap();
            h.sign(i, high).unwrap();
        }
        assert!(h.node.requests.verify_aggregated_signature(standard));
        assert!(!h.node.requests.verify_aggregated_signature(high));

        h.sign(8, high).unwrap();
        assert!(h.node.requests.verify_aggregated_signature(high));
    }

    // =========================================================================
    // SCENARIO C: EXPIRY
    // =========================================================================

    #[test]
    fn test_unsigned_request_expires() {
        let h = Harness::with_validators(3);
        let id = h.open(3, H, 100);

        h.clock.advance(5 * 60 + 1);
        h.node.requests.expire_validation(id).unwrap();

        assert_eq!(
            h.node.requests.get_validation_request(id).unwrap().status,
            RequestStatus::Expired
        );
        assert_eq!(h.sign(1, id), Err(ValidationError::ValidationExpired(id)));
        assert!(!h.node.requests.verify_aggregated_signature(id));
    }

    #[test]
    fn test_expiry_not_allowed_inside_window() {
        let h = Harness::with_validators(3);
        let id = h.open(3, H, 100);

        h.clock.advance(60);
        assert_eq!(
            h.node.requests.expire_validation(id),
            Err(ValidationError::ValidationNotExpirable(id))
        );
    }

    // =========================================================================
    // SCENARIO D: SLASH THEN EXIT
    // =========================================================================

    #[test]
    fn test_slash_then_exit_refunds_remainder() {
        let h = Harness::with_validators(3);
        let target = h.validator(2).address;

        let outcome = h
            .node
            .registry
            .slash(GOVERNANCE, target, "signed conflicting payments")
            .unwrap();
        assert_eq!(outcome.deducted, 15 * ONE_TOKEN / 2);
        assert_eq!(outcome.remaining_stake, 15 * ONE_TOKEN / 2);
        assert_eq!(outcome.payout, SlashPayout::Paid);
        assert_eq!(h.node.treasury.balance_of(&BENEFICIARY), 15 * ONE_TOKEN / 2);

        let slashed = h.node.registry.get_validator(&target).unwrap();
        assert_eq!(slashed.status, ValidatorStatus::Slashed);
        assert!(!h.node.registry.active_validators().contains(&target));
        assert_eq!(h.node.registry.active_count(), 2);

        let refunded = h.node.registry.exit(target).unwrap();
        assert_eq!(refunded, 15 * ONE_TOKEN / 2);
        assert_eq!(h.node.treasury.balance_of(&target), 15 * ONE_TOKEN / 2);
        assert_eq!(
            h.node.registry.get_validator(&target).unwrap().status,
            ValidatorStatus::Exiting
        );
    }

    #[test]
    fn test_slashed_validator_cannot_sign() {
        let h = Harness::with_validators(4);
        let id = h.open(4, H, 100);
        let target = h.validator(4).address;

        h.node.registry.slash(GOVERNANCE, target, "offline").unwrap();

        assert_eq!(h.sign(4, id), Err(ValidationError::ValidatorNotActive(target)));
    }

    #[test]
    fn test_too_few_validators_after_slash() {
        let h = Harness::with_validators(3);
        h.node
            .registry
            .slash(GOVERNANCE, h.validator(1).address, "offline")
            .unwrap();

        let result = h
            .node
            .requests
            .request_validation(REQUESTER, 1, H, 100);
        assert_eq!(
            result,
            Err(ValidationError::InsufficientSignatures {
                active: 2,
                minimum: 3
            })
        );
    }

    #[test]
    fn test_failed_payout_is_reserved_and_released() {
        let h = Harness::with_validators(3);
        h.node.treasury.set_failing(true);

        let outcome = h
            .node
            .registry
            .slash(GOVERNANCE, h.validator(1).address, "offline")
            .unwrap();
        assert_eq!(outcome.payout, SlashPayout::Reserved);
        assert_eq!(h.node.registry.slash_reserve(), 15 * ONE_TOKEN / 2);

        h.node.treasury.set_failing(false);
        assert_eq!(
            h.node.registry.release_slash_reserve(GOVERNANCE).unwrap(),
            15 * ONE_TOKEN / 2
        );
        assert_eq!(h.node.registry.slash_reserve(), 0);
        assert_eq!(h.node.treasury.balance_of(&BENEFICIARY), 15 * ONE_TOKEN / 2);
    }

    #[test]
    fn test_exited_identity_cannot_return() {
        let mut h = Harness::with_validators(3);
        let target = h.validator(3).address;
        h.node.registry.exit(target).unwrap();

        assert_eq!(
            h.register(3),
            Err(RegistryError::DuplicateRegistration(target))
        );
    }

    // =========================================================================
    // REPLAY AND QUORUM STABILITY
    // =========================================================================

    #[test]
    fn test_message_hash_is_single_use_across_requests() {
        let h = Harness::with_validators(3);
        let id = h.open(1, H, 100);
        for i in 1..=3 {
            h.sign(i, id).unwrap();
        }

        assert_eq!(
            h.node.requests.request_validation(REQUESTER, 2, H, 100),
            Err(ValidationError::MessageAlreadyProcessed)
        );
    }

    #[test]
    fn test_quorum_unchanged_when_set_grows() {
        let mut h = Harness::with_validators(3);
        let id = h.open(1, H, 100);

        for i in 4..=10 {
            h.register(i).unwrap();
        }
        assert_eq!(
            h.node
                .requests
                .get_validation_request(id)
                .unwrap()
                .required_signatures,
            3
        );

        // Late joiners may sign; three signatures still complete it.
        h.sign(9, id).unwrap();
        h.sign(1, id).unwrap();
        h.sign(2, id).unwrap();
        assert!(h.node.requests.verify_aggregated_signature(id));
    }
}
