//! # Test Harness
//!
//! A fully wired node on a manual clock with deterministic validator keys.

use node_runtime::container::config::NodeConfig;
use node_runtime::ValidationNode;
use pv_02_signature_aggregation::SecretKey;
use pv_03_validator_registry::{RegistryResult, ValidatorRegistryApi};
use pv_04_validation_requests::{ValidationApi, ValidationResult};
use shared_types::{Address, Amount, Hash, PaymentId, ManualTimeSource, RequestId, Timestamp, ONE_TOKEN};
use std::sync::Arc;

pub const GOVERNANCE: Address = [0xAA; 20];
pub const BENEFICIARY: Address = [0xBE; 20];
pub const REQUESTER: Address = [0xCC; 20];
pub const GENESIS: Timestamp = 1_700_000_000;
pub const STAKE: Amount = 15 * ONE_TOKEN;

/// Deterministic validator identity.
pub struct TestValidator {
    pub address: Address,
    pub key: SecretKey,
}

impl TestValidator {
    pub fn new(index: u8) -> Self {
        let mut address = [0u8; 20];
        address[0] = 0x10;
        address[19] = index;
        let key = SecretKey::from_ikm(&[index; 32]).expect("valid key material");
        Self { address, key }
    }

    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.key.public_key().expect("public key").bytes.to_vec()
    }

    pub fn sign(&self, message_hash: &Hash) -> Vec<u8> {
        self.key.sign(message_hash).expect("signature").bytes.to_vec()
    }
}

/// Node, clock and the validators created so far.
pub struct Harness {
    pub node: ValidationNode<ManualTimeSource>,
    pub clock: Arc<ManualTimeSource>,
    pub validators: Vec<TestValidator>,
}

impl Harness {
    pub fn new() -> Self {
        let mut config = NodeConfig::default();
        config.registry.governance = GOVERNANCE;
        config.registry.slash_beneficiary = BENEFICIARY;
        config.validation.governance = GOVERNANCE;
        config.validation.trusted_requesters = vec![REQUESTER];
        config.validate().expect("test configuration is valid");

        let clock = Arc::new(ManualTimeSource::new(GENESIS));
        let node = ValidationNode::with_clock(config, Arc::clone(&clock));
        Self {
            node,
            clock,
            validators: Vec::new(),
        }
    }

    /// Harness with `count` validators registered at `STAKE`.
    pub fn with_validators(count: u8) -> Self {
        let mut harness = Self::new();
        for i in 1..=count {
            harness.register(i).expect("registration");
        }
        harness
    }

    pub fn register(&mut self, index: u8) -> RegistryResult<()> {
        let validator = TestValidator::new(index);
        self.node
            .registry
            .register(validator.address, STAKE, &validator.public_key_bytes())?;
        self.validators.push(validator);
        Ok(())
    }

    pub fn validator(&self, index: u8) -> &TestValidator {
        self.validators
            .iter()
            .find(|v| v.address[19] == index)
            .expect("validator registered")
    }

    pub fn open(&self, payment_id: PaymentId, message_hash: Hash, amount: Amount) -> RequestId {
        self.node
            .requests
            .request_validation(REQUESTER, payment_id, message_hash, amount)
            .expect("request opened")
    }

    pub fn sign(&self, index: u8, request_id: RequestId) -> ValidationResult<()> {
        let message_hash = self
            .node
            .requests
            .get_validation_request(request_id)
            .map(|r| r.message_hash)
            .unwrap_or_default();
        let validator = self.validator(index);
        self.node.requests.sign_validation(
            validator.address,
            request_id,
            &validator.sign(&message_hash),
        )
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
