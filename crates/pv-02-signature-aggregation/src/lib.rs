//! # Signature Aggregation Subsystem (PV-02)
//!
//! Verifies validator co-signatures on payment validation requests and folds
//! them into a single aggregated proof.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): verification, aggregation and the proof
//!   codec, no I/O
//! - **Ports Layer** (`ports/`): the `SignatureAggregationApi` driving port
//! - **Service Layer** (`service.rs`): wires the domain to the port
//!
//! ## Signature Schemes
//!
//! | Scheme | Curve | Signature | Public key |
//! |--------|-------|-----------|------------|
//! | Point (BLS, min_sig) | BLS12-381 | G1, 48 bytes | G2, 96 bytes |
//! | Classical (ECDSA) | secp256k1 | `r \|\| s \|\| v`, 65 bytes | recovered address |
//!
//! ## Security Notes
//!
//! - Every point is on-curve and subgroup checked before it is used
//! - Identity signatures and identity keys are rejected
//! - ECDSA signatures with high S values are rejected (EIP-2)

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::bls::{
    aggregate_public_keys, aggregate_signatures, batch_verify, hash_message, verify_aggregated,
    verify_single, SecretKey,
};
pub use domain::codec::PROOF_VERSION;
pub use domain::ecdsa::{address_from_pubkey, keccak256, recover_address, verify_ecdsa_signer};
pub use domain::entities::{
    AggregationResult, BlsPublicKey, BlsSignature, EcdsaSignature, SignatureShare,
    ECDSA_SIGNATURE_LEN,
};
pub use domain::errors::{AggregationError, SignatureError, SignatureResult};
pub use ports::inbound::SignatureAggregationApi;
pub use service::SignatureAggregationService;
