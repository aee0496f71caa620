//! # Validation Request State Machine (PV-04)
//!
//! A trusted payment component opens a validation request for a payment's
//! message hash; active validators co-sign it until the quorum is reached,
//! at which point the signatures are aggregated into a proof that the
//! payment layer re-verifies before releasing funds.
//!
//! ## State Machine
//!
//! ```text
//!            first signature          quorum reached
//! Pending ──────────────────→ InProgress ──────────────→ Completed
//!    │                            │
//!    ├── deadline + expire ──→ Expired ←── deadline + expire
//!    │                            │
//!    └──── governance abort ──→ Failed ←── governance abort
//! ```
//!
//! ## Quorum
//!
//! `required = ceil(active_count × p / 100)` with `p = 75` for high-value
//! payments and `67` otherwise, fixed from the active count when the
//! request is created.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::quorum::{
    required_signatures, HIGH_VALUE_QUORUM_PERCENT, MIN_ACTIVE_VALIDATORS, STANDARD_QUORUM_PERCENT,
};
pub use domain::request::{RequestStatus, SubmittedSignature, ValidationRequest, ValidationRequestView};
pub use domain::scheme::{SignatureScheme, UnknownPolicy, VerificationPolicy};
pub use error::{ValidationError, ValidationResult};
pub use ports::inbound::ValidationApi;
pub use ports::outbound::ValidatorDirectory;
pub use service::{ValidationConfig, ValidationRequestService, DEFAULT_TIMEOUT_SECS};
