//! # Validator Registry & Stake Ledger (PV-03)
//!
//! Tracks which validators may co-sign payment validation requests, how much
//! stake each has at risk, and applies slashing and exit.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): validator records and the active set
//! - **Ports Layer** (`ports/`): `ValidatorRegistryApi` (inbound) and
//!   `StakeTreasury` (outbound, pays out refunds and slashed stake)
//! - **Service Layer** (`service.rs`): the registry itself
//! - **Adapters** (`adapters/`): an in-memory treasury ledger
//!
//! ## Lifecycle
//!
//! ```text
//! register ──→ Active ──slash──→ Slashed ──exit──→ Exiting
//!                 │                                   ↑
//!                 └───────────────exit────────────────┘
//! ```
//!
//! Exiting is terminal. A record is never removed, so an exited identity
//! cannot register again.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::treasury::InMemoryTreasury;
pub use domain::{ActiveSet, ActiveSetSnapshot, Validator, ValidatorStatus};
pub use error::{RegistryError, RegistryResult};
pub use ports::inbound::{SlashOutcome, SlashPayout, ValidatorRegistryApi};
pub use ports::outbound::{StakeTreasury, TreasuryError};
pub use service::{RegistryConfig, ValidatorRegistryService};
