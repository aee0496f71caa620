//! # Node Container
//!
//! Holds the subsystem instances and wires them together:
//!
//! ```text
//! InMemoryTreasury ──→ ValidatorRegistryService ──→ RegistryDirectory
//!                                                        │
//!           SignatureAggregationService ──→ ValidationRequestService
//! ```
//!
//! Both services publish to one shared event bus.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig};
pub use subsystems::{Registry, Requests, ValidationNode};
