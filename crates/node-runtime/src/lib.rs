//! # Node Runtime Library
//!
//! Exposes the composition root of the validation node for testing. The
//! binary entry point is `main.rs`.
//!
//! - `container/` - configuration and subsystem wiring
//! - `adapters/` - port implementations between subsystems
//! - `handlers/` - event bus consumers

pub mod adapters;
pub mod container;
pub mod handlers;

pub use adapters::RegistryDirectory;
pub use container::{ConfigError, NodeConfig, ValidationNode};
pub use handlers::EventLogHandler;
