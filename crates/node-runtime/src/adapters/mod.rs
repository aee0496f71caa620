//! # Adapters
//!
//! Port implementations connecting the subsystems.

pub mod directory;

pub use directory::RegistryDirectory;
