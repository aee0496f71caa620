//! # Shared Types Crate
//!
//! Primitive identifiers used across the validation subsystems, and the
//! `TimeSource` port every deadline computation goes through.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identity, amount and time types are defined
//!   once here so the registry and the request machine cannot drift apart.
//! - **Opaque identifiers**: validators are keyed by `Address`, requests by a
//!   monotonically increasing `RequestId`. Records refer to each other only
//!   through these keys.

pub mod entities;
pub mod time;

pub use entities::*;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
