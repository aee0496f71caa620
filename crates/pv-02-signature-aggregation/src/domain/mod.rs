//! # Domain Layer
//!
//! Pure cryptographic logic with no I/O dependencies.

pub mod bls;
pub mod codec;
pub mod ecdsa;
pub mod entities;
pub mod errors;
