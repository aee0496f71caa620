//! # Core Identifiers
//!
//! Identity, amount and time primitives for the validation protocol.

use serde::{Deserialize, Serialize};

/// A 32-byte message hash (fingerprint of the fact being attested).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
///
/// Used both as validator identity and as caller identity for access checks.
pub type Address = [u8; 20];

/// Token amount in base units.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Validation request identifier. Allocated from 1, never reused.
pub type RequestId = u64;

/// Identifier of the payment a validation request guards.
pub type PaymentId = u64;

/// Base units per whole token (18 decimals).
pub const ONE_TOKEN: Amount = 1_000_000_000_000_000_000;

/// The all-zero address. Never a valid governance or requester identity.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Which verification path admitted a validator signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureKind {
    /// BLS12-381 G1 point checked by pairing against the registered key.
    Point,
    /// secp256k1 signature whose recovered address must equal the signer.
    Classical,
}

/// Render an address as `0x`-prefixed lowercase hex for logs.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed (or bare) 40-character hex string into an address.
pub fn parse_address(input: &str) -> Option<Address> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).ok()?;
    <Address>::try_from(bytes.as_slice()).ok()
}
