//! # Aggregation Proof Codec
//!
//! Fixed binary layout of an [`AggregationResult`], persisted on completed
//! requests and re-verified later without the raw shares:
//!
//! ```text
//! offset    size  field
//! 0         1     version (0x01)
//! 1         96    aggregated signature, G1 uncompressed
//! 97        1     signature infinity flag
//! 98        32    message hash
//! 130       4     signer count (u32, big-endian)
//! 134       213n  signers: address (20) | G2 uncompressed (192) | infinity flag (1)
//! 134+213n  1     validity flag
//! ```
//!
//! Decoding is structural only: coordinates are read without curve checks,
//! which verification performs.

use super::entities::AggregationResult;
use super::errors::AggregationError;
use pv_01_curve_arithmetic::{KeyPoint, SignaturePoint};
use shared_types::{Address, Hash};

/// Current proof layout version.
pub const PROOF_VERSION: u8 = 0x01;

const SIG_LEN: usize = SignaturePoint::UNCOMPRESSED_LEN;
const KEY_LEN: usize = KeyPoint::UNCOMPRESSED_LEN;
const HEADER_LEN: usize = 1 + SIG_LEN + 1 + 32 + 4;
const SIGNER_LEN: usize = 20 + KEY_LEN + 1;

impl AggregationResult {
    /// Serialize to the fixed proof layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + SIGNER_LEN * self.signers.len() + 1);

        out.push(PROOF_VERSION);
        out.extend_from_slice(&self.aggregated_signature.to_uncompressed());
        out.push(self.aggregated_signature.is_identity() as u8);
        out.extend_from_slice(&self.message_hash);
        out.extend_from_slice(&(self.signers.len() as u32).to_be_bytes());

        for (address, key) in &self.signers {
            out.extend_from_slice(address);
            out.extend_from_slice(&key.to_uncompressed());
            out.push(key.is_identity() as u8);
        }

        out.push(self.valid as u8);
        out
    }

    /// Parse the fixed proof layout.
    ///
    /// # Errors
    /// `MalformedProof` on a wrong version, wrong total length, flag bytes
    /// other than 0/1, or a flag that disagrees with the point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AggregationError> {
        let mut reader = Reader::new(bytes);

        if reader.byte()? != PROOF_VERSION {
            return Err(AggregationError::MalformedProof("unsupported version"));
        }

        let sig_bytes: [u8; SIG_LEN] = reader.array()?;
        let aggregated_signature = SignaturePoint::from_uncompressed_unchecked(&sig_bytes)
            .map_err(|_| AggregationError::MalformedProof("signature encoding"))?;
        check_flag(reader.byte()?, aggregated_signature.is_identity())?;

        let message_hash: Hash = reader.array()?;
        let count = u32::from_be_bytes(reader.array()?) as usize;

        let expected_len = count
            .checked_mul(SIGNER_LEN)
            .and_then(|n| n.checked_add(HEADER_LEN + 1))
            .ok_or(AggregationError::MalformedProof("signer count"))?;
        if bytes.len() != expected_len {
            return Err(AggregationError::MalformedProof("length"));
        }

        let mut signers = Vec::with_capacity(count);
        for _ in 0..count {
            let address: Address = reader.array()?;
            let key_bytes: [u8; KEY_LEN] = reader.array()?;
            let key = KeyPoint::from_uncompressed_unchecked(&key_bytes)
                .map_err(|_| AggregationError::MalformedProof("public key encoding"))?;
            check_flag(reader.byte()?, key.is_identity())?;
            signers.push((address, key));
        }

        let valid = match reader.byte()? {
            0 => false,
            1 => true,
            _ => return Err(AggregationError::MalformedProof("validity flag")),
        };

        Ok(Self {
            aggregated_signature,
            signers,
            message_hash,
            valid,
        })
    }
}

fn check_flag(flag: u8, is_identity: bool) -> Result<(), AggregationError> {
    match flag {
        0 | 1 if (flag == 1) == is_identity => Ok(()),
        0 | 1 => Err(AggregationError::MalformedProof("infinity flag disagrees with point")),
        _ => Err(AggregationError::MalformedProof("infinity flag")),
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], AggregationError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(AggregationError::MalformedProof("truncated"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, AggregationError> {
        Ok(self.take(1)?[0])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], AggregationError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
