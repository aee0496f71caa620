//! Request domain: records, status transitions, quorum math and signature
//! schemes.

pub mod quorum;
pub mod request;
pub mod scheme;
