//! Request machine ports

pub mod inbound;
pub mod outbound;
