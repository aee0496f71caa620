//! Registry ports

pub mod inbound;
pub mod outbound;
