//! Registry adapters

pub mod treasury;
