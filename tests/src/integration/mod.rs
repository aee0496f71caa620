//! # Integration Tests
//!
//! Runs the subsystems through the same wiring the node binary uses.

pub mod harness;

mod event_flow;
mod scenarios;
