//! # Payment Validation Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # registry + request machine + aggregator, wired
//! │   ├── harness.rs     # node on a manual clock, validator keys
//! │   ├── scenarios.rs   # end-to-end lifecycle scenarios
//! │   └── event_flow.rs  # events observed on the shared bus
//! └── benches/           # aggregation and verification throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pv-tests
//! cargo bench -p pv-tests
//! ```

pub mod integration;
