//! # Shared Bus - Protocol Event Bus
//!
//! Every state transition in the registry and the request machine is
//! published here so operators and the payment layer can follow the
//! protocol without polling.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Registry /  │    publish()       │  Log task /  │
//! │  Requests    │ ──────┐            │  Payment     │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publishing never blocks and never fails the caller: an event with no
//! subscribers is simply dropped.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, ProtocolEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}
