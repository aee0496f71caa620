//! # Event Log Handler
//!
//! Writes every protocol event to the log as a JSON payload, so the
//! lifecycle of registrations and requests can be followed from the node
//! output alone.

use shared_bus::{ProtocolEvent, Subscription};
use tokio::sync::watch;
use tracing::{info, warn};

/// Logs each event received on its subscription.
pub struct EventLogHandler {
    subscription: Subscription,
}

impl EventLogHandler {
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run until the bus closes or shutdown is signalled. Returns the number
    /// of events logged.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut logged = 0u64;
        loop {
            tokio::select! {
                event = self.subscription.recv() => match event {
                    Some(event) => {
                        log_event(&event);
                        logged += 1;
                    }
                    None => {
                        info!("event bus closed");
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    info!(logged, "event log shutting down");
                    break;
                }
            }
        }
        logged
    }
}

fn log_event(event: &ProtocolEvent) {
    match serde_json::to_string(event) {
        Ok(payload) => info!(
            topic = ?event.topic(),
            event = event.name(),
            %payload,
            "protocol event"
        ),
        Err(e) => warn!(event = event.name(), error = %e, "unserializable event"),
    }
}
