//! # Event Flow Tests
//!
//! Registry and request events arrive on the one bus the node shares, in
//! the order the operations happened.

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use node_runtime::EventLogHandler;
    use pv_03_validator_registry::ValidatorRegistryApi;
    use pv_04_validation_requests::ValidationApi;
    use shared_bus::{EventFilter, EventTopic, ProtocolEvent};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_full_lifecycle_event_order() {
        let mut h = Harness::new();
        let mut sub = h.node.event_bus.subscribe(EventFilter::all());

        for i in 1..=3 {
            h.register(i).unwrap();
        }
        let id = h.open(7, [0x42; 32], 100);
        for i in 1..=3 {
            h.sign(i, id).unwrap();
        }

        let mut names = Vec::new();
        while let Ok(Some(event)) = timeout(Duration::from_millis(100), sub.recv()).await {
            names.push(event.name());
        }
        assert_eq!(
            names,
            vec![
                "validator_registered",
                "validator_registered",
                "validator_registered",
                "validation_requested",
                "signature_accepted",
                "signature_accepted",
                "signature_accepted",
                "validation_completed",
            ]
        );
    }

    #[tokio::test]
    async fn test_completion_reports_valid_proof() {
        let h = Harness::with_validators(3);
        let mut sub = h
            .node
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Validation]));

        let id = h.open(9, [0x42; 32], 100);
        for i in 1..=3 {
            h.sign(i, id).unwrap();
        }

        let completed = sub
            .drain()
            .into_iter()
            .find(|e| matches!(e, ProtocolEvent::ValidationCompleted { .. }));
        assert_eq!(
            completed,
            Some(ProtocolEvent::ValidationCompleted {
                request_id: id,
                payment_id: 9,
                signers: 3,
                proof_valid: true,
            })
        );
    }

    #[tokio::test]
    async fn test_slash_and_governance_topics_are_separate() {
        let h = Harness::with_validators(3);
        let mut registry_events = h
            .node
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Registry]));
        let mut governance_events = h
            .node
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Governance]));

        h.node
            .registry
            .slash(GOVERNANCE, h.validator(1).address, "offline")
            .unwrap();
        h.node.requests.pause(GOVERNANCE).unwrap();

        let registry_names: Vec<_> = registry_events.drain().iter().map(|e| e.name()).collect();
        let governance_names: Vec<_> = governance_events.drain().iter().map(|e| e.name()).collect();
        assert_eq!(registry_names, vec!["validator_slashed"]);
        assert_eq!(governance_names, vec!["paused"]);
    }

    #[tokio::test]
    async fn test_event_log_consumes_node_events() {
        let h = Harness::with_validators(3);
        let handler = EventLogHandler::new(h.node.event_bus.subscribe(EventFilter::all()));
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let task = tokio::spawn(handler.run(shutdown_rx));

        let id = h.open(1, [0x42; 32], 100);
        h.sign(1, id).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(true).unwrap();

        assert_eq!(task.await.unwrap(), 2);
    }
}
