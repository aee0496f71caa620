//! # Subsystem Container
//!
//! Constructs the registry once and injects it into the request machine
//! through the directory adapter.

use crate::adapters::RegistryDirectory;
use crate::container::config::NodeConfig;
use pv_02_signature_aggregation::SignatureAggregationService;
use pv_03_validator_registry::{InMemoryTreasury, ValidatorRegistryService};
use pv_04_validation_requests::ValidationRequestService;
use shared_bus::InMemoryEventBus;
use shared_types::{SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::info;

pub type Registry<C> = ValidatorRegistryService<InMemoryTreasury, InMemoryEventBus, C>;

pub type Requests<C> = ValidationRequestService<
    RegistryDirectory<Registry<C>>,
    SignatureAggregationService,
    InMemoryEventBus,
    C,
>;

/// All subsystems of a running node.
pub struct ValidationNode<C: TimeSource = SystemTimeSource> {
    pub config: NodeConfig,
    pub event_bus: Arc<InMemoryEventBus>,
    pub treasury: Arc<InMemoryTreasury>,
    pub aggregator: Arc<SignatureAggregationService>,
    pub registry: Arc<Registry<C>>,
    pub requests: Arc<Requests<C>>,
}

impl ValidationNode<SystemTimeSource> {
    /// Node on the wall clock.
    pub fn new(config: NodeConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }
}

impl<C: TimeSource> ValidationNode<C> {
    pub fn with_clock(config: NodeConfig, clock: Arc<C>) -> Self {
        let event_bus = Arc::new(InMemoryEventBus::new());
        let treasury = Arc::new(InMemoryTreasury::new());
        let aggregator = Arc::new(SignatureAggregationService::new());

        let registry = Arc::new(ValidatorRegistryService::new(
            config.registry.clone(),
            Arc::clone(&treasury),
            Arc::clone(&event_bus),
            Arc::clone(&clock),
        ));
        info!("[pv-03] validator registry initialized");

        let directory = Arc::new(RegistryDirectory::new(Arc::clone(&registry)));
        let requests = Arc::new(ValidationRequestService::new(
            config.validation.clone(),
            directory,
            Arc::clone(&aggregator),
            Arc::clone(&event_bus),
            clock,
        ));
        info!("[pv-04] validation request machine initialized");

        Self {
            config,
            event_bus,
            treasury,
            aggregator,
            registry,
            requests,
        }
    }
}
