//! # Node Configuration
//!
//! Registry and validation settings, built from defaults and then overridden
//! from `PV_*` environment variables.
//!
//! ## Security Requirements
//!
//! - The governance address MUST NOT be the zero address
//! - At least one trusted requester MUST be configured

use pv_03_validator_registry::RegistryConfig;
use pv_04_validation_requests::{ValidationConfig, VerificationPolicy};
use shared_types::{format_address, parse_address, Address, Amount, ZERO_ADDRESS};
use thiserror::Error;
use tracing::info;

pub const ENV_GOVERNANCE: &str = "PV_GOVERNANCE";
pub const ENV_SLASH_BENEFICIARY: &str = "PV_SLASH_BENEFICIARY";
pub const ENV_TRUSTED_REQUESTERS: &str = "PV_TRUSTED_REQUESTERS";
pub const ENV_MIN_STAKE: &str = "PV_MIN_STAKE";
pub const ENV_HIGH_VALUE_THRESHOLD: &str = "PV_HIGH_VALUE_THRESHOLD";
pub const ENV_VERIFICATION_POLICY: &str = "PV_VERIFICATION_POLICY";
pub const ENV_TIMEOUT_SECS: &str = "PV_TIMEOUT_SECS";

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Validator registry configuration.
    pub registry: RegistryConfig,
    /// Validation request configuration.
    pub validation: ValidationConfig,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("governance address is the zero address; set {ENV_GOVERNANCE}")]
    MissingGovernance,

    #[error("no trusted requesters configured; set {ENV_TRUSTED_REQUESTERS}")]
    NoTrustedRequesters,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("quorum percentage {0} outside 1..=100")]
    InvalidQuorumPercent(u8),

    #[error("request timeout must be positive")]
    ZeroTimeout,
}

impl NodeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unset keys keep their current value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_GOVERNANCE) {
            let governance = parse_env_address(ENV_GOVERNANCE, &value)?;
            self.registry.governance = governance;
            self.validation.governance = governance;
            // Slashed stake goes to governance unless configured otherwise.
            if self.registry.slash_beneficiary == ZERO_ADDRESS {
                self.registry.slash_beneficiary = governance;
            }
        }
        if let Some(value) = lookup(ENV_SLASH_BENEFICIARY) {
            self.registry.slash_beneficiary = parse_env_address(ENV_SLASH_BENEFICIARY, &value)?;
        }
        if let Some(value) = lookup(ENV_TRUSTED_REQUESTERS) {
            self.validation.trusted_requesters = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_env_address(ENV_TRUSTED_REQUESTERS, s))
                .collect::<Result<_, _>>()?;
        }
        if let Some(value) = lookup(ENV_MIN_STAKE) {
            self.registry.min_stake = parse_env::<Amount>(ENV_MIN_STAKE, &value)?;
        }
        if let Some(value) = lookup(ENV_HIGH_VALUE_THRESHOLD) {
            self.validation.high_value_threshold =
                parse_env::<Amount>(ENV_HIGH_VALUE_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_VERIFICATION_POLICY) {
            self.validation.verification_policy =
                parse_env::<VerificationPolicy>(ENV_VERIFICATION_POLICY, &value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.validation.timeout_secs = parse_env::<u64>(ENV_TIMEOUT_SECS, &value)?;
        }
        Ok(self)
    }

    /// Reject configurations a running node must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.governance == ZERO_ADDRESS || self.validation.governance == ZERO_ADDRESS
        {
            return Err(ConfigError::MissingGovernance);
        }
        if self.validation.trusted_requesters.is_empty() {
            return Err(ConfigError::NoTrustedRequesters);
        }
        for percent in [
            self.validation.standard_threshold_percent,
            self.validation.high_value_threshold_percent,
        ] {
            if percent == 0 || percent > 100 {
                return Err(ConfigError::InvalidQuorumPercent(percent));
            }
        }
        if self.validation.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Log the effective settings.
    pub fn log_summary(&self) {
        info!(
            governance = %format_address(&self.validation.governance),
            trusted_requesters = self.validation.trusted_requesters.len(),
            min_stake = self.registry.min_stake,
            slash_percent = self.registry.slash_percent,
            high_value_threshold = self.validation.high_value_threshold,
            policy = %self.validation.verification_policy,
            timeout_secs = self.validation.timeout_secs,
            "configuration loaded"
        );
    }
}

fn parse_env_address(key: &'static str, value: &str) -> Result<Address, ConfigError> {
    parse_address(value).ok_or_else(|| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
