//! Simulation configuration.
//!
//! Type-safe structures mirroring the YAML file, with defaults and
//! validation of every section.

use serde::{Deserialize, Serialize};

use crate::network::MAX_SERVICES;

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub rollout: RolloutConfig,
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Shape of the simulated network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Total number of machines (must be greater than 2)
    #[serde(default = "default_machines")]
    pub machines: usize,
    /// Number of service types per machine
    #[serde(default = "default_services")]
    pub services: usize,
    /// Seed for network generation
    #[serde(default = "default_network_seed")]
    pub seed: u64,
}

/// Random agent rollout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloutConfig {
    #[serde(default = "default_episodes")]
    pub episodes: usize,
    /// Step limit per episode
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Base seed for the agent, episode `i` uses `seed + i`
    #[serde(default)]
    pub seed: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_machines() -> usize {
    5
}

fn default_services() -> usize {
    3
}

fn default_network_seed() -> u64 {
    1
}

fn default_episodes() -> usize {
    10
}

fn default_max_steps() -> usize {
    1000
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            machines: default_machines(),
            services: default_services(),
            seed: default_network_seed(),
        }
    }
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: default_episodes(),
            max_steps: default_max_steps(),
            seed: 0,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid environment configuration: {0}")]
    InvalidEnvironment(String),
    #[error("Invalid rollout configuration: {0}")]
    InvalidRollout(String),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.log_level.trim().is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "log_level cannot be empty".to_string(),
            ));
        }

        let env = &self.environment;
        if env.machines <= 2 {
            return Err(ValidationError::InvalidEnvironment(format!(
                "machines must be greater than 2, got {}",
                env.machines
            )));
        }
        if env.services == 0 || env.services > MAX_SERVICES {
            return Err(ValidationError::InvalidEnvironment(format!(
                "services must be between 1 and {}, got {}",
                MAX_SERVICES, env.services
            )));
        }

        if self.rollout.episodes == 0 {
            return Err(ValidationError::InvalidRollout(
                "episodes must be at least 1".to_string(),
            ));
        }
        if self.rollout.max_steps == 0 {
            return Err(ValidationError::InvalidRollout(
                "max_steps must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment.machines, 5);
        assert_eq!(config.environment.services, 3);
        assert_eq!(config.environment.seed, 1);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
environment:
  machines: 12
rollout:
  episodes: 3
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.environment.machines, 12);
        assert_eq!(config.environment.services, 3);
        assert_eq!(config.rollout.episodes, 3);
        assert_eq!(config.rollout.max_steps, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.environment.machines = 2;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidEnvironment(_))));

        let mut config = Config::default();
        config.environment.services = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidEnvironment(_))));

        let mut config = Config::default();
        config.environment.services = MAX_SERVICES + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rollout.max_steps = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRollout(_))));

        let mut config = Config::default();
        config.general.log_level = " ".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidGeneral(_))));
    }
}
