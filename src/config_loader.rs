use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);
    read_config(config_path)
}

/// Parse and validate a YAML configuration file without logging.
///
/// The binary reads its configuration before a logger exists, since the
/// log level itself comes from the file.
pub fn read_config(config_path: &Path) -> Result<Config> {
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub machines: Option<usize>,
    pub services: Option<usize>,
    pub seed: Option<u64>,
    pub episodes: Option<usize>,
    pub max_steps: Option<usize>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(machines) = overrides.machines {
        info!("Overriding machine count: {}", machines);
        config.environment.machines = machines;
    }
    if let Some(services) = overrides.services {
        info!("Overriding service count: {}", services);
        config.environment.services = services;
    }
    if let Some(seed) = overrides.seed {
        info!("Overriding network seed: {}", seed);
        config.environment.seed = seed;
    }
    if let Some(episodes) = overrides.episodes {
        config.rollout.episodes = episodes;
    }
    if let Some(max_steps) = overrides.max_steps {
        config.rollout.max_steps = max_steps;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
general:
  log_level: debug
environment:
  machines: 8
  services: 2
  seed: 7
rollout:
  episodes: 4
  max_steps: 50
  seed: 3
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.environment.machines, 8);
        assert_eq!(config.environment.services, 2);
        assert_eq!(config.environment.seed, 7);
        assert_eq!(config.rollout.episodes, 4);
        assert_eq!(config.rollout.max_steps, 50);
        assert_eq!(config.rollout.seed, 3);
        assert_eq!(read_config(temp_file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "environment:\n  machines: 1\n").unwrap();
        assert!(load_config(temp_file.path()).is_err());

        assert!(load_config(Path::new("/nonexistent/cyberattack.yaml")).is_err());
        assert!(read_config(Path::new("/nonexistent/cyberattack.yaml")).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            machines: Some(20),
            seed: Some(99),
            max_steps: Some(10),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.environment.machines, 20);
        assert_eq!(config.environment.services, 3);
        assert_eq!(config.environment.seed, 99);
        assert_eq!(config.rollout.max_steps, 10);

        let bad = CliOverrides {
            services: Some(0),
            ..Default::default()
        };
        assert!(apply_overrides(&mut config, &bad).is_err());
    }
}
