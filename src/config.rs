// src/config.rs

use crate::types::{Config, ControlConfig, LateralConfig, LateralMode, LoggingConfig};
use anyhow::Result;
use std::fs;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.control.rate_hz <= 0.0 {
            anyhow::bail!("control.rate_hz must be positive");
        }
        if self.lateral.min_mph < 0.0 || self.lateral.auto_min_mph < 0.0 {
            anyhow::bail!("speed thresholds must be non-negative");
        }
        if self.lateral.auto_delay < 0.0 {
            anyhow::bail!("lateral.auto_delay must be non-negative");
        }
        Ok(())
    }

    /// Cycle duration in seconds.
    pub fn cycle_dt(&self) -> f64 {
        1.0 / self.control.rate_hz
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lateral: LateralConfig {
                mode: LateralMode::Assisted,
                min_mph: 30.0,
                auto_min_mph: 40.0,
                auto_delay: 2.0,
            },
            control: ControlConfig {
                rate_hz: 20.0,
                real_time: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.cycle_dt() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
lateral:
  mode: auto
  min_mph: 30.0
  auto_min_mph: 45.0
  auto_delay: 3.0
control:
  rate_hz: 20.0
  real_time: false
logging:
  level: debug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.lateral.mode, LateralMode::Auto);
        assert_eq!(config.lateral.auto_min_mph, 45.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_rate() {
        let mut config = Config::default();
        config.control.rate_hz = 0.0;
        assert!(config.validate().is_err());
    }
}
