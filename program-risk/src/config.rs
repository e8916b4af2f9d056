//! Configuration file for the assessment engine and service.
//!
//! ```toml
//! [weights]
//! budget = 0.30
//! schedule = 0.25
//! funding = 0.20
//! indicators = 0.15
//! compliance = 0.10
//!
//! [service]
//! fetch_timeout_ms = 10000
//! max_batch_concurrency = 8
//! ```
//!
//! Both sections are optional and default to the canonical values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{read_file, LoaderError};
use crate::risk::{CategoryWeights, RiskCategory};
use crate::service::ServiceConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] LoaderError),

    #[error("Invalid weight for {category}: {value}")]
    InvalidWeight { category: RiskCategory, value: f64 },

    #[error("Weights must have a positive sum")]
    ZeroWeights,

    #[error("Invalid service setting: {0}")]
    InvalidService(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub weights: CategoryWeights,
    #[serde(default)]
    pub service: ServiceConfig,
}

impl RiskConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(LoaderError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in RiskCategory::ALL {
            let value = self.weights.weight(category);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { category, value });
            }
        }
        if self.weights.total() <= 0.0 {
            return Err(ConfigError::ZeroWeights);
        }
        if self.service.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidService(
                "fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.service.max_batch_concurrency == 0 {
            return Err(ConfigError::InvalidService(
                "max_batch_concurrency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RiskConfig::from_toml("").unwrap();
        assert_eq!(config, RiskConfig::default());
        assert_eq!(config.weights.budget, 0.30);
        assert_eq!(config.service.fetch_timeout_ms, 10_000);
    }

    #[test]
    fn test_partial_override() {
        let config = RiskConfig::from_toml(
            r#"
            [weights]
            budget = 0.5
            schedule = 0.2
            funding = 0.1
            indicators = 0.1
            compliance = 0.1

            [service]
            fetch_timeout_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.weights.budget, 0.5);
        assert_eq!(config.service.fetch_timeout_ms, 2500);
        assert_eq!(config.service.max_batch_concurrency, 8);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = RiskConfig::default();
        config.weights.funding = -0.2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                category: RiskCategory::Funding,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut config = RiskConfig::default();
        config.weights = CategoryWeights {
            budget: 0.0,
            schedule: 0.0,
            funding: 0.0,
            indicators: 0.0,
            compliance: 0.0,
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWeights)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = RiskConfig::default();
        config.service.fetch_timeout_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidService(_))
        ));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            RiskConfig::from_toml("[weights]\nbudget = \"high\""),
            Err(ConfigError::Load(LoaderError::Toml(_)))
        ));
    }

    #[test]
    fn test_load_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RiskConfig::default().to_toml().as_bytes())
            .unwrap();
        let loaded = RiskConfig::load(file.path()).unwrap();
        assert_eq!(loaded, RiskConfig::default());
    }

    #[test]
    fn test_shipped_default_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
        assert_eq!(RiskConfig::load(&path).unwrap(), RiskConfig::default());
    }
}
