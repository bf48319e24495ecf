//! Configuration for the KYC orchestrator

use crate::{Error, Result};
use kyc_ledger::ValidationRules;
use registry_clients::RegistryConfig;
use sanctions_screening::SanctionsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a TOML config file
pub const CONFIG_ENV: &str = "KYC_CONFIG";

/// Orchestrator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sanctions screening
    pub sanctions: SanctionsConfig,

    /// Registry endpoints
    pub registry: RegistryConfig,

    /// Ledger creation checks
    pub ledger: ValidationRules,

    /// Tool call history
    pub call_log: CallLogConfig,
}

/// Tool call history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallLogConfig {
    /// Calls kept before the oldest is dropped
    pub capacity: usize,

    /// Calls shown by default
    pub default_limit: usize,
}

impl Default for CallLogConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            default_limit: 10,
        }
    }
}

impl Config {
    /// Load from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.sanctions.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// File named by `KYC_CONFIG` if set, else defaults; environment
    /// overrides apply either way
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                let mut config = Config::default();
                config.sanctions.apply_env()?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.sanctions.validate()?;
        self.registry.validate()?;
        if self.call_log.capacity == 0 {
            return Err(Error::Config("call_log.capacity must be positive".to_string()));
        }
        Ok(())
    }
}
