//! Registry endpoints

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Base URLs and timeout for the registry clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Zefix REST API root
    pub zefix_base_url: String,

    /// FINMA website root
    pub finma_base_url: String,

    /// SHAB API root
    pub shab_base_url: String,

    /// HTTP request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            zefix_base_url: "https://www.zefix.admin.ch/ZefixREST/api/v1".to_string(),
            finma_base_url: "https://www.finma.ch".to_string(),
            shab_base_url: "https://www.shab.ch/api/v1".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl RegistryConfig {
    /// Every registry pointed at one root (used against mock servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            zefix_base_url: base_url.clone(),
            finma_base_url: base_url.clone(),
            shab_base_url: base_url,
            ..Self::default()
        }
    }

    /// Check URLs and timeout
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("zefix_base_url", &self.zefix_base_url),
            ("finma_base_url", &self.finma_base_url),
            ("shab_base_url", &self.shab_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Config(format!("{} must be an http(s) URL, got {:?}", name, url)));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }

        Ok(())
    }
}
