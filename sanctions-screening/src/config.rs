//! Configuration for sanctions screening

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// SECO sanctions search export endpoint
pub const SECO_EXPORT_URL: &str = "https://www.sesam.search.admin.ch/sesam-search-web/pages/search.xhtml";

/// Sanctions screening configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanctionsConfig {
    /// Snapshot export URL. The body is an xlsx workbook, or CSV with a
    /// header row.
    pub snapshot_url: String,

    /// Query parameters sent with the export request
    pub snapshot_query: BTreeMap<String, String>,

    /// Directory holding the cached snapshot
    pub cache_dir: PathBuf,

    /// Cached snapshot file name
    pub cache_file: String,

    /// Snapshot maximum age before refetch (hours)
    pub max_age_hours: i64,

    /// Match threshold (0-100)
    pub threshold: u8,

    /// Zero-based column holding the listed name
    pub name_column: usize,

    /// HTTP request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Wait before retrying after a failed refresh fell back to a stale
    /// list (seconds)
    pub retry_backoff_secs: u64,
}

impl Default for SanctionsConfig {
    fn default() -> Self {
        let snapshot_query = [
            ("Applikations-Version", "1.4.0-92"),
            ("lang", "en"),
            ("nameNamensteile", ""),
            ("volltextsuche", ""),
            ("sanktionsprogrammId", ""),
            ("adressatTyp", ""),
            ("action", "generateExcelAction"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            snapshot_url: SECO_EXPORT_URL.to_string(),
            snapshot_query,
            cache_dir: default_cache_dir(),
            cache_file: "sanctions.xlsx".to_string(),
            max_age_hours: 24,
            threshold: 85,
            name_column: 4,
            request_timeout_secs: 60,
            retry_backoff_secs: 300,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("seco")
}

impl SanctionsConfig {
    /// Full path of the cached snapshot
    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(&self.cache_file)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: SanctionsConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = SanctionsConfig::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `SECO_*` environment overrides
    pub fn apply_env(&mut self) -> crate::Result<()> {
        if let Ok(url) = std::env::var("SECO_SNAPSHOT_URL") {
            self.snapshot_url = url;
        }

        if let Ok(dir) = std::env::var("SECO_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }

        if let Ok(threshold) = std::env::var("SECO_THRESHOLD") {
            self.threshold = threshold.parse().map_err(|_| {
                crate::Error::Config(format!("SECO_THRESHOLD must be 0-100, got {:?}", threshold))
            })?;
        }

        self.validate()
    }

    /// Check value ranges
    pub fn validate(&self) -> crate::Result<()> {
        if self.threshold > 100 {
            return Err(crate::Error::Config(format!(
                "threshold must be 0-100, got {}",
                self.threshold
            )));
        }
        if self.max_age_hours <= 0 {
            return Err(crate::Error::Config(
                "max_age_hours must be positive".to_string(),
            ));
        }
        let max_age_secs = self.max_age_hours.saturating_mul(3600);
        if i64::try_from(self.retry_backoff_secs).map_or(true, |secs| secs > max_age_secs) {
            return Err(crate::Error::Config(format!(
                "retry_backoff_secs must not exceed max_age_hours, got {}",
                self.retry_backoff_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SanctionsConfig::default();
        assert_eq!(config.threshold, 85);
        assert_eq!(config.max_age_hours, 24);
        assert_eq!(config.name_column, 4);
        assert_eq!(config.retry_backoff_secs, 300);
        assert_eq!(
            config.snapshot_query.get("action").map(String::as_str),
            Some("generateExcelAction")
        );
        assert!(config.cache_path().ends_with("seco/sanctions.xlsx"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SanctionsConfig = toml::from_str("threshold = 90\ncache_file = \"list.csv\"").unwrap();
        assert_eq!(config.threshold, 90);
        assert_eq!(config.cache_file, "list.csv");
        assert_eq!(config.max_age_hours, 24);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = SanctionsConfig {
            threshold: 101,
            ..SanctionsConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SanctionsConfig {
            max_age_hours: 0,
            ..SanctionsConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SanctionsConfig {
            max_age_hours: 1,
            retry_backoff_secs: 3601,
            ..SanctionsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
