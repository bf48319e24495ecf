//! Fixtures for unit tests

use crate::{config::Config, context::KycContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use sanctions_screening::{MaxAgePolicy, SanctionsMatcher, SnapshotCache, SnapshotSource};
use std::sync::Arc;
use tempfile::TempDir;

/// In-memory snapshot, or a source that always fails
pub(crate) struct StaticSource {
    body: Option<Bytes>,
}

impl StaticSource {
    pub(crate) fn csv(names: &[&str]) -> Self {
        let mut body = String::from("SSID,Program,Sanctions,Type,Name\n");
        for (i, name) in names.iter().enumerate() {
            body.push_str(&format!("{},Test,Asset freeze,person,\"{}\"\n", i + 1, name));
        }
        Self {
            body: Some(Bytes::from(body)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch(&self) -> sanctions_screening::Result<Bytes> {
        self.body
            .clone()
            .ok_or_else(|| sanctions_screening::Error::Fetch("export unavailable".to_string()))
    }
}

pub(crate) fn context_with_source(config: Config, source: StaticSource) -> Result<KycContext> {
    let matcher = SanctionsMatcher::new(
        Arc::new(source),
        SnapshotCache::new(config.sanctions.cache_path()),
        Arc::new(MaxAgePolicy::default()),
    );
    KycContext::with_matcher(config, matcher)
}

/// Context screening against `names`; the cache lives as long as the `TempDir`
pub(crate) fn context_with_names(names: &[&str]) -> Result<(KycContext, TempDir)> {
    let dir = tempfile::tempdir().map_err(|e| crate::Error::Config(e.to_string()))?;
    let mut config = Config::default();
    config.sanctions.cache_dir = dir.path().to_path_buf();
    let ctx = context_with_source(config, StaticSource::csv(names))?;
    Ok((ctx, dir))
}
