//! Shared handles for one KYC session

use crate::{call_log::CallLog, config::Config, metrics::Metrics, Result};
use kyc_ledger::Ledger;
use registry_clients::{FinmaClient, ShabClient, ZefixClient};
use sanctions_screening::SanctionsMatcher;
use std::sync::Arc;
use tracing::info;

/// Everything the tools, review and seeding operate on.
///
/// Built once by the entry point and cloned into consumers; clones share
/// the same ledger, matcher and call history.
#[derive(Clone)]
pub struct KycContext {
    config: Arc<Config>,
    ledger: Arc<Ledger>,
    matcher: Arc<SanctionsMatcher>,
    zefix: Arc<ZefixClient>,
    finma: Arc<FinmaClient>,
    shab: Arc<ShabClient>,
    calls: Arc<CallLog>,
    metrics: Arc<Metrics>,
}

impl KycContext {
    /// Build every component from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let matcher = SanctionsMatcher::from_config(&config.sanctions)?;
        Self::with_matcher(config, matcher)
    }

    /// Build around an existing matcher
    pub fn with_matcher(config: Config, matcher: SanctionsMatcher) -> Result<Self> {
        config.validate()?;

        let ctx = Self {
            ledger: Arc::new(Ledger::with_rules(config.ledger.clone())),
            matcher: Arc::new(matcher),
            zefix: Arc::new(ZefixClient::from_config(&config.registry)?),
            finma: Arc::new(FinmaClient::from_config(&config.registry)?),
            shab: Arc::new(ShabClient::from_config(&config.registry)?),
            calls: Arc::new(CallLog::new(config.call_log.capacity)),
            metrics: Arc::new(Metrics::new()?),
            config: Arc::new(config),
        };

        info!(
            "KYC context ready (threshold {}, call history {})",
            ctx.matcher.threshold(),
            ctx.calls.capacity()
        );
        Ok(ctx)
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Sanctions matcher
    pub fn matcher(&self) -> &SanctionsMatcher {
        &self.matcher
    }

    /// Zefix client
    pub fn zefix(&self) -> &ZefixClient {
        &self.zefix
    }

    /// FINMA client
    pub fn finma(&self) -> &FinmaClient {
        &self.finma
    }

    /// SHAB client
    pub fn shab(&self) -> &ShabClient {
        &self.shab
    }

    /// Tool call history
    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    /// Metrics
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
