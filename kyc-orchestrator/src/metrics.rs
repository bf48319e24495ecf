//! Prometheus metrics for KYC review
//!
//! # Metrics
//!
//! - `kyc_tool_calls_total{plugin}` - Tool calls by plugin
//! - `kyc_tool_errors_total{plugin}` - Tool calls that ended in an error
//! - `kyc_sanctions_hits_total` - Screenings with at least one match
//! - `kyc_accounts_frozen_total` - Accounts frozen by compliance review

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Tool calls by plugin
    pub tool_calls: IntCounterVec,

    /// Failed tool calls by plugin
    pub tool_errors: IntCounterVec,

    /// Screenings with a hit
    pub sanctions_hits: IntCounter,

    /// Accounts frozen by review
    pub accounts_frozen: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create collectors on a private registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let tool_calls = IntCounterVec::new(
            Opts::new("kyc_tool_calls_total", "Tool calls by plugin"),
            &["plugin"],
        )?;
        registry.register(Box::new(tool_calls.clone()))?;

        let tool_errors = IntCounterVec::new(
            Opts::new("kyc_tool_errors_total", "Tool calls that ended in an error"),
            &["plugin"],
        )?;
        registry.register(Box::new(tool_errors.clone()))?;

        let sanctions_hits = IntCounter::new(
            "kyc_sanctions_hits_total",
            "Screenings with at least one match",
        )?;
        registry.register(Box::new(sanctions_hits.clone()))?;

        let accounts_frozen = IntCounter::new(
            "kyc_accounts_frozen_total",
            "Accounts frozen by compliance review",
        )?;
        registry.register(Box::new(accounts_frozen.clone()))?;

        Ok(Self {
            tool_calls,
            tool_errors,
            sanctions_hits,
            accounts_frozen,
            registry,
        })
    }

    /// Record a tool call
    pub fn record_tool_call(&self, plugin: &str) {
        self.tool_calls.with_label_values(&[plugin]).inc();
    }

    /// Record a failed tool call
    pub fn record_tool_error(&self, plugin: &str) {
        self.tool_errors.with_label_values(&[plugin]).inc();
    }

    /// Record a screening hit
    pub fn record_sanctions_hit(&self) {
        self.sanctions_hits.inc();
    }

    /// Record a review freeze
    pub fn record_account_frozen(&self) {
        self.accounts_frozen.inc();
    }

    /// Text exposition of every collector
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_registries() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_tool_call("BANK");
        a.record_tool_call("BANK");
        a.record_sanctions_hit();

        assert_eq!(a.tool_calls.with_label_values(&["BANK"]).get(), 2);
        assert_eq!(b.tool_calls.with_label_values(&["BANK"]).get(), 0);
        assert_eq!(a.sanctions_hits.get(), 1);
    }

    #[test]
    fn test_render() {
        let metrics = Metrics::new().unwrap();
        metrics.record_tool_error("ZEFIX");
        metrics.record_account_frozen();

        let text = metrics.render().unwrap();
        assert!(text.contains("kyc_tool_errors_total{plugin=\"ZEFIX\"} 1"));
        assert!(text.contains("kyc_accounts_frozen_total 1"));
    }
}
