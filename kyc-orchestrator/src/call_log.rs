//! Bounded history of tool calls

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;

/// Which tool family handled a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PluginType {
    /// Ledger operations
    Bank,
    /// Sanctions screening
    Seco,
    /// Commercial registry
    Zefix,
    /// FINMA register
    Finma,
    /// Official gazette
    Shab,
}

impl PluginType {
    /// Upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginType::Bank => "BANK",
            PluginType::Seco => "SECO",
            PluginType::Zefix => "ZEFIX",
            PluginType::Finma => "FINMA",
            PluginType::Shab => "SHAB",
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginCall {
    /// Tool family
    pub plugin: PluginType,
    /// Function name (`create_account`, ...)
    pub function: String,
    /// Arguments as a JSON object
    pub input: Value,
    /// Text returned to the caller
    pub output: String,
    /// When the call finished
    pub timestamp: DateTime<Utc>,
}

/// Call history holding the last `capacity` calls
#[derive(Debug)]
pub struct CallLog {
    calls: Mutex<VecDeque<PluginCall>>,
    capacity: usize,
}

impl CallLog {
    /// Empty log; a zero capacity is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            calls: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a call, dropping the oldest when full
    pub fn record(&self, plugin: PluginType, function: &str, input: Value, output: &str) {
        let call = PluginCall {
            plugin,
            function: function.to_string(),
            input,
            output: output.to_string(),
            timestamp: Utc::now(),
        };

        let mut calls = self.calls.lock();
        if calls.len() == self.capacity {
            calls.pop_front();
        }
        calls.push_back(call);
    }

    /// Up to `limit` calls, newest first
    pub fn last_calls(&self, limit: usize) -> Vec<PluginCall> {
        self.calls.lock().iter().rev().take(limit).cloned().collect()
    }

    /// Capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of recorded calls
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_newest_first() {
        let log = CallLog::new(10);
        log.record(PluginType::Bank, "create_account", json!({"owner_name": "A"}), "one");
        log.record(PluginType::Seco, "check_sanctions", json!({"name": "A"}), "two");

        let calls = log.last_calls(10);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].output, "two");
        assert_eq!(calls[0].plugin, PluginType::Seco);
        assert_eq!(calls[1].function, "create_account");
        assert!(calls[0].timestamp >= calls[1].timestamp);
    }

    #[test]
    fn test_bounded() {
        let log = CallLog::default();
        for i in 0..60 {
            log.record(PluginType::Bank, "get_account", json!({ "i": i }), &i.to_string());
        }

        assert_eq!(log.len(), 50);
        let calls = log.last_calls(100);
        assert_eq!(calls.len(), 50);
        assert_eq!(calls[0].output, "59");
        assert_eq!(calls[49].output, "10");
    }

    #[test]
    fn test_limit() {
        let log = CallLog::new(5);
        for i in 0..3 {
            log.record(PluginType::Shab, "search_publications", json!({}), &i.to_string());
        }
        let outputs: Vec<_> = log.last_calls(2).into_iter().map(|c| c.output).collect();
        assert_eq!(outputs, vec!["2", "1"]);
        assert!(log.last_calls(0).is_empty());
    }

    #[test]
    fn test_plugin_labels() {
        assert_eq!(PluginType::Finma.to_string(), "FINMA");
        assert_eq!(serde_json::to_string(&PluginType::Zefix).unwrap(), "\"ZEFIX\"");
    }
}
