//! KYC Orchestrator
//!
//! Composes the ledger, the sanctions matcher and the registry clients
//! into one review session.
//!
//! # Components
//!
//! - **Context**: [`KycContext`] owns every shared handle and is cloned into
//!   consumers
//! - **Tools**: text-returning operations for an agent or operator, each
//!   recorded in a bounded [`CallLog`]
//! - **Review**: screen account owners and freeze on a sanctions hit
//! - **Seeding**: demo accounts, one of them for a listed person

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod call_log;
pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod review;
pub mod seed;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use call_log::{CallLog, PluginCall, PluginType};
pub use config::Config;
pub use context::KycContext;
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use review::{review_account, review_all, ReviewOutcome};
pub use seed::init_sample_data;
pub use tools::{BankTools, RegistryTools, SanctionsTools};
