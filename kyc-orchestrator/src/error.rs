use thiserror::Error;

/// Orchestrator errors
#[derive(Error, Debug)]
pub enum Error {
    /// Sanctions list could not be loaded
    #[error("Sanctions error: {0}")]
    Sanctions(#[from] sanctions_screening::Error),

    /// Registry lookup failed
    #[error("Registry error: {0}")]
    Registry(#[from] registry_clients::Error),

    /// No account for this owner
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Metrics registration failed
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, Error>;
