use thiserror::Error;

/// Registry client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry answered with a non-success status
    #[error("{api} returned HTTP {status}")]
    Status {
        /// Registry name
        api: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Response body does not have the expected shape
    #[error("Unexpected {api} response: {detail}")]
    Schema {
        /// Registry name
        api: &'static str,
        /// Decoder message
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;
