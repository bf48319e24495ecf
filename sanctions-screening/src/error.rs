use thiserror::Error;

/// Sanctions screening errors
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot could not be fetched and no cached copy was usable
    #[error("Sanctions list fetch failed: {0}")]
    Fetch(String),

    /// Local cache could not be read or written
    #[error("Sanctions cache error: {0}")]
    Cache(#[from] std::io::Error),

    /// Snapshot content has an unexpected shape
    #[error("Invalid sanctions snapshot: {0}")]
    Snapshot(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

/// Result type for screening operations
pub type Result<T> = std::result::Result<T, Error>;
