// ================================================================
// File: zoda-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Chain error: {0}")]
    Chain(String),

    #[error("Network mismatch: connected to chain {actual}, expected chain {expected}")]
    NetworkMismatch { expected: u64, actual: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

// Provider internals report through anyhow; by the time one of those
// errors crosses the crate boundary it is an upstream-call failure.
impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Upstream(e.to_string())
    }
}
