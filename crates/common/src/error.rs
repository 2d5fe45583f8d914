//! Error types for the WebNN sample harness

use thiserror::Error;

/// Result type alias using the harness Error
pub type Result<T> = std::result::Result<T, Error>;

/// Harness error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("No URL configured for sample: {0}")]
    UnknownSample(String),

    #[error("No selector registered for element: {0}")]
    UnknownElement(String),

    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timeout waiting for {selector} after {ms}ms")]
    WaitTimeout { selector: String, ms: u64 },

    // Display carries the marker prefix checked by result consumers.
    #[error("[PageTimeout]{0}")]
    PageTimeout(String),

    #[error("Page evaluation failed: {0}")]
    Evaluate(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Browser error: {0}")]
    Cdp(String),
}
