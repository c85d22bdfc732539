//! Error types for stock-analyzer

use analyzer_utils::ConfigError;
use thiserror::Error;

/// Result type alias for stock-analyzer
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by all stock-analyzer components
///
/// None of these are recovered from: every variant propagates to the driver
/// and terminates the execution.
#[derive(Error, Debug)]
pub enum Error {
    /// A required credential or URL is absent at startup
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// A caller supplied an unsupported argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A remote API answered with a non-2xx status
    #[error("HTTP error {status}: {message}")]
    HttpError {
        /// Response status code
        status: u16,
        /// Response body or provider error message
        message: String,
    },

    /// The request never produced a response (connect, TLS, timeout, decode)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered 200 but the payload signals a business error
    #[error("Upstream rejected request: {0}")]
    UpstreamRejected(String),

    /// The remote run settled in a failure status
    #[error("Run finished with an unexpected status: {0}")]
    RunFailed(String),

    /// A tool call named a tool that is not registered
    #[error("Tool not found in registry: {0}")]
    ToolLookupFailure(String),

    /// A response could not be interpreted
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A prompt template failed to render
    #[error("Template error: {0}")]
    Template(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing(key) => Error::ConfigurationMissing(key),
        }
    }
}

impl Error {
    /// Status code of an HTTP-level failure, if this is one
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
