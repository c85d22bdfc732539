//! Error types for Assistants API operations

use crate::run::RunStatus;
use thiserror::Error;

/// Result type for Assistants API operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Errors that can occur while talking to the Assistants API
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The API answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status code
        status: u16,
        /// Provider error message, or the raw body when it is not JSON
        message: String,
    },

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A run settled in a failure-class status
    #[error("Run finished with an unexpected status: {0}")]
    RunFailed(RunStatus),

    /// A run reported a status this client does not know
    #[error("Unknown run status: {0}")]
    UnknownStatus(String),

    /// A successful response whose content contradicts the request
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Convert AssistantError to analyzer_core::Error
impl From<AssistantError> for analyzer_core::Error {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Http { status, message } => {
                analyzer_core::Error::HttpError { status, message }
            }
            AssistantError::Transport(e) => analyzer_core::Error::RequestFailed(e.to_string()),
            AssistantError::Serialization(e) => analyzer_core::Error::Serialization(e),
            AssistantError::RunFailed(status) => analyzer_core::Error::RunFailed(status.to_string()),
            AssistantError::UnknownStatus(status) => {
                analyzer_core::Error::UnexpectedResponse(format!("unknown run status `{status}`"))
            }
            AssistantError::UnexpectedResponse(msg) => {
                analyzer_core::Error::UnexpectedResponse(msg)
            }
            AssistantError::Configuration(msg) => analyzer_core::Error::ConfigurationMissing(msg),
        }
    }
}
