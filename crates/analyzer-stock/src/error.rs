//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// The requested interval has no provider function
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// The configured provider URL cannot be parsed
    #[error("Invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The provider answered with a non-2xx status
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Network or transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;

impl MarketDataError {
    /// Status code of an HTTP-level failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convert MarketDataError to analyzer_core::Error
impl From<MarketDataError> for analyzer_core::Error {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::InvalidInterval(interval) => analyzer_core::Error::InvalidArgument(
                format!("Invalid interval: {interval}"),
            ),
            MarketDataError::InvalidBaseUrl { url, source } => {
                analyzer_core::Error::ConfigurationMissing(format!(
                    "ALPHAVANTAGE_BASE_URL `{url}` is not a valid URL: {source}"
                ))
            }
            MarketDataError::Http { status } => analyzer_core::Error::HttpError {
                status,
                message: "Alpha Vantage request failed".to_string(),
            },
            MarketDataError::Network(e) => analyzer_core::Error::RequestFailed(e.to_string()),
            MarketDataError::Json(e) => analyzer_core::Error::Serialization(e),
        }
    }
}
