//! Alpha Vantage API client

use crate::error::{MarketDataError, Result};
use crate::retry::RetryPolicy;
use analyzer_utils::AppConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

/// Granularity qualifier sent with intraday requests
const INTRADAY_QUALIFIER: &str = "5min";

/// Time series granularity accepted by the fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// Every supported interval, in declaration order
    pub const ALL: [Interval; 4] = [
        Interval::Intraday,
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
    ];

    /// Provider function code for this interval
    pub fn function(self) -> &'static str {
        match self {
            Interval::Intraday => "TIME_SERIES_INTRADAY",
            Interval::Daily => "TIME_SERIES_DAILY",
            Interval::Weekly => "TIME_SERIES_WEEKLY",
            Interval::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Extra `interval` query value, only intraday needs one
    pub fn qualifier(self) -> Option<&'static str> {
        match self {
            Interval::Intraday => Some(INTRADAY_QUALIFIER),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Intraday => "intraday",
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl FromStr for Interval {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| MarketDataError::InvalidInterval(s.to_string()))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport used by the client to issue a GET and decode the JSON body
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Fetch `url`; non-2xx answers are `MarketDataError::Http`
    async fn get_json(&self, url: &Url) -> Result<Value>;
}

/// reqwest-backed [`HttpFetch`]
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Alpha Vantage API client
#[derive(Clone)]
pub struct AlphaVantageClient {
    fetch: Arc<dyn HttpFetch>,
    base_url: Url,
    api_key: String,
    retry: RetryPolicy,
}

impl fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl AlphaVantageClient {
    /// Create a client over an arbitrary transport
    ///
    /// # Arguments
    /// * `fetch` - Transport that performs the GET
    /// * `base_url` - Provider query endpoint, e.g. `https://www.alphavantage.co/query`
    /// * `api_key` - Alpha Vantage API key
    pub fn new(
        fetch: Arc<dyn HttpFetch>,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|source| MarketDataError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            fetch,
            base_url,
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        })
    }

    /// Create a reqwest-backed client from the application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            Arc::new(ReqwestFetch::default()),
            &config.alphavantage_base_url,
            config.alphavantage_api_key.clone(),
        )
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the query URL for a symbol and interval
    pub fn request_url(&self, symbol: &str, interval: Interval) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("function", interval.function())
                .append_pair("symbol", symbol)
                .append_pair("apikey", &self.api_key);
            if let Some(qualifier) = interval.qualifier() {
                query.append_pair("interval", qualifier);
            }
        }
        url
    }

    /// Retrieve the raw time series payload for `symbol`
    ///
    /// The body is returned as decoded, without checking its shape. An
    /// unsupported interval fails before any request is made.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, symbol: &str, interval: &str) -> Result<Value> {
        let interval: Interval = interval.parse()?;
        let url = self.request_url(symbol, interval);
        debug!("Requesting {} for {}", interval.function(), symbol);

        self.retry
            .execute("retrieve_time_series", || self.fetch.get_json(&url))
            .await
    }
}
