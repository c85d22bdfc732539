//! Tool for fetching raw time series data

use analyzer_assistants::tools::schema;
use analyzer_core::Result as CoreResult;
use analyzer_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{AlphaVantageClient, Interval};

/// Name the tool is declared and registered under
pub const TIME_SERIES_TOOL: &str = "retrieve_time_series";

/// Tool that retrieves a symbol's time series from Alpha Vantage
#[derive(Debug, Clone)]
pub struct TimeSeriesTool {
    client: AlphaVantageClient,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesParams {
    symbol: String,
    interval: String,
}

impl TimeSeriesTool {
    /// Create a new time series tool
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeSeriesTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TimeSeriesParams = serde_json::from_value(params).map_err(|e| {
            analyzer_core::Error::InvalidArgument(format!("Invalid parameters: {e}"))
        })?;

        Ok(self.client.retrieve(&params.symbol, &params.interval).await?)
    }

    fn name(&self) -> &'static str {
        TIME_SERIES_TOOL
    }

    fn description(&self) -> &'static str {
        "Retrieve the time series data for a stock symbol at the given interval."
    }

    fn input_schema(&self) -> Value {
        let intervals: Vec<&str> = Interval::ALL.iter().map(|i| i.as_str()).collect();
        schema::object(
            json!({
                "symbol": schema::string("Stock ticker symbol (e.g., 'CRM', 'IBM')"),
                "interval": schema::string_enum("Interval of the time series", &intervals),
            }),
            &["symbol", "interval"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpFetch;
    use crate::error::Result;
    use std::sync::{Arc, Mutex};
    use url::Url;

    #[derive(Default)]
    struct EchoFetch {
        requests: Mutex<Vec<Url>>,
    }

    #[async_trait]
    impl HttpFetch for EchoFetch {
        async fn get_json(&self, url: &Url) -> Result<Value> {
            self.requests.lock().unwrap().push(url.clone());
            Ok(json!({"Weekly Time Series": {}}))
        }
    }

    fn tool(fetch: Arc<EchoFetch>) -> TimeSeriesTool {
        let client = AlphaVantageClient::new(fetch, "https://example.test/query", "key").unwrap();
        TimeSeriesTool::new(client)
    }

    #[test]
    fn test_tool_metadata() {
        let tool = tool(Arc::default());

        assert_eq!(tool.name(), "retrieve_time_series");
        assert!(!tool.description().is_empty());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["symbol", "interval"]));
        assert_eq!(
            schema["properties"]["interval"]["enum"],
            json!(["intraday", "daily", "weekly", "monthly"])
        );
    }

    #[tokio::test]
    async fn test_execute_passes_arguments() {
        let fetch = Arc::new(EchoFetch::default());
        let tool = tool(fetch.clone());

        let result = tool
            .execute(json!({"symbol": "CRM", "interval": "weekly"}))
            .await
            .unwrap();

        assert!(result.get("Weekly Time Series").is_some());
        let requests = fetch.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let query = requests[0].query().unwrap();
        assert!(query.contains("function=TIME_SERIES_WEEKLY"));
        assert!(query.contains("symbol=CRM"));
    }

    #[tokio::test]
    async fn test_execute_missing_argument() {
        let fetch = Arc::new(EchoFetch::default());
        let tool = tool(fetch.clone());

        let err = tool.execute(json!({"symbol": "CRM"})).await.unwrap_err();

        assert!(matches!(err, analyzer_core::Error::InvalidArgument(_)));
        assert!(fetch.requests.lock().unwrap().is_empty());
    }
}
