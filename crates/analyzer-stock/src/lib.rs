//! Stock time-series analysis with a hosted assistant
//!
//! This crate wires the pieces of an analysis together:
//!
//! - [`AlphaVantageClient`]: time series retrieval with bounded retry on
//!   throttling and timeouts
//! - [`TimeSeriesTool`]: the `retrieve_time_series` tool the assistant calls
//! - [`StockAnalyzer`]: provisions the assistant, drives the run through its
//!   tool-call pauses and reads back the answer
//!
//! # Example
//!
//! ```rust,ignore
//! use analyzer_stock::{AnalysisRequest, StockAnalyzer};
//! use analyzer_utils::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let analyzer = StockAnalyzer::from_config(&config)?;
//!
//!     let report = analyzer.run(&AnalysisRequest::default()).await?;
//!     println!("{:?}", report.texts);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod error;
pub mod prompts;
pub mod retry;
pub mod tools;

// Re-export main types
pub use analysis::{
    AnalysisReport, AnalysisRequest, AssistantSettings, DEFAULT_IMAGE_PATH, DEFAULT_INTERVAL,
    DEFAULT_SYMBOL, StockAnalyzer,
};
pub use api::{AlphaVantageClient, HttpFetch, Interval, ReqwestFetch};
pub use error::{MarketDataError, Result};
pub use retry::RetryPolicy;
pub use tools::{TIME_SERIES_TOOL, TimeSeriesTool};
