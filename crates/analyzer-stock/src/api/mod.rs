//! API clients for stock data providers

pub mod alpha_vantage;

pub use alpha_vantage::{AlphaVantageClient, HttpFetch, Interval, ReqwestFetch};
