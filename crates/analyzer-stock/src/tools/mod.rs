//! Tools the analysis assistant can call

pub mod time_series;

pub use time_series::{TIME_SERIES_TOOL, TimeSeriesTool};
