//! Shared utilities for stock-analyzer
//!
//! This crate provides the functionality every other crate of the workspace
//! leans on: tracing setup and the application configuration that is loaded
//! once at startup and handed to each component by reference.

pub mod config;
pub mod logging;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use logging::init_tracing;
