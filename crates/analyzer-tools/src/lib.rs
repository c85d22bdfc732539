//! Tool management and dispatch for stock-analyzer
//!
//! This crate provides a framework for defining tools (functions) that the
//! assistant can ask the caller to execute, and the dispatcher that answers a
//! run's pending tool calls.

pub mod dispatcher;
pub mod registry;
pub mod tool;

pub use dispatcher::{ToolDispatcher, extract_time_series};
pub use registry::ToolRegistry;
pub use tool::Tool;
