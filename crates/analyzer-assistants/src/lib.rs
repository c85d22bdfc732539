//! OpenAI Assistants API layer for stock-analyzer
//!
//! This crate provides everything needed to drive a hosted assistant run:
//!
//! - Wire types for assistants, threads, messages, runs and run steps
//! - The [`AssistantsApi`] trait, the seam every remote call goes through
//! - [`OpenAIAssistantsClient`], the reqwest implementation of that trait
//! - [`RunPoller`], which drives a run until it settles
//! - [`AssistantProvisioner`], find-or-create resolution of a named assistant

pub mod api;
pub mod assistant;
pub mod client;
pub mod error;
pub mod poller;
pub mod provisioner;
pub mod run;
pub mod thread;
pub mod tools;

#[cfg(test)]
mod testing;

// Re-export main types
pub use api::AssistantsApi;
pub use assistant::{Assistant, AssistantTool, CreateAssistantRequest};
pub use client::{OpenAIAssistantsClient, OpenAIConfig};
pub use error::{AssistantError, Result};
pub use poller::{DEFAULT_POLL_INTERVAL, RunPoller};
pub use provisioner::AssistantProvisioner;
pub use run::{
    CreateRunRequest, FunctionCall, RequiredAction, Run, RunStatus, RunStep, StatusClass,
    ToolCall, ToolOutput,
};
pub use thread::{ContentBlock, CreateMessageRequest, Message, Role, Thread};
pub use tools::FunctionDefinition;
