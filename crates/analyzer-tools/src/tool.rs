//! Tool trait definition

use analyzer_assistants::{AssistantTool, FunctionDefinition};
use analyzer_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools the assistant can call
///
/// Each tool must provide a name, description, and JSON schema for its input.
/// The same three values are declared to the assistant at provisioning time.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - JSON object of named arguments (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and match the declared function name
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Declaration of this tool for the assistant
    fn declaration(&self) -> AssistantTool {
        AssistantTool::function(FunctionDefinition::new(
            self.name(),
            self.description(),
            self.input_schema(),
        ))
    }
}
