//! Assistant resources

use serde::{Deserialize, Serialize};

use crate::tools::FunctionDefinition;

/// A named assistant owned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub created_at: u64,
    /// The name of the assistant; the service allows duplicates and absent names
    #[serde(default)]
    pub name: Option<String>,
    /// The system instructions that the assistant uses
    #[serde(default)]
    pub instructions: Option<String>,
    pub model: String,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
}

/// A capability declared on an assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantTool {
    /// Sandboxed code execution, used by the assistant to build charts
    CodeInterpreter,
    /// Retrieval over attached files
    FileSearch {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_search: Option<serde_json::Value>,
    },
    /// A function executed by the caller
    Function { function: FunctionDefinition },
}

impl AssistantTool {
    /// Declare a caller-executed function
    pub fn function(function: FunctionDefinition) -> Self {
        Self::Function { function }
    }

    /// Name of the declared function, if this is a function tool
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Function { function } => Some(function.name.as_str()),
            _ => None,
        }
    }
}

/// Body of a create-assistant request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAssistantRequest {
    pub model: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub tools: Vec<AssistantTool>,
}

impl CreateAssistantRequest {
    /// Create a request without instructions or tools
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            instructions: None,
            tools: Vec::new(),
        }
    }

    /// Set the system instructions; empty instructions are sent as-is
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set the declared tools
    pub fn with_tools(mut self, tools: Vec<AssistantTool>) -> Self {
        self.tools = tools;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_wire_format() {
        let tools = vec![
            AssistantTool::CodeInterpreter,
            AssistantTool::function(FunctionDefinition::new("f", "does f", json!({}))),
        ];

        let value = serde_json::to_value(&tools).unwrap();
        assert_eq!(value[0], json!({ "type": "code_interpreter" }));
        assert_eq!(value[1]["type"], "function");
        assert_eq!(value[1]["function"]["name"], "f");
    }

    #[test]
    fn test_assistant_deserialization() {
        let assistant: Assistant = serde_json::from_value(json!({
            "id": "asst_abc123",
            "object": "assistant",
            "created_at": 1_698_984_975,
            "name": "Stock Analyst",
            "description": null,
            "model": "gpt-4.1-nano",
            "instructions": null,
            "tools": [
                { "type": "code_interpreter" },
                { "type": "file_search", "file_search": { "max_num_results": 20 } },
                {
                    "type": "function",
                    "function": {
                        "name": "retrieve_time_series",
                        "description": "Fetch prices",
                        "parameters": { "type": "object" }
                    }
                }
            ],
            "metadata": {}
        }))
        .unwrap();

        assert_eq!(assistant.name.as_deref(), Some("Stock Analyst"));
        assert_eq!(assistant.tools.len(), 3);
        assert_eq!(
            assistant.tools[2].function_name(),
            Some("retrieve_time_series")
        );
        assert_eq!(assistant.tools[0].function_name(), None);
    }

    #[test]
    fn test_create_request_omits_missing_instructions() {
        let request = CreateAssistantRequest::new("Analyst", "gpt-4.1-nano");
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("instructions").is_none());
        assert_eq!(value["tools"], json!([]));
    }
}
