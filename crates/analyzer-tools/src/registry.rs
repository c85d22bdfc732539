//! Tool registry for managing available tools

use crate::Tool;
use analyzer_assistants::AssistantTool;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of the tools the assistant is allowed to call
///
/// The set is closed: it is filled at startup and must match the tools
/// declared on the assistant.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Register a tool, builder style
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Declarations of every registered tool, ordered by name
    pub fn declarations(&self) -> Vec<AssistantTool> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools.into_iter().map(|tool| tool.declaration()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::Result;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct Named(&'static str);

    #[async_trait]
    impl Tool for Named {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(params)
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(Named("b")))
            .with_tool(Arc::new(Named("a")));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("a").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_declarations_are_sorted() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(Named("zeta")))
            .with_tool(Arc::new(Named("alpha")));

        let names: Vec<_> = registry
            .declarations()
            .iter()
            .filter_map(|tool| tool.function_name().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.declarations().is_empty());
    }
}
