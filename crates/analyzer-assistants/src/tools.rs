//! Function tool declarations passed to the assistant at provisioning time

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A function the assistant may ask the caller to execute
///
/// `name` must match the tool registered locally under the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,

    /// What the function does, shown to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON schema of the function's parameters
    #[serde(default)]
    pub parameters: Value,
}

impl FunctionDefinition {
    /// Create a new function definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters,
        }
    }
}

/// Helper module to build JSON schemas for function parameters
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use analyzer_assistants::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "symbol": schema::string("Stock symbol"),
    ///     }),
    ///     &["symbol"],
    /// );
    /// assert_eq!(schema["required"][0], "symbol");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// String property restricted to a fixed set of values
    pub fn string_enum(description: &str, values: &[&str]) -> Value {
        json!({
            "type": "string",
            "description": description,
            "enum": values,
        })
    }
}
