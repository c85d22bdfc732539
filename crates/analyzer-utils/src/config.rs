//! Application configuration loaded from the environment
//!
//! The configuration is read once at startup (optionally seeded from a `.env`
//! file) and passed by reference to every component that needs it.

use thiserror::Error;

/// Default base URL of the OpenAI API
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default model used when provisioning an assistant
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4.1-nano";

/// Default assistant name when `ASSISTANT_NAME` is not set
pub const DEFAULT_ASSISTANT_NAME: &str = "stock-analyzer";

/// Errors raised while building the configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is absent or empty
    #[error("{0} not present")]
    Missing(String),
}

/// Configuration for a single stock-analyzer execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// OpenAI API key (`OPENAI_API_KEY`)
    pub openai_api_key: String,

    /// OpenAI API base URL (`OPENAI_API_BASE`)
    pub openai_api_base: String,

    /// Alpha Vantage API key (`ALPHAVANTAGE_API_KEY`)
    pub alphavantage_api_key: String,

    /// Alpha Vantage query endpoint (`ALPHAVANTAGE_BASE_URL`)
    pub alphavantage_base_url: String,

    /// Name the assistant is looked up and created under (`ASSISTANT_NAME`)
    pub assistant_name: String,

    /// System instructions for a newly created assistant (`ASSISTANT_INSTRUCTIONS`)
    pub assistant_instructions: String,

    /// Model for a newly created assistant (`ASSISTANT_MODEL`)
    pub assistant_model: String,

    /// Replace an existing assistant of the same name (`DELETE_IF_EXISTS`)
    pub delete_if_exists: bool,
}

impl AppConfig {
    /// Create a new configuration builder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    ///
    /// A `.env` file in the working directory (or any parent) is loaded first
    /// if present; variables already set in the environment take precedence.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::Missing(key.to_string()))
        };

        let openai_api_key = required("OPENAI_API_KEY")?;
        let alphavantage_api_key = required("ALPHAVANTAGE_API_KEY")?;
        let alphavantage_base_url = required("ALPHAVANTAGE_BASE_URL")?;

        let mut builder = Self::builder()
            .openai_api_key(openai_api_key)
            .alphavantage_api_key(alphavantage_api_key)
            .alphavantage_base_url(alphavantage_base_url)
            .delete_if_exists(lookup("DELETE_IF_EXISTS").is_some_and(|v| parse_flag(&v)));

        if let Some(base) = lookup("OPENAI_API_BASE").filter(|v| !v.is_empty()) {
            builder = builder.openai_api_base(base);
        }
        if let Some(name) = lookup("ASSISTANT_NAME").filter(|v| !v.is_empty()) {
            builder = builder.assistant_name(name);
        }
        if let Some(instructions) = lookup("ASSISTANT_INSTRUCTIONS") {
            builder = builder.assistant_instructions(instructions);
        }
        if let Some(model) = lookup("ASSISTANT_MODEL").filter(|v| !v.is_empty()) {
            builder = builder.assistant_model(model);
        }

        builder.build()
    }
}

/// Only a case-insensitive `true` enables a flag
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    openai_api_key: Option<String>,
    openai_api_base: Option<String>,
    alphavantage_api_key: Option<String>,
    alphavantage_base_url: Option<String>,
    assistant_name: Option<String>,
    assistant_instructions: Option<String>,
    assistant_model: Option<String>,
    delete_if_exists: bool,
}

impl AppConfigBuilder {
    /// Set the OpenAI API key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set the OpenAI API base URL
    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    /// Set the Alpha Vantage API key
    pub fn alphavantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alphavantage_api_key = Some(key.into());
        self
    }

    /// Set the Alpha Vantage query endpoint
    pub fn alphavantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alphavantage_base_url = Some(url.into());
        self
    }

    /// Set the assistant name
    pub fn assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = Some(name.into());
        self
    }

    /// Set the assistant instructions
    pub fn assistant_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.assistant_instructions = Some(instructions.into());
        self
    }

    /// Set the assistant model
    pub fn assistant_model(mut self, model: impl Into<String>) -> Self {
        self.assistant_model = Some(model.into());
        self
    }

    /// Replace an existing assistant of the same name
    pub fn delete_if_exists(mut self, delete: bool) -> Self {
        self.delete_if_exists = delete;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            openai_api_key: self
                .openai_api_key
                .ok_or_else(|| ConfigError::Missing("OPENAI_API_KEY".to_string()))?,
            openai_api_base: self
                .openai_api_base
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            alphavantage_api_key: self
                .alphavantage_api_key
                .ok_or_else(|| ConfigError::Missing("ALPHAVANTAGE_API_KEY".to_string()))?,
            alphavantage_base_url: self
                .alphavantage_base_url
                .ok_or_else(|| ConfigError::Missing("ALPHAVANTAGE_BASE_URL".to_string()))?,
            assistant_name: self
                .assistant_name
                .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
            assistant_instructions: self.assistant_instructions.unwrap_or_default(),
            assistant_model: self
                .assistant_model
                .unwrap_or_else(|| DEFAULT_ASSISTANT_MODEL.to_string()),
            delete_if_exists: self.delete_if_exists,
        })
    }
}
