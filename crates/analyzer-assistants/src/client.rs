//! reqwest implementation of the OpenAI Assistants API
//!
//! See: https://platform.openai.com/docs/api-reference/assistants
//!
//! # Example
//!
//! ```no_run
//! use analyzer_assistants::{AssistantsApi, OpenAIAssistantsClient, OpenAIConfig};
//!
//! # async fn example() -> analyzer_assistants::Result<()> {
//! let client = OpenAIAssistantsClient::with_config(
//!     OpenAIConfig::new("sk-...").with_timeout(60),
//! )?;
//!
//! let thread = client.create_thread().await?;
//! println!("{}", thread.id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::run::SubmitToolOutputsRequest;
use crate::{
    Assistant, AssistantError, AssistantsApi, CreateAssistantRequest, CreateMessageRequest,
    CreateRunRequest, Message, Result, Run, RunStep, Thread, ToolOutput,
};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const ASSISTANTS_BETA: &str = "assistants=v2";
const PAGE_LIMIT: &str = "100";

/// Configuration for the Assistants API client
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the OpenAI API (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for the hosted Assistants API
pub struct OpenAIAssistantsClient {
    client: Client,
    config: OpenAIConfig,
}

impl std::fmt::Debug for OpenAIAssistantsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIAssistantsClient")
            .field("api_base", &self.config.api_base)
            .finish_non_exhaustive()
    }
}

impl OpenAIAssistantsClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| AssistantError::Configuration(format!("invalid API key: {e}")))?,
        );
        headers.insert(
            HeaderName::from_static("openai-beta"),
            HeaderValue::from_static(ASSISTANTS_BETA),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new client with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{route}", self.config.api_base.trim_end_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "OpenAI response"
        );
        error_for_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        self.send_json(self.client.get(self.url(route))).await
    }

    async fn post<B, T>(&self, route: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send_json(self.client.post(self.url(route)).json(body))
            .await
    }

    /// Fetch every page of a list endpoint, following the `last_id` cursor
    async fn list<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>> {
        let mut data = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.url(route))
                .query(&[("limit", PAGE_LIMIT)]);
            if let Some(cursor) = &after {
                request = request.query(&[("after", cursor.as_str())]);
            }

            let page: ListPage<T> = self.send_json(request).await?;
            data.extend(page.data);

            match (page.has_more, page.last_id) {
                (true, Some(last_id)) => after = Some(last_id),
                _ => break,
            }
        }

        Ok(data)
    }
}

/// Turn a non-2xx response into [`AssistantError::Http`]
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    Err(AssistantError::Http {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Provider error message from an error body, or the body itself
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListPage<T> {
    data: Vec<T>,
    #[serde(default)]
    last_id: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct DeletionStatus {
    id: String,
    deleted: bool,
}

#[async_trait]
impl AssistantsApi for OpenAIAssistantsClient {
    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        self.list("assistants").await
    }

    #[instrument(skip(self, request), fields(name = %request.name, model = %request.model))]
    async fn create_assistant(&self, request: &CreateAssistantRequest) -> Result<Assistant> {
        self.post("assistants", request).await
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        let request = self.client.delete(self.url(&format!("assistants/{assistant_id}")));
        let status: DeletionStatus = self.send_json(request).await?;
        if !status.deleted {
            return Err(AssistantError::UnexpectedResponse(format!(
                "assistant {} was not deleted",
                status.id
            )));
        }
        Ok(())
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.post("threads", &serde_json::json!({})).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        request: &CreateMessageRequest,
    ) -> Result<Message> {
        self.post(&format!("threads/{thread_id}/messages"), request)
            .await
    }

    async fn create_run(&self, thread_id: &str, request: &CreateRunRequest) -> Result<Run> {
        self.post(&format!("threads/{thread_id}/runs"), request).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get(&format!("threads/{thread_id}/runs/{run_id}")).await
    }

    #[instrument(skip(self, outputs), fields(count = outputs.len()))]
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        self.post(
            &format!("threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            &SubmitToolOutputsRequest {
                tool_outputs: outputs,
            },
        )
        .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        self.list(&format!("threads/{thread_id}/messages")).await
    }

    async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>> {
        self.list(&format!("threads/{thread_id}/runs/{run_id}/steps"))
            .await
    }

    async fn retrieve_file_content(&self, file_id: &str) -> Result<Vec<u8>> {
        let response = self
            .send(self.client.get(self.url(&format!("files/{file_id}/content"))))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }
}
