//! Assistants API trait definition

use async_trait::async_trait;

use crate::{
    Assistant, CreateAssistantRequest, CreateMessageRequest, CreateRunRequest, Message, Result,
    Run, RunStep, Thread, ToolOutput,
};

/// Operations of the remote assistant-run service
///
/// Implementations talk to the hosted service ([`crate::OpenAIAssistantsClient`])
/// or stand in for it in tests. List operations return every page, in the
/// order the service lists them.
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    /// List all assistants visible to the configured credentials
    async fn list_assistants(&self) -> Result<Vec<Assistant>>;

    /// Create an assistant
    async fn create_assistant(&self, request: &CreateAssistantRequest) -> Result<Assistant>;

    /// Delete an assistant by id
    async fn delete_assistant(&self, assistant_id: &str) -> Result<()>;

    /// Create an empty thread
    async fn create_thread(&self) -> Result<Thread>;

    /// Append a message to a thread
    async fn create_message(
        &self,
        thread_id: &str,
        request: &CreateMessageRequest,
    ) -> Result<Message>;

    /// Start a run of an assistant over a thread
    async fn create_run(&self, thread_id: &str, request: &CreateRunRequest) -> Result<Run>;

    /// Fetch the current state of a run
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// Submit the outputs of every pending tool call of a run as one batch
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run>;

    /// List the messages of a thread
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>>;

    /// List the steps taken by a run
    async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>>;

    /// Download the raw content of a file
    async fn retrieve_file_content(&self, file_id: &str) -> Result<Vec<u8>>;
}
