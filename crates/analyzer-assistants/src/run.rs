//! Runs: one inference and tool-use cycle over a thread

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AssistantError, Result};

/// A run of an assistant over a thread
///
/// Only the remote service changes `status`; this client reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    /// Present while the run waits for tool outputs
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    /// The last error reported for this run
    #[serde(default)]
    pub last_error: Option<LastError>,
    #[serde(default)]
    pub created_at: u64,
}

impl Run {
    /// Tool calls the run is waiting on; empty unless paused in `requires_action`
    pub fn tool_calls(&self) -> &[ToolCall] {
        match &self.required_action {
            Some(RequiredAction::SubmitToolOutputs {
                submit_tool_outputs,
            }) => &submit_tool_outputs.tool_calls,
            None => &[],
        }
    }
}

/// Status reported by the remote service for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Cancelling,
    RequiresAction,
    Completed,
    Cancelled,
    Failed,
    Incomplete,
    Expired,
    /// A status string this client does not know; never classified
    #[serde(untagged)]
    Unknown(String),
}

/// How the poller treats a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Not settled yet, keep polling
    Ongoing,
    /// Settled for this polling cycle; the caller branches on the status
    Returnable,
    /// Settled and unrecoverable
    Failed,
}

impl RunStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Cancelling => "cancelling",
            Self::RequiresAction => "requires_action",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Incomplete => "incomplete",
            Self::Expired => "expired",
            Self::Unknown(status) => status,
        }
    }

    /// Classify the status; unknown statuses are an error, never defaulted
    pub fn class(&self) -> Result<StatusClass> {
        match self {
            Self::Queued | Self::InProgress | Self::Cancelling => Ok(StatusClass::Ongoing),
            Self::RequiresAction | Self::Completed => Ok(StatusClass::Returnable),
            Self::Cancelled | Self::Failed | Self::Incomplete | Self::Expired => {
                Ok(StatusClass::Failed)
            }
            Self::Unknown(status) => Err(AssistantError::UnknownStatus(status.clone())),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action the run needs from the caller before it can continue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredAction {
    SubmitToolOutputs {
        submit_tool_outputs: SubmitToolOutputs,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitToolOutputs {
    pub tool_calls: Vec<ToolCall>,
}

/// A request from the assistant to execute a local function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object
    pub arguments: String,
}

/// Result of one tool call, correlated by `tool_call_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastError {
    pub code: String,
    pub message: String,
}

/// Body of a create-run request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
}

impl CreateRunRequest {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubmitToolOutputsRequest<'a> {
    pub tool_outputs: &'a [ToolOutput],
}

/// One step (message creation or tool calls) taken during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStep {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}
