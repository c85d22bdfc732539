//! Answers a run's pending tool calls
//!
//! Calls are executed one after another in the order the run lists them, and
//! the outputs come back in that same order. The service correlates outputs
//! by `tool_call_id`, so the order only matters for determinism and logs.

use analyzer_assistants::{ToolCall, ToolOutput};
use analyzer_core::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::ToolRegistry;

/// Substring identifying the data key of a time-series payload
const TIME_SERIES_MARKER: &str = "Time Series";

/// Key the provider uses for application-level rejections
const INFORMATION_KEY: &str = "Information";

/// Executes tool calls against a [`ToolRegistry`]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Execute every call and collect the outputs, `outputs[i]` answering `calls[i]`
    ///
    /// The first failing call aborts the whole batch; no partial set of outputs
    /// is ever returned.
    pub async fn dispatch(&self, calls: &[ToolCall]) -> Result<Vec<ToolOutput>> {
        let mut outputs = Vec::with_capacity(calls.len());
        for call in calls {
            outputs.push(self.dispatch_one(call).await?);
        }
        Ok(outputs)
    }

    #[instrument(skip(self, call), fields(id = %call.id, name = %call.function.name))]
    async fn dispatch_one(&self, call: &ToolCall) -> Result<ToolOutput> {
        info!(
            "Tool call with ID and name: {}, {}",
            call.id, call.function.name
        );
        let started = Instant::now();

        let tool = self
            .registry
            .get(&call.function.name)
            .ok_or_else(|| Error::ToolLookupFailure(call.function.name.clone()))?;

        let arguments: Value = serde_json::from_str(&call.function.arguments)?;
        if !arguments.is_object() {
            return Err(Error::InvalidArgument(format!(
                "arguments of `{}` must be a JSON object, got {}",
                call.function.name, call.function.arguments
            )));
        }

        let response = tool.execute(arguments).await?;
        let output = serde_json::to_string(extract_time_series(&response)?)?;

        info!(
            "Done! response received in {:.6} s",
            started.elapsed().as_secs_f64()
        );

        Ok(ToolOutput {
            tool_call_id: call.id.clone(),
            output,
        })
    }
}

/// Value of the first key containing `"Time Series"` (case-sensitive)
///
/// Keys are scanned in payload order. The provider names the data key after
/// the granularity (`Time Series (Daily)`, `Monthly Time Series`, ...), so this
/// depends on its response shape. Without such a key the payload is a
/// rejection and the `Information` message is returned as
/// [`Error::UpstreamRejected`].
pub fn extract_time_series(payload: &Value) -> Result<&Value> {
    let object = payload.as_object().ok_or_else(|| {
        Error::UnexpectedResponse(format!("expected a JSON object, got {payload}"))
    })?;

    if let Some((_, series)) = object
        .iter()
        .find(|(key, _)| key.contains(TIME_SERIES_MARKER))
    {
        return Ok(series);
    }

    let message = match object.get(INFORMATION_KEY) {
        Some(Value::String(info)) => info.clone(),
        Some(other) => other.to_string(),
        None => "response contained no time series data".to_string(),
    };
    Err(Error::UpstreamRejected(message))
}
