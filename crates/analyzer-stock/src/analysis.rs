//! Orchestration of one stock analysis
//!
//! [`StockAnalyzer::run`] provisions the assistant, opens a thread with the
//! analysis prompt, starts a run and drives it to completion. Each time the
//! run pauses in `requires_action` the pending tool calls are answered
//! locally and submitted as one batch. Once the run completes, the assistant's
//! messages are read back (charts are saved to disk) and the run steps logged.

use analyzer_assistants::{
    AssistantProvisioner, AssistantTool, AssistantsApi, ContentBlock, CreateAssistantRequest,
    CreateMessageRequest, CreateRunRequest, Message, OpenAIAssistantsClient, OpenAIConfig, Role,
    RunPoller, RunStatus, RunStep,
};
use analyzer_core::{Error, Result};
use analyzer_tools::{ToolDispatcher, ToolRegistry};
use analyzer_utils::AppConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::api::AlphaVantageClient;
use crate::prompts::analysis_prompt;
use crate::tools::TimeSeriesTool;

/// Symbol analyzed when none is given
pub const DEFAULT_SYMBOL: &str = "CRM";

/// Interval requested when none is given
pub const DEFAULT_INTERVAL: &str = "monthly";

/// Where the generated chart is written when no path is given
pub const DEFAULT_IMAGE_PATH: &str = "stock-image.png";

/// How the assistant is provisioned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSettings {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub delete_if_exists: bool,
}

impl AssistantSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.assistant_name.clone(),
            instructions: config.assistant_instructions.clone(),
            model: config.assistant_model.clone(),
            delete_if_exists: config.delete_if_exists,
        }
    }
}

/// What to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub interval: String,
    /// Destination of any image the assistant produces
    pub image_path: PathBuf,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
        }
    }
}

/// Outcome of a completed analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub assistant_id: String,
    pub thread_id: String,
    pub run_id: String,
    /// Number of tool output batches submitted
    pub tool_rounds: usize,
    /// Text answers of the assistant, in listing order
    pub texts: Vec<String>,
    /// Files downloaded to the image path
    pub image_files: Vec<String>,
    pub steps: Vec<RunStep>,
    pub elapsed: Duration,
}

/// Drives an analysis run end to end
pub struct StockAnalyzer {
    api: Arc<dyn AssistantsApi>,
    registry: Arc<ToolRegistry>,
    poller: RunPoller,
    provisioner: AssistantProvisioner,
    dispatcher: ToolDispatcher,
    settings: AssistantSettings,
}

impl StockAnalyzer {
    pub fn new(
        api: Arc<dyn AssistantsApi>,
        registry: Arc<ToolRegistry>,
        settings: AssistantSettings,
    ) -> Self {
        Self {
            poller: RunPoller::new(api.clone()),
            provisioner: AssistantProvisioner::new(api.clone()),
            dispatcher: ToolDispatcher::new(registry.clone()),
            api,
            registry,
            settings,
        }
    }

    /// Wire the OpenAI client and the Alpha Vantage tool from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let openai = OpenAIConfig::new(config.openai_api_key.clone())
            .with_api_base(config.openai_api_base.clone());
        let api = Arc::new(OpenAIAssistantsClient::with_config(openai)?);

        let market_data = AlphaVantageClient::from_config(config)?;
        let registry = ToolRegistry::new().with_tool(Arc::new(TimeSeriesTool::new(market_data)));

        Ok(Self::new(
            api,
            Arc::new(registry),
            AssistantSettings::from_config(config),
        ))
    }

    /// Assistant definition: code interpreter plus every registered tool
    pub fn assistant_request(&self) -> CreateAssistantRequest {
        let mut tools = vec![AssistantTool::CodeInterpreter];
        tools.extend(self.registry.declarations());

        CreateAssistantRequest::new(&self.settings.name, &self.settings.model)
            .with_instructions(&self.settings.instructions)
            .with_tools(tools)
    }

    /// Run one analysis to completion
    #[instrument(skip(self, request), fields(symbol = %request.symbol, interval = %request.interval))]
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let started = Instant::now();

        let assistant = self
            .provisioner
            .resolve(&self.assistant_request(), self.settings.delete_if_exists)
            .await?;
        let assistant_name = assistant.name.as_deref().unwrap_or(&assistant.id);

        let thread = self.api.create_thread().await?;
        info!("Thread created with ID: {}", thread.id);

        let prompt = analysis_prompt(
            &request.symbol,
            &request.interval,
            chrono::Local::now().date_naive(),
        )?;
        self.api
            .create_message(&thread.id, &CreateMessageRequest::user(prompt))
            .await?;

        let run = self
            .api
            .create_run(&thread.id, &CreateRunRequest::new(&assistant.id))
            .await?;
        let run_id = run.id;
        info!("Run initiated with ID: {}", run_id);

        let mut run = self.poller.poll(&run_id, &thread.id).await?;
        info!(
            "Waiting for response from `{}`. Elapsed time: {:.6} s",
            assistant_name,
            started.elapsed().as_secs_f64()
        );

        let mut tool_rounds = 0;
        while run.status == RunStatus::RequiresAction {
            let calls = run.tool_calls();
            if calls.is_empty() {
                return Err(Error::UnexpectedResponse(format!(
                    "run {run_id} requires action but lists no tool calls"
                )));
            }

            let outputs = self.dispatcher.dispatch(calls).await?;
            self.api
                .submit_tool_outputs(&thread.id, &run_id, &outputs)
                .await?;
            tool_rounds += 1;
            debug!("Submitted {} tool outputs (round {})", outputs.len(), tool_rounds);

            run = self.poller.poll(&run_id, &thread.id).await?;
        }
        info!(
            "Run {} completed. Elapsed time: {:.6} s",
            run_id,
            started.elapsed().as_secs_f64()
        );

        let messages = self.api.list_messages(&thread.id).await?;
        let (texts, image_files) = self.read_answers(&messages, &request.image_path).await?;

        let steps = self.api.list_run_steps(&thread.id, &run_id).await?;
        for step in &steps {
            info!("Steps: {}, type: {}, status: {}", step.id, step.kind, step.status);
        }

        Ok(AnalysisReport {
            assistant_id: assistant.id,
            thread_id: thread.id,
            run_id,
            tool_rounds,
            texts,
            image_files,
            steps,
            elapsed: started.elapsed(),
        })
    }

    /// Log the first block of every assistant message, saving image files
    async fn read_answers(
        &self,
        messages: &[Message],
        image_path: &Path,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let mut texts = Vec::new();
        let mut image_files = Vec::new();

        for message in messages.iter().filter(|m| m.role == Role::Assistant) {
            match message.first_block() {
                Some(ContentBlock::Text { text }) => {
                    info!("Assistant: {}", text.value);
                    texts.push(text.value.clone());
                }
                Some(ContentBlock::ImageFile { image_file }) => {
                    let content = self.api.retrieve_file_content(&image_file.file_id).await?;
                    tokio::fs::write(image_path, &content).await?;
                    info!("Assistant: {}", image_file.file_id);
                    info!("Assistant: Generated file at {}", image_path.display());
                    image_files.push(image_file.file_id.clone());
                }
                Some(ContentBlock::ImageUrl { image_url }) => {
                    info!("Assistant: image at {}", image_url.url);
                }
                Some(ContentBlock::Refusal { refusal }) => {
                    warn!("Assistant refused: {}", refusal);
                }
                Some(ContentBlock::Unsupported) | None => {
                    debug!("Skipping message {} without readable content", message.id);
                }
            }
        }

        Ok((texts, image_files))
    }
}
