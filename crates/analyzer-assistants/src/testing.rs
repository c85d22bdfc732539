//! In-memory stand-in for the remote service

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

use crate::{
    Assistant, AssistantsApi, CreateAssistantRequest, CreateMessageRequest, CreateRunRequest,
    Message, Result, Run, RunStatus, RunStep, Thread, ToolOutput,
};

/// Serves scripted run statuses and a mutable assistant list, recording calls
#[derive(Default)]
pub(crate) struct FakeApi {
    statuses: Mutex<VecDeque<RunStatus>>,
    assistants: Mutex<Vec<Assistant>>,
    pub(crate) retrievals: Mutex<Vec<Instant>>,
    /// `(thread_id, run_id)` of every retrieval
    pub(crate) retrieved: Mutex<Vec<(String, String)>>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn with_statuses(statuses: Vec<RunStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            ..Self::default()
        }
    }

    pub(crate) fn with_assistants(assistants: Vec<Assistant>) -> Self {
        Self {
            assistants: Mutex::new(assistants),
            ..Self::default()
        }
    }

    pub(crate) fn retrieval_count(&self) -> usize {
        self.retrievals.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn assistant(id: &str, name: &str) -> Assistant {
    Assistant {
        id: id.to_string(),
        created_at: 0,
        name: Some(name.to_string()),
        instructions: None,
        model: "gpt-4.1-nano".to_string(),
        tools: Vec::new(),
    }
}

pub(crate) fn run_with_status(status: RunStatus) -> Run {
    Run {
        id: "run_1".to_string(),
        thread_id: "thread_1".to_string(),
        assistant_id: "asst_1".to_string(),
        status,
        required_action: None,
        last_error: None,
        created_at: 0,
    }
}

#[async_trait]
impl AssistantsApi for FakeApi {
    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        self.record("list".to_string());
        Ok(self.assistants.lock().unwrap().clone())
    }

    async fn create_assistant(&self, request: &CreateAssistantRequest) -> Result<Assistant> {
        self.record(format!("create:{}", request.name));
        let mut assistants = self.assistants.lock().unwrap();
        let created = Assistant {
            id: format!("asst_new_{}", assistants.len()),
            created_at: 0,
            name: Some(request.name.clone()),
            instructions: request.instructions.clone(),
            model: request.model.clone(),
            tools: request.tools.clone(),
        };
        assistants.push(created.clone());
        Ok(created)
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        self.record(format!("delete:{assistant_id}"));
        self.assistants
            .lock()
            .unwrap()
            .retain(|a| a.id != assistant_id);
        Ok(())
    }

    async fn create_thread(&self) -> Result<Thread> {
        unreachable!("threads are not scripted")
    }

    async fn create_message(&self, _: &str, _: &CreateMessageRequest) -> Result<Message> {
        unreachable!("messages are not scripted")
    }

    async fn create_run(&self, _: &str, _: &CreateRunRequest) -> Result<Run> {
        unreachable!("run creation is not scripted")
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.retrievals.lock().unwrap().push(Instant::now());
        self.retrieved
            .lock()
            .unwrap()
            .push((thread_id.to_string(), run_id.to_string()));
        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .expect("status script exhausted");
        Ok(run_with_status(status))
    }

    async fn submit_tool_outputs(&self, _: &str, _: &str, _: &[ToolOutput]) -> Result<Run> {
        unreachable!("tool outputs are not scripted")
    }

    async fn list_messages(&self, _: &str) -> Result<Vec<Message>> {
        unreachable!("messages are not scripted")
    }

    async fn list_run_steps(&self, _: &str, _: &str) -> Result<Vec<RunStep>> {
        unreachable!("run steps are not scripted")
    }

    async fn retrieve_file_content(&self, _: &str) -> Result<Vec<u8>> {
        unreachable!("files are not scripted")
    }
}
