//! Find-or-create resolution of a named assistant

use std::sync::Arc;
use tracing::{info, instrument};

use crate::{Assistant, AssistantsApi, CreateAssistantRequest, Result};

/// Resolves the assistant this application runs against
///
/// The service allows several assistants with the same name; the first one in
/// listing order is used. Two processes resolving the same name at the same
/// time can both see no match and both create one.
pub struct AssistantProvisioner {
    api: Arc<dyn AssistantsApi>,
}

impl AssistantProvisioner {
    pub fn new(api: Arc<dyn AssistantsApi>) -> Self {
        Self { api }
    }

    /// Return the first assistant named `request.name`, creating one if needed
    ///
    /// An existing match is returned as-is, even when its instructions, tools
    /// or model differ from `request`. With `delete_if_exists` the match is
    /// deleted and a fresh assistant is created from `request`.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn resolve(
        &self,
        request: &CreateAssistantRequest,
        delete_if_exists: bool,
    ) -> Result<Assistant> {
        let existing = self
            .api
            .list_assistants()
            .await?
            .into_iter()
            .find(|assistant| assistant.name.as_deref() == Some(request.name.as_str()));

        match existing {
            Some(assistant) if delete_if_exists => {
                self.api.delete_assistant(&assistant.id).await?;
                let created = self.api.create_assistant(request).await?;
                info!(
                    "Matching `{}` assistant {} deleted, created new assistant: {}",
                    request.name, assistant.id, created.id
                );
                Ok(created)
            }
            Some(assistant) => {
                info!(
                    "Matching `{}` assistant found, using the first match: {}",
                    request.name, assistant.id
                );
                Ok(assistant)
            }
            None => {
                let created = self.api.create_assistant(request).await?;
                info!(
                    "No `{}` assistant found, created new assistant: {}",
                    request.name, created.id
                );
                Ok(created)
            }
        }
    }
}
