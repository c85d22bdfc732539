//! Conversation threads and their messages

use serde::{Deserialize, Serialize};

/// A conversation container owning an ordered sequence of messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(default)]
    pub created_at: u64,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    pub role: Role,
    /// Ordered content blocks
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub run_id: Option<String>,
}

impl Message {
    /// First content block of the message, if any
    pub fn first_block(&self) -> Option<&ContentBlock> {
        self.content.first()
    }
}

/// A typed block of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text
    Text { text: TextContent },
    /// Reference to a file produced by the assistant (e.g. a chart)
    ImageFile { image_file: ImageFile },
    /// Reference to an external image
    ImageUrl { image_url: ImageUrl },
    /// The model declined to answer
    Refusal { refusal: String },
    /// Any block type this client does not model
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Body of a create-message request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateMessageRequest {
    pub role: Role,
    pub content: String,
}

impl CreateMessageRequest {
    /// A user message with text content
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_blocks() {
        let message: Message = serde_json::from_value(json!({
            "id": "msg_1",
            "object": "thread.message",
            "thread_id": "thread_1",
            "role": "assistant",
            "content": [
                { "type": "image_file", "image_file": { "file_id": "file-1", "detail": "auto" } },
                { "type": "text", "text": { "value": "Here is the chart", "annotations": [] } },
                { "type": "something_new", "payload": 1 }
            ],
            "run_id": "run_1"
        }))
        .unwrap();

        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content.len(), 3);
        match message.first_block() {
            Some(ContentBlock::ImageFile { image_file }) => assert_eq!(image_file.file_id, "file-1"),
            other => panic!("Expected image file block, got {other:?}"),
        }
        assert_eq!(message.content[2], ContentBlock::Unsupported);
    }

    #[test]
    fn test_user_message_request() {
        let request = CreateMessageRequest::user("Analyze CRM");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "role": "user", "content": "Analyze CRM" })
        );
    }
}
