use serde::{Deserialize, Serialize};

/// One role-tagged entry in a conversation. Order is meaningful: the
/// system message comes first, then the user instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completion endpoint. Built fresh per call
/// and never mutated afterwards. `stream` is always false.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_stream_false() {
        let request = ChatRequest {
            messages: vec![ChatMessage::system("a"), ChatMessage::user("b")],
            model: "test-model".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            stream: false,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["stream"], serde_json::json!(false));
        assert_eq!(body["model"], serde_json::json!("test-model"));
        assert_eq!(body["messages"][0]["role"], serde_json::json!("system"));
        assert_eq!(body["messages"][1]["role"], serde_json::json!("user"));
    }

    #[test]
    fn missing_choices_deserializes_to_empty() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());
    }
}
