//! Client for the customer-care assistant, an OpenAI-compatible
//! chat-completions API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;

pub const SYSTEM_PROMPT: &str = "You are the customer care assistant of KrishiMitra, an online \
marketplace for fresh produce sold directly by farmers. Help customers with orders, delivery \
tracking, payments, returns and other questions about KrishiMitra policies. Be polite and accurate.";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat assistant is not configured")]
    NotConfigured,
    #[error("network error: {0}")]
    Network(String),
    #[error("service error: HTTP {0}")]
    Service(reqwest::StatusCode),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("assistant returned no reply")]
    EmptyReply,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Sends one user message and returns the assistant's reply. Fire-once.
    pub async fn ask(&self, message: &str) -> Result<String, ChatError> {
        let api_key = self.config.api_key.as_deref().ok_or(ChatError::NotConfigured)?;

        let request = CompletionRequest {
            model: &self.config.model,
            messages: [
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: message,
                },
            ],
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.api_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::Service(response.status()));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ChatError::EmptyReply)
    }
}
