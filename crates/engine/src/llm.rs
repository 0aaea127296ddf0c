// crates/engine/src/llm.rs
use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::Message;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat client for an ollama-compatible endpoint. One round-trip per call,
/// no streaming.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    url: String,
    model: String,
}

impl LlmClient {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            url,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn chat(&self, messages: &[Message]) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json::<ChatResponse>()
            .await?;

        Ok(response.message.content.unwrap_or_default())
    }
}
