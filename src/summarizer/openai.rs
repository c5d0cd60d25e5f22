use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::Summarizer;
use crate::config::OpenAiConfig;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes conversations. \
Focus on key points, decisions, and action items.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

/// Chat-completions backed summarizer.
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiSummarizer {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("OpenAI API key not configured (set OPENAI_API_KEY)")?;

        let endpoint = format!("{}/chat/completions", config.api_base);

        info!(
            "Initialized OpenAI summarizer: model={}, endpoint={}",
            config.model, endpoint
        );

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn name(&self) -> &'static str {
        "OpenAI chat API"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Please summarize the following conversation:\n\n{text}"),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Requesting summary of {} chars", text.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send summarization request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            error!(
                "Summarization request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                return Err(anyhow::anyhow!(
                    "Summarization API error: {} (type: {:?}, code: {:?})",
                    error_response.error.message,
                    error_response.error.r#type,
                    error_response.error.code
                ));
            }

            return Err(anyhow::anyhow!(
                "Summarization request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let chat: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to parse summarization response")?;

        let summary = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .context("Summarization response contained no choices")?;

        info!("Summary generated: {} chars", summary.len());
        Ok(summary)
    }
}
