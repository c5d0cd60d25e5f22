use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error, info};

use super::Transcriber;
use crate::config::OpenAiConfig;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
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

/// Hosted transcription via the OpenAI audio API.
pub struct OpenAiTranscriber {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiTranscriber {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("OpenAI API key not configured (set OPENAI_API_KEY)")?;

        let endpoint = format!("{}/audio/transcriptions", config.api_base);

        info!("Initialized OpenAI transcriber with endpoint: {}", endpoint);

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
            model: config.transcription_model.clone(),
        })
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    fn name(&self) -> &'static str {
        "OpenAI transcription API"
    }

    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        info!("Transcribing audio file: {:?}", audio_path);

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let audio_data = tokio::fs::read(audio_path)
            .await
            .context("Failed to read audio file")?;

        let part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("audio/wav")
            .context("Failed to build multipart file")?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        debug!("Uploading audio with model {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Failed to send transcription request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            error!(
                "Transcription request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                return Err(anyhow::anyhow!(
                    "Transcription API error: {} (type: {:?}, code: {:?})",
                    error_response.error.message,
                    error_response.error.r#type,
                    error_response.error.code
                ));
            }

            return Err(anyhow::anyhow!(
                "Transcription request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let transcription: TranscriptionResponse = serde_json::from_str(&response_text)
            .context("Failed to parse transcription response")?;

        let text = transcription.text.trim().to_string();
        info!("Transcription complete: {} chars", text.len());

        Ok(text)
    }
}
