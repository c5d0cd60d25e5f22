use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

pub mod openai;

pub use openai::OpenAiTranscriber;

/// Speech-to-text over a recorded audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &'static str;

    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}
