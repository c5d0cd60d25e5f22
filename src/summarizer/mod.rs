use anyhow::Result;
use async_trait::async_trait;

pub mod openai;

pub use openai::OpenAiSummarizer;

/// Condenses transcript text into a short summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn summarize(&self, text: &str) -> Result<String>;
}
