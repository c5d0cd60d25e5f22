use anyhow::{bail, Result};

use crate::config::Config;
use crate::summarizer::{OpenAiSummarizer, Summarizer};
use crate::transcription::{OpenAiTranscriber, Transcriber};

use super::args::{SummarizeCliArgs, TranscribeCliArgs};

pub async fn handle_transcribe_command(args: TranscribeCliArgs) -> Result<()> {
    if !args.file.exists() {
        bail!("Audio file not found: {:?}", args.file);
    }

    let config = Config::load()?;
    let transcriber = OpenAiTranscriber::new(&config.openai)?;

    let text = transcriber.transcribe(&args.file).await?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &text)?;
            println!("Transcript written to {:?} ({} chars)", path, text.len());
        }
        None => println!("{text}"),
    }

    Ok(())
}

pub async fn handle_summarize_command(args: SummarizeCliArgs) -> Result<()> {
    if !args.file.exists() {
        bail!("Text file not found: {:?}", args.file);
    }

    let config = Config::load()?;
    let summarizer = OpenAiSummarizer::new(&config.openai)?;

    let text = std::fs::read_to_string(&args.file)?;
    if text.trim().is_empty() {
        bail!("Nothing to summarize: {:?} is empty", args.file);
    }

    let summary = summarizer.summarize(&text).await?;
    println!("{summary}");

    Ok(())
}
