//! Recording pipeline orchestrator.
//!
//! Manages the per-guild recording lifecycle:
//! start → stop → flush → transcribe → save → summarize → fan out
//!
//! All dependencies are injected via constructor — no concrete types hardcoded.

use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::UserDirectory;
use crate::notifier::{format_summary_email, Notifier, SmtpNotifier};
use crate::platform::{ChannelId, GuildId, Messenger, VoiceLink};
use crate::session::{RecordingSession, SessionError, SessionRegistry};
use crate::summarizer::{OpenAiSummarizer, Summarizer};
use crate::transcript::TranscriptStore;
use crate::transcription::{OpenAiTranscriber, Transcriber};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no active voice connection")]
    NotConnected,
    #[error("a recording is already active for this guild")]
    AlreadyRecording,
    #[error("no recording in progress for this guild")]
    NotRecording,
    #[error("failed to capture audio: {0}")]
    Capture(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("summarization failed: {0}")]
    Summarization(String),
    #[error("storage failed: {0}")]
    Storage(String),
}

pub struct RecordingPipeline {
    registry: SessionRegistry,
    voice: Arc<dyn VoiceLink>,
    messenger: Arc<dyn Messenger>,
    transcriber: Box<dyn Transcriber>,
    summarizer: Box<dyn Summarizer>,
    store: TranscriptStore,
    directory: Arc<UserDirectory>,
    notifier: Box<dyn Notifier>,
}

impl RecordingPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: SessionRegistry,
        voice: Arc<dyn VoiceLink>,
        messenger: Arc<dyn Messenger>,
        transcriber: Box<dyn Transcriber>,
        summarizer: Box<dyn Summarizer>,
        store: TranscriptStore,
        directory: Arc<UserDirectory>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            registry,
            voice,
            messenger,
            transcriber,
            summarizer,
            store,
            directory,
            notifier,
        }
    }

    /// Assemble the production pipeline from configuration: hosted OpenAI
    /// clients, SMTP notifier, and the on-disk directory and stores. The
    /// platform adapter supplies the two gateway collaborators.
    pub fn from_config(
        config: &Config,
        voice: Arc<dyn VoiceLink>,
        messenger: Arc<dyn Messenger>,
    ) -> Result<Self> {
        Ok(Self::new(
            SessionRegistry::new(config.recordings_dir()?),
            voice,
            messenger,
            Box::new(OpenAiTranscriber::new(&config.openai)?),
            Box::new(OpenAiSummarizer::new(&config.openai)?),
            TranscriptStore::new(config.transcripts_dir()?),
            Arc::new(UserDirectory::open()?),
            Box::new(SmtpNotifier::new(config.smtp.clone())),
        ))
    }

    /// Begin recording the guild's voice channel.
    ///
    /// Requires an established voice connection and no session already in the
    /// registry for this guild.
    pub async fn start_recording(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<RecordingSession, PipelineError> {
        if !self.voice.is_connected(guild).await {
            return Err(PipelineError::NotConnected);
        }

        let session = self
            .registry
            .start(guild, channel)
            .await
            .map_err(|_| PipelineError::AlreadyRecording)?;

        if let Err(e) = self.voice.start_capture(guild).await {
            // Roll the session back so a later start can succeed.
            self.registry.stop(guild).await.ok();
            return Err(PipelineError::Capture(e.to_string()));
        }

        info!(
            "Recording started for guild {} in channel {}: {:?}",
            guild, channel, session.audio_path
        );
        Ok(session)
    }

    /// Stop the guild's recording and run the finalize sequence.
    ///
    /// Each step short-circuits the remainder on failure; failures are
    /// reported to the originating channel, never retried.
    pub async fn stop_recording(&self, guild: GuildId) -> Result<(), PipelineError> {
        let session = self.registry.stop(guild).await.map_err(|e| match e {
            SessionError::NotActive(_) => PipelineError::NotRecording,
            SessionError::AlreadyActive(_) => PipelineError::AlreadyRecording,
        })?;

        self.post(session.channel, "Stopped recording! Processing audio...")
            .await;

        self.finalize(session).await
    }

    /// Whether a recording is currently active for the guild.
    pub async fn is_recording(&self, guild: GuildId) -> bool {
        self.registry.is_active(guild).await
    }

    /// Summarize arbitrary text, outside the recording flow.
    pub async fn summarize_text(&self, text: &str) -> Result<String, PipelineError> {
        self.summarizer
            .summarize(text)
            .await
            .map_err(|e| PipelineError::Summarization(e.to_string()))
    }

    async fn finalize(&self, session: RecordingSession) -> Result<(), PipelineError> {
        let channel = session.channel;

        // Flush captured audio to the session's file path
        let sink = match self.voice.stop_capture(session.guild).await {
            Ok(sink) => sink,
            Err(e) => {
                error!("Failed to stop capture for guild {}: {}", session.guild, e);
                self.post(channel, &format!("Error processing recording: {e}"))
                    .await;
                return Err(PipelineError::Capture(e.to_string()));
            }
        };

        if let Err(e) = sink.flush(&session.audio_path) {
            error!("Failed to flush recording: {e:#}");
            self.post(channel, &format!("Error processing recording: {e}"))
                .await;
            return Err(PipelineError::Storage(e.to_string()));
        }

        // Transcribe
        let transcript = match self.transcriber.transcribe(&session.audio_path).await {
            Ok(text) => text,
            Err(e) => {
                error!("Transcription failed for guild {}: {e:#}", session.guild);
                self.post(channel, "Failed to transcribe audio").await;
                return Err(PipelineError::Transcription(e.to_string()));
            }
        };

        // Persist transcript
        let transcript_path = match self.store.save(session.guild, &transcript) {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to save transcript: {e:#}");
                self.post(channel, &format!("Error processing recording: {e}"))
                    .await;
                return Err(PipelineError::Storage(e.to_string()));
            }
        };

        // Summarize; the transcript stays on disk either way
        let summary = match self.summarizer.summarize(&transcript).await {
            Ok(text) => text,
            Err(e) => {
                error!("Summarization failed for guild {}: {e:#}", session.guild);
                self.post(channel, "Failed to generate summary").await;
                return Err(PipelineError::Summarization(e.to_string()));
            }
        };

        info!(
            "Recording for guild {} finalized: transcript {:?}, summary {} chars",
            session.guild,
            transcript_path,
            summary.len()
        );

        // Post to the originating channel
        self.post(channel, &format!("**Summary:**\n{summary}")).await;

        self.fan_out(channel, &summary, &transcript_path).await;

        Ok(())
    }

    /// Deliver the summary to every human member of the channel, by direct
    /// message and, for registered members, by email. One member's failure
    /// never blocks the others.
    async fn fan_out(
        &self,
        channel: ChannelId,
        summary: &str,
        transcript_path: &std::path::Path,
    ) {
        let channel_name = match self.messenger.channel_name(channel).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Could not resolve channel name: {}", e);
                "voice channel".to_string()
            }
        };

        let members = match self.messenger.channel_members(channel).await {
            Ok(members) => members,
            Err(e) => {
                warn!("Could not list channel members, skipping fan-out: {}", e);
                return;
            }
        };

        for member in members.iter().filter(|m| !m.is_bot) {
            let dm = format!("**Summary of {channel_name}:**\n{summary}");
            if let Err(e) = self.messenger.direct_message(member.id, &dm).await {
                warn!("Could not send DM to {}: {}", member.name, e);
            }

            match self.directory.lookup_email(&member.id.to_string()) {
                Ok(Some(email)) => {
                    let subject = format!("Summary of {channel_name}");
                    let body = format_summary_email(summary, transcript_path);
                    if let Err(e) = self.notifier.send(&email, &subject, &body).await {
                        warn!("Could not email {}: {}", member.name, e);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Email lookup failed for {}: {}", member.name, e);
                }
            }
        }
    }

    // Channel reports are best-effort; a delivery failure must not abort the
    // pipeline step that produced the report.
    async fn post(&self, channel: ChannelId, text: &str) {
        if let Err(e) = self.messenger.post_message(channel, text).await {
            warn!("Could not post to channel {}: {}", channel, e);
        }
    }
}
