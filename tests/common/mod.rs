//! Shared mock collaborators for the integration suites.

#![allow(dead_code)]

use async_trait::async_trait;
use recapbot::db::UserDirectory;
use recapbot::notifier::{DeliveryError, Notifier};
use recapbot::pipeline::RecordingPipeline;
use recapbot::platform::{
    ChannelId, GuildId, Member, MessageId, Messenger, PlatformError, UserId, VoiceLink,
};
use recapbot::recording::WavSink;
use recapbot::session::SessionRegistry;
use recapbot::summarizer::Summarizer;
use recapbot::transcript::TranscriptStore;
use recapbot::transcription::Transcriber;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockMessenger {
    channel_name: String,
    members: Vec<Member>,
    failing_dms: Vec<UserId>,
    known_messages: HashMap<MessageId, String>,
    pub posts: Arc<Mutex<Vec<(ChannelId, String)>>>,
    pub dms: Arc<Mutex<Vec<(UserId, String)>>>,
}

impl MockMessenger {
    pub fn new(channel_name: &str) -> Self {
        Self {
            channel_name: channel_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_member(mut self, id: u64, name: &str, is_bot: bool) -> Self {
        self.members.push(Member {
            id: UserId(id),
            name: name.to_string(),
            is_bot,
        });
        self
    }

    /// Direct messages to this user will fail with Forbidden.
    pub fn with_failing_dm(mut self, id: u64) -> Self {
        self.failing_dms.push(UserId(id));
        self
    }

    pub fn with_message(mut self, id: u64, content: &str) -> Self {
        self.known_messages
            .insert(MessageId(id), content.to_string());
        self
    }

    pub fn posted_texts(&self) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn dm_recipients(&self) -> Vec<UserId> {
        self.dms.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn post_message(&self, channel: ChannelId, text: &str) -> Result<(), PlatformError> {
        self.posts
            .lock()
            .unwrap()
            .push((channel, text.to_string()));
        Ok(())
    }

    async fn direct_message(&self, user: UserId, text: &str) -> Result<(), PlatformError> {
        if self.failing_dms.contains(&user) {
            return Err(PlatformError::Forbidden(format!(
                "user {user} has direct messages disabled"
            )));
        }
        self.dms.lock().unwrap().push((user, text.to_string()));
        Ok(())
    }

    async fn channel_members(&self, _channel: ChannelId) -> Result<Vec<Member>, PlatformError> {
        Ok(self.members.clone())
    }

    async fn channel_name(&self, _channel: ChannelId) -> Result<String, PlatformError> {
        Ok(self.channel_name.clone())
    }

    async fn fetch_message(
        &self,
        _channel: ChannelId,
        message: MessageId,
    ) -> Result<String, PlatformError> {
        self.known_messages
            .get(&message)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("message {message}")))
    }
}

#[derive(Clone, Default)]
pub struct MockVoice {
    connected: Arc<Mutex<HashSet<GuildId>>>,
    capturing: Arc<Mutex<HashSet<GuildId>>>,
    fail_stop_capture: bool,
}

impl MockVoice {
    pub fn connected_to(guild: GuildId) -> Self {
        let voice = Self::default();
        voice.connected.lock().unwrap().insert(guild);
        voice
    }

    pub fn failing_stop_capture(mut self) -> Self {
        self.fail_stop_capture = true;
        self
    }

    pub fn is_capturing(&self, guild: GuildId) -> bool {
        self.capturing.lock().unwrap().contains(&guild)
    }
}

#[async_trait]
impl VoiceLink for MockVoice {
    async fn join(&self, guild: GuildId, _channel: ChannelId) -> Result<(), PlatformError> {
        self.connected.lock().unwrap().insert(guild);
        Ok(())
    }

    async fn leave(&self, guild: GuildId) -> Result<(), PlatformError> {
        self.connected.lock().unwrap().remove(&guild);
        Ok(())
    }

    async fn is_connected(&self, guild: GuildId) -> bool {
        self.connected.lock().unwrap().contains(&guild)
    }

    async fn start_capture(&self, guild: GuildId) -> Result<(), PlatformError> {
        self.capturing.lock().unwrap().insert(guild);
        Ok(())
    }

    async fn stop_capture(&self, guild: GuildId) -> Result<WavSink, PlatformError> {
        if self.fail_stop_capture {
            return Err(PlatformError::Other("capture backend gone".to_string()));
        }
        self.capturing.lock().unwrap().remove(&guild);

        let mut sink = WavSink::new(16_000);
        sink.push(&[0i16; 1600]);
        Ok(sink)
    }
}

#[derive(Clone)]
pub struct MockTranscriber {
    result: Option<String>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockTranscriber {
    pub fn returning(text: &str) -> Self {
        Self {
            result: Some(text.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &'static str {
        "mock transcriber"
    }

    async fn transcribe(&self, audio_path: &Path) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(audio_path.to_path_buf());
        match &self.result {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("transcription backend unavailable"),
        }
    }
}

#[derive(Clone)]
pub struct MockSummarizer {
    result: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockSummarizer {
    pub fn returning(text: &str) -> Self {
        Self {
            result: Some(text.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    fn name(&self) -> &'static str {
        "mock summarizer"
    }

    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(text.to_string());
        match &self.result {
            Some(summary) => Ok(summary.clone()),
            None => anyhow::bail!("summarization backend unavailable"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    fail: bool,
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::default(),
        }
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Rejected("mailbox unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Assemble a pipeline over the given mocks, storing files under `root`.
pub fn build_pipeline(
    root: &Path,
    messenger: &MockMessenger,
    voice: &MockVoice,
    transcriber: &MockTranscriber,
    summarizer: &MockSummarizer,
    notifier: &MockNotifier,
    directory: Arc<UserDirectory>,
) -> RecordingPipeline {
    RecordingPipeline::new(
        SessionRegistry::new(root.join("recordings")),
        Arc::new(voice.clone()),
        Arc::new(messenger.clone()),
        Box::new(transcriber.clone()),
        Box::new(summarizer.clone()),
        TranscriptStore::new(root.join("transcripts")),
        directory,
        Box::new(notifier.clone()),
    )
}
