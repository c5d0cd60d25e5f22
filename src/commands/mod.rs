//! Prefix command surface.
//!
//! Translates platform chat messages into pipeline and directory calls. The
//! gateway adapter feeds every incoming message through `CommandHandler`;
//! non-command messages fall straight through.

use std::sync::Arc;
use tracing::error;

use crate::db::{DirectoryError, UserDirectory};
use crate::pipeline::{PipelineError, RecordingPipeline};
use crate::platform::{ChannelId, GuildId, MessageId, Messenger, PlatformError, UserId, VoiceLink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { email: Option<String> },
    Join,
    Leave,
    Record,
    Stop,
    Summarize { message_id: Option<MessageId> },
}

/// Parse a chat message into a command. Returns `None` for messages without
/// the prefix and for unknown command words.
pub fn parse_command(prefix: &str, content: &str) -> Option<Command> {
    let stripped = content.strip_prefix(prefix)?;
    let mut words = stripped.split_whitespace();

    let command = match words.next()? {
        "register" => Command::Register {
            email: words.next().map(str::to_string),
        },
        "join" => Command::Join,
        "leave" => Command::Leave,
        "record" => Command::Record,
        "stop" => Command::Stop,
        "summarize" => Command::Summarize {
            message_id: words.next().and_then(|w| w.parse().ok()).map(MessageId),
        },
        _ => return None,
    };

    Some(command)
}

/// Context of the message that carried a command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub guild: GuildId,
    pub channel: ChannelId,
    pub author: UserId,
    pub author_name: String,
    /// Voice channel the author is currently in, if any.
    pub author_voice_channel: Option<ChannelId>,
}

pub struct CommandHandler {
    pipeline: Arc<RecordingPipeline>,
    directory: Arc<UserDirectory>,
    messenger: Arc<dyn Messenger>,
    voice: Arc<dyn VoiceLink>,
    prefix: String,
}

impl CommandHandler {
    pub fn new(
        pipeline: Arc<RecordingPipeline>,
        directory: Arc<UserDirectory>,
        messenger: Arc<dyn Messenger>,
        voice: Arc<dyn VoiceLink>,
        prefix: String,
    ) -> Self {
        Self {
            pipeline,
            directory,
            messenger,
            voice,
            prefix,
        }
    }

    /// Handle one incoming message. Returns true when the message was a
    /// command, whether or not it succeeded.
    pub async fn handle(&self, ctx: &CommandContext, content: &str) -> bool {
        let Some(command) = parse_command(&self.prefix, content) else {
            return false;
        };

        match command {
            Command::Register { email } => self.register(ctx, email).await,
            Command::Join => self.join(ctx).await,
            Command::Leave => self.leave(ctx).await,
            Command::Record => self.record(ctx).await,
            Command::Stop => self.stop(ctx).await,
            Command::Summarize { message_id } => self.summarize(ctx, message_id).await,
        }

        true
    }

    async fn register(&self, ctx: &CommandContext, email: Option<String>) {
        let Some(email) = email else {
            self.reply(ctx, &format!("Usage: {}register <email>", self.prefix))
                .await;
            return;
        };

        match self
            .directory
            .register(&ctx.author.to_string(), &email, &ctx.author_name)
        {
            Ok(()) => {
                self.reply(
                    ctx,
                    "Registration successful! You'll receive summaries via email.",
                )
                .await;
            }
            Err(DirectoryError::DuplicateUserId(_)) | Err(DirectoryError::DuplicateEmail(_)) => {
                self.reply(ctx, "You're already registered or the email is in use.")
                    .await;
            }
            Err(e) => {
                error!("Registration failed for {}: {}", ctx.author, e);
                self.reply(ctx, &format!("Registration failed: {e}")).await;
            }
        }
    }

    async fn join(&self, ctx: &CommandContext) {
        let Some(voice_channel) = ctx.author_voice_channel else {
            self.reply(ctx, "You need to be in a voice channel!").await;
            return;
        };

        match self.voice.join(ctx.guild, voice_channel).await {
            Ok(()) => {
                let name = self
                    .messenger
                    .channel_name(voice_channel)
                    .await
                    .unwrap_or_else(|_| "voice channel".to_string());
                self.reply(ctx, &format!("Joined {name}")).await;
            }
            Err(e) => {
                self.reply(ctx, &format!("Could not join voice channel: {e}"))
                    .await;
            }
        }
    }

    async fn leave(&self, ctx: &CommandContext) {
        if !self.voice.is_connected(ctx.guild).await {
            self.reply(ctx, "I'm not in a voice channel!").await;
            return;
        }

        match self.voice.leave(ctx.guild).await {
            Ok(()) => self.reply(ctx, "Left the voice channel").await,
            Err(e) => {
                self.reply(ctx, &format!("Could not leave voice channel: {e}"))
                    .await;
            }
        }
    }

    async fn record(&self, ctx: &CommandContext) {
        match self.pipeline.start_recording(ctx.guild, ctx.channel).await {
            Ok(_) => self.reply(ctx, "Started recording!").await,
            Err(PipelineError::NotConnected) => {
                self.reply(
                    ctx,
                    &format!(
                        "I need to be in a voice channel first! Use {}join",
                        self.prefix
                    ),
                )
                .await;
            }
            Err(PipelineError::AlreadyRecording) => {
                self.reply(ctx, "Already recording in this server!").await;
            }
            Err(e) => {
                self.reply(ctx, &format!("Could not start recording: {e}"))
                    .await;
            }
        }
    }

    async fn stop(&self, ctx: &CommandContext) {
        match self.pipeline.stop_recording(ctx.guild).await {
            // The pipeline posts its own progress and summary messages.
            Ok(()) => {}
            Err(PipelineError::NotRecording) => {
                self.reply(ctx, "No active recording in this server!").await;
            }
            // Finalize failures were already reported to the channel.
            Err(e) => error!("Recording pipeline failed for {}: {}", ctx.guild, e),
        }
    }

    async fn summarize(&self, ctx: &CommandContext, message_id: Option<MessageId>) {
        let Some(message_id) = message_id else {
            self.reply(ctx, "Please specify a message ID to summarize")
                .await;
            return;
        };

        let content = match self.messenger.fetch_message(ctx.channel, message_id).await {
            Ok(content) => content,
            Err(PlatformError::NotFound(_)) => {
                self.reply(ctx, "Message not found!").await;
                return;
            }
            Err(e) => {
                self.reply(ctx, &format!("Could not fetch message: {e}"))
                    .await;
                return;
            }
        };

        match self.pipeline.summarize_text(&content).await {
            Ok(summary) => {
                self.reply(ctx, &format!("**Summary:**\n{summary}")).await;
            }
            Err(e) => {
                error!("Message summarization failed: {}", e);
                self.reply(ctx, "Failed to generate summary").await;
            }
        }
    }

    async fn reply(&self, ctx: &CommandContext, text: &str) {
        if let Err(e) = self.messenger.post_message(ctx.channel, text).await {
            error!("Could not reply in channel {}: {}", ctx.channel, e);
        }
    }
}
