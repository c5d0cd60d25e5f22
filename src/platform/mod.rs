//! Chat platform collaborator traits.
//!
//! The gateway adapter (websocket event loop, voice transport) lives outside
//! this crate; it implements these traits and drives the command dispatcher.
//! Forbidden/NotFound failures are non-fatal for the step that hit them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::recording::WavSink;

macro_rules! platform_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

platform_id!(GuildId);
platform_id!(ChannelId);
platform_id!(UserId);
platform_id!(MessageId);

/// A member of a channel, as reported by the platform.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: UserId,
    pub name: String,
    pub is_bot: bool,
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

/// Text-side platform operations.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn post_message(&self, channel: ChannelId, text: &str) -> Result<(), PlatformError>;

    async fn direct_message(&self, user: UserId, text: &str) -> Result<(), PlatformError>;

    async fn channel_members(&self, channel: ChannelId) -> Result<Vec<Member>, PlatformError>;

    async fn channel_name(&self, channel: ChannelId) -> Result<String, PlatformError>;

    /// Fetch the text content of a message by id.
    async fn fetch_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<String, PlatformError>;
}

/// Voice-side platform operations.
///
/// Capture runs entirely inside the adapter; `stop_capture` hands back the
/// sink holding everything recorded since `start_capture`.
#[async_trait]
pub trait VoiceLink: Send + Sync {
    async fn join(&self, guild: GuildId, channel: ChannelId) -> Result<(), PlatformError>;

    async fn leave(&self, guild: GuildId) -> Result<(), PlatformError>;

    async fn is_connected(&self, guild: GuildId) -> bool;

    async fn start_capture(&self, guild: GuildId) -> Result<(), PlatformError>;

    async fn stop_capture(&self, guild: GuildId) -> Result<WavSink, PlatformError>;
}
