//! Recording session registry.
//!
//! Process-wide map of at most one in-progress recording per guild. Nothing
//! here is persisted; a restart forgets every live session.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::platform::{ChannelId, GuildId};

/// In-memory record of an in-progress recording.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    pub guild: GuildId,
    pub channel: ChannelId,
    pub audio_path: PathBuf,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a recording is already active for guild {0}")]
    AlreadyActive(GuildId),
    #[error("no active recording for guild {0}")]
    NotActive(GuildId),
}

pub struct SessionRegistry {
    recordings_dir: PathBuf,
    sessions: Mutex<HashMap<GuildId, RecordingSession>>,
}

impl SessionRegistry {
    pub fn new(recordings_dir: PathBuf) -> Self {
        Self {
            recordings_dir,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create and store a session for the guild, with a generated output path.
    /// Fails if one already exists.
    pub async fn start(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<RecordingSession, SessionError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&guild) {
            return Err(SessionError::AlreadyActive(guild));
        }

        let started_at = Utc::now();
        let filename = format!("{}_{}.wav", guild, started_at.format("%Y%m%d_%H%M%S"));
        let session = RecordingSession {
            guild,
            channel,
            audio_path: self.recordings_dir.join(filename),
            started_at,
        };

        sessions.insert(guild, session.clone());
        Ok(session)
    }

    /// Remove and return the guild's session. Fails if none exists.
    pub async fn stop(&self, guild: GuildId) -> Result<RecordingSession, SessionError> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(&guild)
            .ok_or(SessionError::NotActive(guild))
    }

    pub async fn is_active(&self, guild: GuildId) -> bool {
        self.sessions.lock().await.contains_key(&guild)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(PathBuf::from("/tmp/recapbot-test/recordings"))
    }

    #[tokio::test]
    async fn test_start_creates_session() {
        let registry = registry();
        let session = registry.start(GuildId(1), ChannelId(10)).await.unwrap();

        assert_eq!(session.guild, GuildId(1));
        assert_eq!(session.channel, ChannelId(10));
        let name = session.audio_path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("1_"));
        assert!(name.ends_with(".wav"));
        assert!(registry.is_active(GuildId(1)).await);
    }

    #[tokio::test]
    async fn test_double_start_rejected() {
        let registry = registry();
        registry.start(GuildId(1), ChannelId(10)).await.unwrap();

        let err = registry.start(GuildId(1), ChannelId(11)).await.unwrap_err();
        assert!(matches!(err, SessionError::AlreadyActive(GuildId(1))));
    }

    #[tokio::test]
    async fn test_stop_returns_session() {
        let registry = registry();
        let started = registry.start(GuildId(1), ChannelId(10)).await.unwrap();

        let stopped = registry.stop(GuildId(1)).await.unwrap();
        assert_eq!(stopped.audio_path, started.audio_path);
        assert!(!registry.is_active(GuildId(1)).await);
    }

    #[tokio::test]
    async fn test_stop_without_start_rejected() {
        let registry = registry();
        let err = registry.stop(GuildId(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::NotActive(GuildId(1))));
    }

    #[tokio::test]
    async fn test_guilds_are_independent() {
        let registry = registry();
        registry.start(GuildId(1), ChannelId(10)).await.unwrap();
        registry.start(GuildId(2), ChannelId(20)).await.unwrap();

        registry.stop(GuildId(1)).await.unwrap();
        assert!(registry.is_active(GuildId(2)).await);
    }

    #[tokio::test]
    async fn test_restart_after_stop() {
        let registry = registry();
        registry.start(GuildId(1), ChannelId(10)).await.unwrap();
        registry.stop(GuildId(1)).await.unwrap();
        registry.start(GuildId(1), ChannelId(10)).await.unwrap();
    }
}
