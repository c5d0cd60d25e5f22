//! Transcript persistence.
//!
//! Transcripts are plain-text files named by guild id and timestamp. They are
//! written once and never modified or deleted by the bot.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

use crate::platform::GuildId;

pub struct TranscriptStore {
    transcripts_dir: PathBuf,
}

impl TranscriptStore {
    pub fn new(transcripts_dir: PathBuf) -> Self {
        Self { transcripts_dir }
    }

    /// Write transcript text and return its path.
    pub fn save(&self, guild: GuildId, text: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.transcripts_dir)
            .context("Failed to create transcripts directory")?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = self.unique_path(&format!("{guild}_{timestamp}"));

        std::fs::write(&path, text).context("Failed to write transcript file")?;

        info!("Transcript saved: {:?} ({} chars)", path, text.len());
        Ok(path)
    }

    // Two recordings finishing within the same second must not overwrite each
    // other, so a counter is appended on collision.
    fn unique_path(&self, stem: &str) -> PathBuf {
        let path = self.transcripts_dir.join(format!("{stem}.txt"));
        if !path.exists() {
            return path;
        }

        for i in 2..100 {
            let alt_path = self.transcripts_dir.join(format!("{stem}_{i}.txt"));
            if !alt_path.exists() {
                return alt_path;
            }
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().to_path_buf());

        let path = store.save(GuildId(1), "hello world").unwrap();

        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("1_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello world");
    }

    #[test]
    fn test_same_second_saves_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().to_path_buf());

        let first = store.save(GuildId(1), "first").unwrap();
        let second = store.save(GuildId(1), "second").unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "second");
    }

    #[test]
    fn test_guilds_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().to_path_buf());

        let a = store.save(GuildId(1), "a").unwrap();
        let b = store.save(GuildId(2), "b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("transcripts");
        let store = TranscriptStore::new(nested.clone());

        store.save(GuildId(1), "text").unwrap();
        assert!(nested.exists());
    }
}
