//! Core of a voice-channel recording bot: per-guild recording sessions, a
//! transcription → summarization pipeline, and summary fan-out over direct
//! messages and email.
//!
//! The chat platform gateway is not part of this crate. An adapter implements
//! [`platform::Messenger`] and [`platform::VoiceLink`], builds a
//! [`pipeline::RecordingPipeline`], and routes incoming messages through
//! [`commands::CommandHandler`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod global;
pub mod notifier;
pub mod pipeline;
pub mod platform;
pub mod recording;
pub mod session;
pub mod summarizer;
pub mod transcript;
pub mod transcription;

pub use commands::{CommandContext, CommandHandler};
pub use pipeline::{PipelineError, RecordingPipeline};
