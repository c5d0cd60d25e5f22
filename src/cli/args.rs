use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recapbot")]
#[command(about = "Voice recording bot with AI summaries", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Inspect or edit the user directory
    Users(UsersCliArgs),
    /// Transcribe an audio file through the configured provider
    Transcribe(TranscribeCliArgs),
    /// Summarize a text file through the configured model
    Summarize(SummarizeCliArgs),
    /// Send a test email through the configured SMTP transport
    TestEmail(TestEmailCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct UsersCliArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Register a user's email for summary delivery
    Register {
        /// Platform user id
        user_id: String,
        /// Email address to deliver summaries to
        email: String,
        /// Display name
        name: String,
    },
    /// List all registered users
    List,
}

#[derive(ClapArgs, Debug)]
pub struct TranscribeCliArgs {
    /// Audio file to transcribe
    pub file: PathBuf,
    /// Write the transcript to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct SummarizeCliArgs {
    /// Text file to summarize
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct TestEmailCliArgs {
    /// Recipient address
    pub to: String,
}
