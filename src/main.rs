use anyhow::Result;
use clap::Parser;
use recapbot::cli::{
    handle_summarize_command, handle_test_email_command, handle_transcribe_command,
    handle_users_command, Cli, CliCommand,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        CliCommand::Users(args) => handle_users_command(args),
        CliCommand::Transcribe(args) => handle_transcribe_command(args).await,
        CliCommand::Summarize(args) => handle_summarize_command(args).await,
        CliCommand::TestEmail(args) => handle_test_email_command(args).await,
        CliCommand::Version => {
            println!("recapbot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
