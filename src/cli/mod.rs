pub mod args;
mod email;
mod transcribe;
mod users;

pub use args::{Cli, CliCommand};
pub use email::handle_test_email_command;
pub use transcribe::{handle_summarize_command, handle_transcribe_command};
pub use users::handle_users_command;
