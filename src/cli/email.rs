use anyhow::Result;

use crate::config::Config;
use crate::notifier::{Notifier, SmtpNotifier};

use super::args::TestEmailCliArgs;

pub async fn handle_test_email_command(args: TestEmailCliArgs) -> Result<()> {
    let config = Config::load()?;
    let notifier = SmtpNotifier::new(config.smtp);

    notifier
        .send(
            &args.to,
            "Recapbot test email",
            "If you can read this, summary delivery is configured correctly.\n",
        )
        .await?;

    println!("Test email sent to {}", args.to);
    Ok(())
}
