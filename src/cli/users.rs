use anyhow::Result;

use crate::db::UserDirectory;

use super::args::{UsersCliArgs, UsersCommand};

pub fn handle_users_command(args: UsersCliArgs) -> Result<()> {
    let directory = UserDirectory::open()?;

    match args.command {
        UsersCommand::Register {
            user_id,
            email,
            name,
        } => match directory.register(&user_id, &email, &name) {
            Ok(()) => {
                println!("Registered {user_id} <{email}>");
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        UsersCommand::List => {
            let users = directory.list()?;

            if users.is_empty() {
                println!("No registered users.");
                return Ok(());
            }

            println!("{} registered user(s):\n", users.len());
            for user in users {
                println!("{}  {}  {}", user.user_id, user.email, user.name);
            }

            Ok(())
        }
    }
}
