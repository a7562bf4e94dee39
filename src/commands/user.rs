use super::report;
use crate::{
    db::db::Db,
    libs::{
        credentials,
        messages::Message,
        user::{Role, User},
    },
    msg_error, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create an account; the password is prompted twice
    Register {
        username: String,
        email: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long, value_enum, default_value_t = Role::Staff)]
        role: Role,
    },
    /// Check a username or email against a password
    Login { identifier: String },
    /// Set a new password for the account registered under an email
    ResetPassword { email: String },
}

pub fn cmd(db: &Db, args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Register {
            username,
            email,
            full_name,
            role,
        } => {
            let (password, confirm) = prompt_new_password()?;
            if let Err(message) = credentials::check_registration(&username, &email, &password, &confirm) {
                msg_error!(message);
                return Ok(());
            }
            let user = User::new(&username, &email, &credentials::digest(&password), full_name.as_deref(), role);
            report(db.users().add_user(&user));
            Ok(())
        }
        UserCommand::Login { identifier } => {
            let password = Password::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPassword.to_string())
                .allow_empty_password(true)
                .interact()?;
            if let Err(message) = credentials::check_login(&identifier, &password) {
                msg_error!(message);
                return Ok(());
            }
            match db.users().authenticate(&identifier, &credentials::digest(&password))? {
                Some(user) => msg_success!(Message::LoginSucceeded(user.display_name().to_string())),
                None => msg_error!(Message::LoginFailed),
            }
            Ok(())
        }
        UserCommand::ResetPassword { email } => {
            let (password, confirm) = prompt_new_password()?;
            if let Err(message) = credentials::check_reset(&email, &password, &confirm) {
                msg_error!(message);
                return Ok(());
            }
            if db.users().get_user_by_email(&email)?.is_none() {
                msg_error!(Message::EmailNotRegistered);
                return Ok(());
            }
            report(db.users().update_password(&email, &credentials::digest(&password)));
            Ok(())
        }
    }
}

fn prompt_new_password() -> Result<(String, String)> {
    let theme = ColorfulTheme::default();
    let password = Password::with_theme(&theme)
        .with_prompt(Message::PromptPassword.to_string())
        .allow_empty_password(true)
        .interact()?;
    let confirm = Password::with_theme(&theme)
        .with_prompt(Message::PromptConfirmPassword.to_string())
        .allow_empty_password(true)
        .interact()?;
    Ok((password, confirm))
}
