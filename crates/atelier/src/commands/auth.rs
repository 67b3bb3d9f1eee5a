//! Session commands: login, register, logout, whoami, refresh.

use atelier_core::{Atelier, User};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::{self, Tone};

fn detail(user: &User, color: bool) -> String {
    let role = if user.is_admin {
        output::paint("administrator", Tone::Good, color)
    } else {
        output::paint("member", Tone::Muted, color)
    };
    [
        format!("ID:        {}", user.id),
        format!("Email:     {}", user.email),
        format!("Username:  {}", user.username),
        format!("Role:      {role}"),
    ]
    .join("\n")
}

pub async fn handle(
    atelier: &Atelier,
    args: AuthArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let session = atelier.session();
    let color = output::should_color(&global.color);

    match args.command {
        AuthCommand::Login { email } => {
            let email = config::login_email(email, global, cfg)?;
            let password = config::login_password(global, cfg)?;
            let user = session.login(&email, &password).await?;
            output::notice(format!("Logged in as {}", user.email), global.quiet);
            if !user.is_admin {
                output::notice(
                    "This account is not an administrator; admin commands will be refused.",
                    global.quiet,
                );
            }
            Ok(())
        }

        AuthCommand::Register { email, username } => {
            let password = config::login_password(global, cfg)?;
            let user = session.register(&email, &password, &username).await?;
            output::notice(format!("Registered and logged in as {}", user.email), global.quiet);
            Ok(())
        }

        AuthCommand::Logout => {
            if !session.is_logged_in() {
                output::notice("Not logged in", global.quiet);
                return Ok(());
            }
            session.logout().await;
            output::notice("Logged out", global.quiet);
            Ok(())
        }

        AuthCommand::Whoami => {
            let user = session.current_user().ok_or(CliError::NotLoggedIn)?;
            let out = output::render_single(
                &global.output,
                &*user,
                |u| detail(u, color),
                |u| u.email.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthCommand::Refresh => {
            session.refresh().await?;
            output::notice("Session refreshed", global.quiet);
            Ok(())
        }
    }
}
