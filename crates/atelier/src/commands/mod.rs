//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod applications;
pub mod auth;
pub mod blogs;
pub mod config_cmd;
pub mod dashboard;
pub mod enquiries;
pub mod jobs;
pub mod reviews;
pub mod services;
pub mod site;
pub mod util;

use atelier_core::Atelier;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
///
/// Everything except `auth` and `site` is an admin screen and checks the
/// saved session before making a request.
pub async fn dispatch(
    cmd: Command,
    atelier: &Atelier,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(atelier, args, global, cfg).await,
        Command::Site(args) => site::handle(atelier, args, global).await,
        admin => {
            atelier.session().require_admin()?;
            match admin {
                Command::Dashboard => dashboard::handle(atelier, global).await,
                Command::Blogs(args) => blogs::handle(atelier, args, global).await,
                Command::Services(args) => services::handle(atelier, args, global).await,
                Command::Enquiries(args) => enquiries::handle(atelier, args, global).await,
                Command::Reviews(args) => reviews::handle(atelier, args, global).await,
                Command::Jobs(args) => jobs::handle(atelier, args, global).await,
                Command::Applications(args) => applications::handle(atelier, args, global).await,
                // Handled above or before dispatch
                Command::Auth(_) | Command::Site(_) | Command::Config(_) | Command::Completions(_) => {
                    Err(CliError::OperationFailed {
                        message: "command is not backend-bound".into(),
                    })
                }
            }
        }
    }
}
