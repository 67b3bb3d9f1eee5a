//! Job application command handlers.

use std::sync::Arc;

use atelier_core::{ApplicationStatus, ApplicationType, Atelier, CrudController, EntityId, JobApplication};
use tabled::Tabled;
use tracing::debug;

use crate::cli::{ApplicationsArgs, ApplicationsCommand, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<JobApplication>> for ApplicationRow {
    fn from(a: &Arc<JobApplication>) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.full_name(),
            position: a.job_title.clone().unwrap_or_else(|| format!("job {}", a.job)),
            kind: a.application_type.to_string(),
            email: a.email.clone(),
            status: a.status.to_string(),
        }
    }
}

fn tone(status: ApplicationStatus) -> Tone {
    match status {
        ApplicationStatus::Pending => Tone::Waiting,
        ApplicationStatus::Reviewed => Tone::Muted,
        ApplicationStatus::Shortlisted => Tone::Good,
        ApplicationStatus::Rejected => Tone::Bad,
    }
}

fn detail(a: &JobApplication, color: bool) -> String {
    let mut lines = vec![
        format!("ID:          {}", a.id),
        format!(
            "Position:    {}",
            a.job_title.clone().unwrap_or_else(|| format!("job {}", a.job))
        ),
        format!("Type:        {}", a.application_type),
        format!("Name:        {}", a.full_name()),
        format!("Email:       {}", a.email),
        format!("Phone:       {}", a.phone),
    ];
    if a.application_type == ApplicationType::Referral {
        let friend = format!(
            "{} {}",
            a.friend_first_name.as_deref().unwrap_or_default(),
            a.friend_last_name.as_deref().unwrap_or_default()
        );
        lines.push(format!("Referred:    {}", friend.trim()));
        lines.push(format!(
            "  Email:     {}",
            a.friend_email.as_deref().unwrap_or("-")
        ));
        lines.push(format!(
            "  Phone:     {}",
            a.friend_phone.as_deref().unwrap_or("-")
        ));
    }
    lines.push(format!("Resume:      {}", a.resume_url.as_deref().unwrap_or("-")));
    lines.push(format!(
        "Received:    {}",
        a.created_at
            .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
    ));
    lines.push(format!(
        "Status:      {}",
        output::paint(a.status, tone(a.status), color)
    ));
    if let Some(ref letter) = a.cover_letter {
        lines.push(String::new());
        lines.push(letter.clone());
    }
    lines.join("\n")
}

/// Shared by `applications list` and `jobs applications`.
pub(super) async fn print_list(
    controller: &CrudController<JobApplication>,
    list: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let view = util::filtered_list(controller, list).await?;
    let out = output::render_list(
        &global.output,
        &view,
        |a| ApplicationRow::from(a),
        |a| a.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    atelier: &Atelier,
    args: ApplicationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let applications = atelier.applications();
    let color = output::should_color(&global.color);

    match args.command {
        ApplicationsCommand::List { job: Some(job), list } => {
            print_list(&atelier.applications_for(EntityId::new(job)), &list, global).await
        }

        ApplicationsCommand::List { job: None, list } => {
            print_list(applications, &list, global).await
        }

        ApplicationsCommand::Get { id } => {
            // The list row is the fallback when the detail endpoint fails.
            if let Err(err) = applications.load().await {
                debug!(error = %err, "application list unavailable");
            }
            let application = applications.view(EntityId::new(id)).await?;
            let out = output::render_single(
                &global.output,
                &application,
                |a| detail(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApplicationsCommand::Status { id, status } => {
            let status: ApplicationStatus = util::parse_value("status", &status)?;
            let saved = applications.set_status(EntityId::new(id), status).await?;
            output::notice(
                format!(
                    "Application {} marked {}",
                    saved.id,
                    output::paint(saved.status, tone(saved.status), color)
                ),
                global.quiet,
            );
            Ok(())
        }

        ApplicationsCommand::Delete { id } => {
            util::delete(applications, EntityId::new(id), global).await
        }
    }
}
