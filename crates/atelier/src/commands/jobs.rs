//! Job opening command handlers.

use std::sync::Arc;

use atelier_core::{Atelier, EntityId, Job, JobStatus, JobType};
use tabled::Tabled;

use crate::cli::{GlobalOpts, JobFields, JobsArgs, JobsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::{applications, util};

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Type")]
    job_type: String,
    #[tabled(rename = "Applications")]
    applications: u32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Job>> for JobRow {
    fn from(j: &Arc<Job>) -> Self {
        Self {
            id: j.id.to_string(),
            title: j.title.clone(),
            department: j.department.clone(),
            location: j.location.clone(),
            job_type: j.job_type.to_string(),
            applications: j.applications,
            status: j.status.to_string(),
        }
    }
}

fn tone(status: JobStatus) -> Tone {
    match status {
        JobStatus::Active => Tone::Good,
        JobStatus::Inactive => Tone::Muted,
    }
}

pub(super) fn detail(j: &Job, color: bool) -> String {
    let mut lines = vec![
        format!("ID:          {}", j.id),
        format!("Title:       {}", j.title),
        format!("Slug:        {}", j.slug),
        format!("Company:     {}", j.company),
        format!("Department:  {}", j.department),
        format!("Location:    {}", j.location),
        format!("Type:        {}", j.job_type),
        format!("Experience:  {}", j.experience),
        format!("Applicants:  {}", j.applications),
        format!("Status:      {}", output::paint(j.status, tone(j.status), color)),
        String::new(),
        j.description.clone(),
    ];
    if !j.requirements.is_empty() {
        lines.push(String::new());
        lines.push("Requirements:".into());
        lines.extend(j.requirements.iter().map(|r| format!("  • {r}")));
    }
    lines.join("\n")
}

fn apply(fields: JobFields) -> Result<impl FnOnce(&mut Job), CliError> {
    let status = fields
        .status
        .as_deref()
        .map(|raw| util::parse_value::<JobStatus>("status", raw))
        .transpose()?;
    let job_type = fields
        .job_type
        .as_deref()
        .map(|raw| util::parse_value::<JobType>("type", raw))
        .transpose()?;

    Ok(move |j: &mut Job| {
        if let Some(v) = fields.title {
            j.title = v;
        }
        if let Some(v) = fields.company {
            j.company = v;
        }
        if let Some(v) = fields.department {
            j.department = v;
        }
        if let Some(v) = fields.location {
            j.location = v;
        }
        if let Some(v) = job_type {
            j.job_type = v;
        }
        if let Some(v) = fields.experience {
            j.experience = v;
        }
        if let Some(v) = fields.description {
            j.description = v;
        }
        if !fields.requirements.is_empty() {
            j.requirements = fields.requirements;
        }
        if let Some(v) = status {
            j.status = v;
        }
    })
}

pub async fn handle(atelier: &Atelier, args: JobsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let jobs = atelier.jobs();
    let color = output::should_color(&global.color);

    match args.command {
        JobsCommand::List(list) => {
            let view = util::filtered_list(jobs, &list).await?;
            let out = output::render_list(
                &global.output,
                &view,
                |j| JobRow::from(j),
                |j| j.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        JobsCommand::Get { id } => {
            util::show(jobs, EntityId::new(id), global, |j| detail(j, color)).await
        }

        JobsCommand::Create(fields) => {
            let saved = util::save_with(jobs, None, None, apply(fields)?).await?;
            util::report_saved("created", &saved, global);
            Ok(())
        }

        JobsCommand::Update { id, fields } => {
            let existing = jobs.store().fetch(EntityId::new(id)).await?;
            let saved = util::save_with(jobs, Some(&existing), None, apply(fields)?).await?;
            util::report_saved("updated", &saved, global);
            Ok(())
        }

        JobsCommand::Delete { id } => util::delete(jobs, EntityId::new(id), global).await,

        JobsCommand::Toggle { id } => {
            let existing = jobs.store().fetch(EntityId::new(id)).await?;
            let saved = jobs.toggle_status(&existing).await?;
            output::notice(
                format!(
                    "Job {} is now {}",
                    saved.id,
                    output::paint(saved.status, tone(saved.status), color)
                ),
                global.quiet,
            );
            Ok(())
        }

        JobsCommand::Applications { id, list } => {
            let scoped = atelier.applications_for(EntityId::new(id));
            applications::print_list(&scoped, &list, global).await
        }
    }
}
