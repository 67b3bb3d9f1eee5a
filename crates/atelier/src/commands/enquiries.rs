//! Enquiry command handlers.

use std::sync::Arc;

use atelier_core::{Atelier, EntityId, Enquiry, EnquiryStatus};
use tabled::Tabled;

use crate::cli::{EnquiriesArgs, EnquiriesCommand, EnquiryFields, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
struct EnquiryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Enquiry>> for EnquiryRow {
    fn from(e: &Arc<Enquiry>) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name.clone(),
            email: e.email.clone(),
            service: e.service.clone(),
            date: e.date.map(|d| d.to_string()).unwrap_or_default(),
            status: e.status.to_string(),
        }
    }
}

fn tone(status: EnquiryStatus) -> Tone {
    match status {
        EnquiryStatus::New => Tone::Waiting,
        EnquiryStatus::Contacted => Tone::Good,
        EnquiryStatus::Closed => Tone::Muted,
    }
}

fn detail(e: &Enquiry, color: bool) -> String {
    [
        format!("ID:        {}", e.id),
        format!("Name:      {}", e.name),
        format!("Email:     {}", e.email),
        format!("Phone:     {}", e.phone),
        format!("Company:   {}", e.company.as_deref().unwrap_or("-")),
        format!("Service:   {}", e.service),
        format!(
            "Date:      {}",
            e.date.map_or_else(|| "-".into(), |d| d.to_string())
        ),
        format!("Status:    {}", output::paint(e.status, tone(e.status), color)),
        String::new(),
        e.message.clone(),
    ]
    .join("\n")
}

fn apply(fields: EnquiryFields) -> Result<impl FnOnce(&mut Enquiry), CliError> {
    let status = fields
        .status
        .as_deref()
        .map(|raw| util::parse_value::<EnquiryStatus>("status", raw))
        .transpose()?;

    Ok(move |e: &mut Enquiry| {
        if let Some(v) = fields.name {
            e.name = v;
        }
        if let Some(v) = fields.email {
            e.email = v;
        }
        if let Some(v) = fields.phone {
            e.phone = v;
        }
        if let Some(v) = fields.company {
            e.company = Some(v);
        }
        if let Some(v) = fields.service {
            e.service = v;
        }
        if let Some(v) = fields.message {
            e.message = v;
        }
        if let Some(v) = status {
            e.status = v;
        }
    })
}

pub async fn handle(
    atelier: &Atelier,
    args: EnquiriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let enquiries = atelier.enquiries();
    let color = output::should_color(&global.color);

    match args.command {
        EnquiriesCommand::List(list) => {
            let view = util::filtered_list(enquiries, &list).await?;
            let out = output::render_list(
                &global.output,
                &view,
                |e| EnquiryRow::from(e),
                |e| e.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnquiriesCommand::Get { id } => {
            util::show(enquiries, EntityId::new(id), global, |e| detail(e, color)).await
        }

        EnquiriesCommand::Create(fields) => {
            let saved = util::save_with(enquiries, None, None, apply(fields)?).await?;
            util::report_saved("created", &saved, global);
            Ok(())
        }

        EnquiriesCommand::Update { id, fields } => {
            let existing = enquiries.store().fetch(EntityId::new(id)).await?;
            let saved = util::save_with(enquiries, Some(&existing), None, apply(fields)?).await?;
            util::report_saved("updated", &saved, global);
            Ok(())
        }

        EnquiriesCommand::Status { id, status } => {
            let status: EnquiryStatus = util::parse_value("status", &status)?;
            let saved = enquiries.set_status(EntityId::new(id), status).await?;
            output::notice(
                format!(
                    "Enquiry {} marked {}",
                    saved.id,
                    output::paint(saved.status, tone(saved.status), color)
                ),
                global.quiet,
            );
            Ok(())
        }

        EnquiriesCommand::Delete { id } => util::delete(enquiries, EntityId::new(id), global).await,
    }
}
