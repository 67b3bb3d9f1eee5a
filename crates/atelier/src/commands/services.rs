//! Service command handlers, including drag-style reordering.

use atelier_core::{Atelier, EntityId, ReorderOutcome, Service, ServiceStatus, SkipReason};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ServiceFields, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Features")]
    features: usize,
    #[tabled(rename = "Status")]
    status: String,
}

fn tone(status: ServiceStatus) -> Tone {
    match status {
        ServiceStatus::Active => Tone::Good,
        ServiceStatus::Inactive => Tone::Muted,
    }
}

fn detail(s: &Service, color: bool) -> String {
    let mut lines = vec![
        format!("ID:          {}", s.id),
        format!("Name:        {}", s.name),
        format!("Price:       {}", if s.price.is_empty() { "-" } else { &s.price }),
        format!("Icon:        {}", s.icon.as_deref().unwrap_or("-")),
        format!("Order:       {}", s.order),
        format!("Status:      {}", output::paint(s.status, tone(s.status), color)),
        String::new(),
        s.description.clone(),
    ];
    if !s.features.is_empty() {
        lines.push(String::new());
        lines.extend(s.features.iter().map(|f| format!("  • {f}")));
    }
    lines.join("\n")
}

fn apply(fields: ServiceFields) -> Result<impl FnOnce(&mut Service), CliError> {
    let status = fields
        .status
        .as_deref()
        .map(|raw| util::parse_value::<ServiceStatus>("status", raw))
        .transpose()?;

    Ok(move |s: &mut Service| {
        if let Some(v) = fields.name {
            s.name = v;
        }
        if let Some(v) = fields.description {
            s.description = v;
        }
        if !fields.features.is_empty() {
            s.features = fields.features;
        }
        if let Some(v) = fields.price {
            s.price = v;
        }
        if let Some(v) = fields.icon {
            s.icon = Some(v);
        }
        if let Some(v) = status {
            s.status = v;
        }
    })
}

fn skip_message(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::SameIndex => "Service is already at that position",
        SkipReason::OutOfRange => "Position is outside the service list",
        SkipReason::Filtered => "Clear the search and status filter before reordering",
    }
}

/// 1-based position from the command line to a list index.
fn index(position: usize, field: &str) -> Result<usize, CliError> {
    position.checked_sub(1).ok_or_else(|| CliError::Validation {
        field: field.into(),
        reason: "positions start at 1".into(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    atelier: &Atelier,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let services = atelier.services();
    let color = output::should_color(&global.color);

    match args.command {
        ServicesCommand::List(list) => {
            let view = util::filtered_list(services, &list).await?;
            let out = output::render_list(
                &global.output,
                &view,
                |s| ServiceRow {
                    position: view.iter().position(|v| v.id == s.id).map_or(0, |i| i + 1),
                    id: s.id.to_string(),
                    name: s.name.clone(),
                    price: s.price.clone(),
                    features: s.features.len(),
                    status: s.status.to_string(),
                },
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServicesCommand::Get { id } => {
            util::show(services, EntityId::new(id), global, |s| detail(s, color)).await
        }

        ServicesCommand::Create(fields) => {
            let saved = util::save_with(services, None, None, apply(fields)?).await?;
            util::report_saved("created", &saved, global);
            Ok(())
        }

        ServicesCommand::Update { id, fields } => {
            let existing = services.store().fetch(EntityId::new(id)).await?;
            let saved = util::save_with(services, Some(&existing), None, apply(fields)?).await?;
            util::report_saved("updated", &saved, global);
            Ok(())
        }

        ServicesCommand::Delete { id } => util::delete(services, EntityId::new(id), global).await,

        ServicesCommand::Toggle { id } => {
            let existing = services.store().fetch(EntityId::new(id)).await?;
            let saved = services.toggle_status(&existing).await?;
            output::notice(
                format!(
                    "Service {} is now {}",
                    saved.id,
                    output::paint(saved.status, tone(saved.status), color)
                ),
                global.quiet,
            );
            Ok(())
        }

        ServicesCommand::Move { from, to } => {
            let (from, to) = (index(from, "from")?, index(to, "to")?);
            services.load().await?;
            match atelier.reorder().move_to(from, to).await? {
                ReorderOutcome::Moved { moved, target, orders } => {
                    output::notice(
                        format!(
                            "Moved service {moved} to position {} (order {}; service {target} now {})",
                            to + 1,
                            orders[0].order,
                            orders[1].order,
                        ),
                        global.quiet,
                    );
                    Ok(())
                }
                ReorderOutcome::Skipped(reason) => {
                    output::notice(skip_message(reason), global.quiet);
                    Ok(())
                }
            }
        }
    }
}
