//! Shared helpers for command handlers.

use std::fmt::Display;
use std::io::IsTerminal;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use atelier_core::{Attachment, Confirm, CoreError, CrudController, EntityId, Resource};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Adapts [`confirm`] to the controller's infallible prompt, holding on
/// to the first failure so the handler can report it.
pub struct Prompter {
    yes: bool,
    failure: Mutex<Option<CliError>>,
}

impl Prompter {
    pub fn new(yes: bool) -> Self {
        Self {
            yes,
            failure: Mutex::new(None),
        }
    }

    pub fn finish(self, confirmed: bool) -> Result<bool, CliError> {
        match self.failure.into_inner().ok().flatten() {
            Some(err) => Err(err),
            None => Ok(confirmed),
        }
    }
}

impl Confirm for Prompter {
    fn confirm(&self, prompt: &str) -> bool {
        match confirm(prompt, self.yes) {
            Ok(answer) => answer,
            Err(err) => {
                if let Ok(mut slot) = self.failure.lock() {
                    slot.get_or_insert(err);
                }
                false
            }
        }
    }
}

/// Parse a status or type argument into its model enum.
pub fn parse_value<S>(field: &str, raw: &str) -> Result<S, CliError>
where
    S: FromStr,
    S::Err: Display,
{
    raw.parse().map_err(|e: S::Err| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}': {e}"),
    })
}

pub fn parse_date(field: &str, raw: &str) -> Result<chrono::NaiveDate, CliError> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
    })
}

pub async fn read_attachment(field: &str, path: &Path) -> Result<Attachment, CliError> {
    Attachment::from_path(field, path)
        .await
        .map_err(|e| CliError::from(CoreError::from(e)))
}

// ── Controller flows ─────────────────────────────────────────────────

/// Load the collection and apply `--search` / `--status`.
pub async fn filtered_list<T>(
    controller: &CrudController<T>,
    args: &ListArgs,
) -> Result<Vec<Arc<T>>, CliError>
where
    T: Resource,
    T::Status: FromStr,
    <T::Status as FromStr>::Err: Display,
{
    controller.load().await?;
    if let Some(ref term) = args.search {
        controller.set_search(term.as_str());
    }
    if let Some(ref raw) = args.status {
        controller.set_status_filter(Some(parse_value("status", raw)?));
    }
    Ok(controller.filtered_view())
}

/// Open the editor on `existing` (or a blank draft), apply the changes
/// and save. Client-side validation runs before anything is sent.
pub async fn save_with<T: Resource>(
    controller: &CrudController<T>,
    existing: Option<&T>,
    attachment: Option<Attachment>,
    apply: impl FnOnce(&mut T),
) -> Result<T, CliError> {
    controller.open_modal(existing)?;
    controller.edit(apply)?;
    if let Some(file) = attachment {
        controller.attach(file)?;
    }
    let saved = controller.save().await;
    if saved.is_err() {
        let _ = controller.cancel();
    }
    Ok(saved?)
}

/// Confirm and delete one record.
pub async fn delete<T: Resource>(
    controller: &CrudController<T>,
    id: EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !global.yes {
        // Only for a friendlier prompt; the delete itself does not need it.
        let _ = controller.load().await;
    }
    let prompter = Prompter::new(global.yes);
    let confirmed = controller.delete(id, &prompter).await?;
    if prompter.finish(confirmed)? {
        output::notice(format!("Deleted {} {id}", T::NOUN), global.quiet);
    }
    Ok(())
}

/// Fetch one record and print it.
pub async fn show<T: Resource + serde::Serialize>(
    controller: &CrudController<T>,
    id: EntityId,
    global: &GlobalOpts,
    detail: impl Fn(&T) -> String,
) -> Result<(), CliError> {
    let entity = controller.store().fetch(id).await?;
    let out = output::render_single(&global.output, &entity, detail, |e| e.id().to_string());
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Print the outcome of a create, update or status change.
pub fn report_saved<T: Resource + serde::Serialize>(
    verb: &str,
    entity: &T,
    global: &GlobalOpts,
) {
    output::notice(format!("{} {} {}", capitalize(verb), T::NOUN, entity.id()), global.quiet);
    if !matches!(global.output, crate::cli::OutputFormat::Table) {
        let out = output::render_single(&global.output, entity, |_| String::new(), |e| {
            e.id().to_string()
        });
        output::print_output(&out, global.quiet);
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
