//! Blog command handlers.

use std::sync::Arc;

use atelier_core::{Atelier, Blog, BlogStatus, EntityId};
use tabled::Tabled;

use crate::cli::{BlogFields, BlogsArgs, BlogsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BlogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Blog>> for BlogRow {
    fn from(b: &Arc<Blog>) -> Self {
        Self {
            id: b.id.to_string(),
            title: output::clip(&b.title, 40),
            author: b.author.clone(),
            category: b.category.clone(),
            date: b.publish_date.map(|d| d.to_string()).unwrap_or_default(),
            status: b.status.to_string(),
        }
    }
}

fn tone(status: BlogStatus) -> Tone {
    match status {
        BlogStatus::Published => Tone::Good,
        BlogStatus::Draft => Tone::Muted,
    }
}

pub(super) fn detail(b: &Blog, color: bool) -> String {
    let mut lines = vec![
        format!("ID:        {}", b.id),
        format!("Title:     {}", b.title),
        format!("Author:    {}", b.author),
        format!("Category:  {}", b.category),
        format!(
            "Date:      {}",
            b.publish_date.map_or_else(|| "-".into(), |d| d.to_string())
        ),
        format!("Read time: {}", b.read_time.as_deref().unwrap_or("-")),
        format!("Status:    {}", output::paint(b.status, tone(b.status), color)),
    ];
    if let Some(ref image) = b.image_url {
        lines.push(format!("Image:     {image}"));
    }
    lines.push(String::new());
    lines.push(b.excerpt.clone());
    if !b.content.is_empty() {
        lines.push(String::new());
        lines.push(b.content.clone());
    }
    lines.join("\n")
}

/// Copy the given flags onto the draft. Unset flags leave fields alone.
fn apply(fields: BlogFields) -> Result<impl FnOnce(&mut Blog), CliError> {
    let status = fields
        .status
        .as_deref()
        .map(|raw| util::parse_value::<BlogStatus>("status", raw))
        .transpose()?;
    let publish_date = fields
        .publish_date
        .as_deref()
        .map(|raw| util::parse_date("publish-date", raw))
        .transpose()?;

    Ok(move |b: &mut Blog| {
        if let Some(v) = fields.title {
            b.title = v;
        }
        if let Some(v) = fields.excerpt {
            b.excerpt = v;
        }
        if let Some(v) = fields.content {
            b.content = v;
        }
        if let Some(v) = fields.category {
            b.category = v;
        }
        if let Some(v) = fields.author {
            b.author = v;
        }
        if let Some(v) = fields.read_time {
            b.read_time = Some(v);
        }
        if publish_date.is_some() {
            b.publish_date = publish_date;
        }
        if let Some(v) = status {
            b.status = v;
        }
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(atelier: &Atelier, args: BlogsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let blogs = atelier.blogs();
    let color = output::should_color(&global.color);

    match args.command {
        BlogsCommand::List(list) => {
            let view = util::filtered_list(blogs, &list).await?;
            let out = output::render_list(
                &global.output,
                &view,
                |b| BlogRow::from(b),
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BlogsCommand::Get { id } => {
            util::show(blogs, EntityId::new(id), global, |b| detail(b, color)).await
        }

        BlogsCommand::Create(mut fields) => {
            let image = fields.image.take();
            let attachment = match image {
                Some(path) => Some(util::read_attachment("image", &path).await?),
                None => None,
            };
            let saved = util::save_with(blogs, None, attachment, apply(fields)?).await?;
            util::report_saved("created", &saved, global);
            Ok(())
        }

        BlogsCommand::Update { id, mut fields } => {
            let existing = blogs.store().fetch(EntityId::new(id)).await?;
            let attachment = match fields.image.take() {
                Some(path) => Some(util::read_attachment("image", &path).await?),
                None => None,
            };
            let saved = util::save_with(blogs, Some(&existing), attachment, apply(fields)?).await?;
            util::report_saved("updated", &saved, global);
            Ok(())
        }

        BlogsCommand::Delete { id } => util::delete(blogs, EntityId::new(id), global).await,

        BlogsCommand::Toggle { id } => {
            let existing = blogs.store().fetch(EntityId::new(id)).await?;
            let saved = blogs.toggle_status(&existing).await?;
            output::notice(
                format!(
                    "Blog {} is now {}",
                    saved.id,
                    output::paint(saved.status, tone(saved.status), color)
                ),
                global.quiet,
            );
            Ok(())
        }
    }
}
