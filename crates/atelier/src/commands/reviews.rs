//! Review command handlers.

use std::sync::Arc;

use atelier_core::{Atelier, EntityId, Review, ReviewStatus};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ReviewFields, ReviewsArgs, ReviewsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Review")]
    review: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Review>> for ReviewRow {
    fn from(r: &Arc<Review>) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.clone(),
            company: r.company.clone(),
            rating: stars(r.rating),
            review: output::clip(&r.review, 40),
            status: r.status.to_string(),
        }
    }
}

pub(super) fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn tone(status: ReviewStatus) -> Tone {
    match status {
        ReviewStatus::Approved => Tone::Good,
        ReviewStatus::Pending => Tone::Waiting,
        ReviewStatus::Rejected => Tone::Bad,
    }
}

fn detail(r: &Review, color: bool) -> String {
    [
        format!("ID:        {}", r.id),
        format!("Name:      {}", r.name),
        format!("Company:   {}", if r.company.is_empty() { "-" } else { &r.company }),
        format!("Rating:    {}", stars(r.rating)),
        format!(
            "Date:      {}",
            r.date.map_or_else(|| "-".into(), |d| d.to_string())
        ),
        format!("Status:    {}", output::paint(r.status, tone(r.status), color)),
        String::new(),
        r.review.clone(),
    ]
    .join("\n")
}

fn apply(fields: ReviewFields) -> Result<impl FnOnce(&mut Review), CliError> {
    let status = fields
        .status
        .as_deref()
        .map(|raw| util::parse_value::<ReviewStatus>("status", raw))
        .transpose()?;

    Ok(move |r: &mut Review| {
        if let Some(v) = fields.name {
            r.name = v;
        }
        if let Some(v) = fields.company {
            r.company = v;
        }
        if let Some(v) = fields.rating {
            r.rating = v;
        }
        if let Some(v) = fields.text {
            r.review = v;
        }
        if let Some(v) = status {
            r.status = v;
        }
    })
}

pub async fn handle(
    atelier: &Atelier,
    args: ReviewsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reviews = atelier.reviews();
    let color = output::should_color(&global.color);

    match args.command {
        ReviewsCommand::List(list) => {
            let view = util::filtered_list(reviews, &list).await?;
            let out = output::render_list(
                &global.output,
                &view,
                |r| ReviewRow::from(r),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReviewsCommand::Get { id } => {
            util::show(reviews, EntityId::new(id), global, |r| detail(r, color)).await
        }

        ReviewsCommand::Create(fields) => {
            let saved = util::save_with(reviews, None, None, apply(fields)?).await?;
            util::report_saved("created", &saved, global);
            Ok(())
        }

        ReviewsCommand::Update { id, fields } => {
            let existing = reviews.store().fetch(EntityId::new(id)).await?;
            let saved = util::save_with(reviews, Some(&existing), None, apply(fields)?).await?;
            util::report_saved("updated", &saved, global);
            Ok(())
        }

        ReviewsCommand::Status { id, status } => {
            let status: ReviewStatus = util::parse_value("status", &status)?;
            let saved = reviews.set_status(EntityId::new(id), status).await?;
            output::notice(
                format!(
                    "Review {} is now {}",
                    saved.id,
                    output::paint(saved.status, tone(saved.status), color)
                ),
                global.quiet,
            );
            Ok(())
        }

        ReviewsCommand::Delete { id } => util::delete(reviews, EntityId::new(id), global).await,
    }
}

#[cfg(test)]
mod tests {
    use super::stars;

    #[test]
    fn stars_fill_from_the_left() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
