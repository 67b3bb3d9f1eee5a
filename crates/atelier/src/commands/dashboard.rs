//! Dashboard counters.

use atelier_core::{Atelier, DashboardStats};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Collection")]
    collection: &'static str,
    #[tabled(rename = "Total")]
    total: u64,
}

fn rows(stats: &DashboardStats) -> Vec<CountRow> {
    [
        ("Blogs", stats.total_blogs),
        ("Services", stats.total_services),
        ("Enquiries", stats.total_enquiries),
        ("Reviews", stats.total_reviews),
        ("Careers", stats.total_careers),
        ("Applications", stats.total_applications),
    ]
    .into_iter()
    .map(|(collection, total)| CountRow { collection, total })
    .collect()
}

pub async fn handle(atelier: &Atelier, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = atelier.dashboard_stats().await?;
    let out = output::render_single(
        &global.output,
        &stats,
        |s| tabled::Table::new(rows(s)).with(tabled::settings::Style::rounded()).to_string(),
        |s| {
            rows(s)
                .iter()
                .map(|r| format!("{}\t{}", r.collection.to_lowercase(), r.total))
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
