//! Public site commands. No login needed.

use atelier_core::{
    ApplicationSubmission, ApplicationType, Atelier, Blog, EnquirySubmission, EntityId, Job,
    Review, Service,
};
use tabled::Tabled;

use crate::cli::{ApplyArgs, GlobalOpts, SiteArgs, SiteCommand};
use crate::error::CliError;
use crate::output;

use super::{blogs, jobs, reviews, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceCard {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "About")]
    about: String,
}

#[derive(Tabled)]
struct PostCard {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Read")]
    read_time: String,
}

#[derive(Tabled)]
struct Testimonial {
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Says")]
    text: String,
}

#[derive(Tabled)]
struct Opening {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Type")]
    job_type: String,
}

fn service_card(s: &Service) -> ServiceCard {
    ServiceCard {
        name: s.name.clone(),
        price: s.price.clone(),
        about: output::clip(&s.description, 50),
    }
}

fn post_card(b: &Blog) -> PostCard {
    PostCard {
        id: b.id.to_string(),
        title: output::clip(&b.title, 40),
        author: b.author.clone(),
        date: b.publish_date.map(|d| d.to_string()).unwrap_or_default(),
        read_time: b.read_time.clone().unwrap_or_default(),
    }
}

fn testimonial(r: &Review) -> Testimonial {
    Testimonial {
        name: r.name.clone(),
        company: r.company.clone(),
        rating: reviews::stars(r.rating),
        text: output::clip(&r.review, 50),
    }
}

fn opening(j: &Job) -> Opening {
    Opening {
        slug: j.slug.clone(),
        title: j.title.clone(),
        department: j.department.clone(),
        location: j.location.clone(),
        job_type: j.job_type.to_string(),
    }
}

fn submission(args: ApplyArgs) -> ApplicationSubmission {
    ApplicationSubmission {
        job: EntityId::new(args.job),
        application_type: if args.referral {
            ApplicationType::Referral
        } else {
            ApplicationType::Interested
        },
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        friend_first_name: args.friend_first_name,
        friend_last_name: args.friend_last_name,
        friend_email: args.friend_email,
        friend_phone: args.friend_phone,
        cover_letter: args.cover_letter,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(atelier: &Atelier, args: SiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let site = atelier.public();
    let color = output::should_color(&global.color);

    let out = match args.command {
        SiteCommand::Services => {
            let services = site.services().await?;
            output::render_list(&global.output, &services, service_card, |s| s.name.clone())
        }

        SiteCommand::Blogs => {
            let posts = site.blogs().await?;
            output::render_list(&global.output, &posts, post_card, |b| b.id.to_string())
        }

        SiteCommand::Blog { id } => {
            let post = site.blog(EntityId::new(id)).await?;
            output::render_single(
                &global.output,
                &post,
                |b| blogs::detail(b, color),
                |b| b.id.to_string(),
            )
        }

        SiteCommand::Reviews => {
            let all = site.reviews().await?;
            output::render_list(&global.output, &all, testimonial, |r| r.id.to_string())
        }

        SiteCommand::Jobs { search } => {
            let openings = match search {
                Some(term) => site.search_careers(&term).await?,
                None => site.jobs().await?,
            };
            output::render_list(&global.output, &openings, opening, |j| j.slug.clone())
        }

        SiteCommand::Job { slug } => {
            let job = site.job_by_slug(&slug).await?;
            output::render_single(
                &global.output,
                &job,
                |j| jobs::detail(j, color),
                |j| j.slug.clone(),
            )
        }

        SiteCommand::Enquire {
            name,
            email,
            phone,
            company,
            service,
            message,
        } => {
            let enquiry = EnquirySubmission {
                name,
                email,
                phone,
                company,
                service,
                message,
            };
            let sent = site.submit_enquiry(&enquiry).await?;
            output::notice("Thanks! We'll be in touch soon.", global.quiet);
            output::render_single(&global.output, &sent, |e| format!("Enquiry {}", e.id), |e| {
                e.id.to_string()
            })
        }

        SiteCommand::Apply(mut apply) => {
            let resume = match apply.resume.take() {
                Some(path) => Some(util::read_attachment("resume", &path).await?),
                None => None,
            };
            let sent = site
                .submit_application(&submission(apply), resume.as_ref())
                .await?;
            output::notice("Application received. Good luck!", global.quiet);
            output::render_single(
                &global.output,
                &sent,
                |a| format!("Application {}", a.id),
                |a| a.id.to_string(),
            )
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn apply_args(extra: &[&str]) -> ApplyArgs {
        let mut argv = vec![
            "atelier", "site", "apply", "--job", "4", "--first-name", "Ada", "--last-name",
            "Lovelace", "--email", "ada@example.com", "--phone", "555-0100",
        ];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            crate::cli::Command::Site(SiteArgs {
                command: SiteCommand::Apply(args),
            }) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn plain_application_is_interested() {
        let sub = submission(apply_args(&[]));
        assert_eq!(sub.application_type, ApplicationType::Interested);
        assert_eq!(sub.job, EntityId::new(4));
        assert!(sub.friend_email.is_none());
    }

    #[test]
    fn referral_carries_friend_details() {
        let sub = submission(apply_args(&[
            "--referral",
            "--friend-first-name",
            "Grace",
            "--friend-email",
            "grace@example.com",
        ]));
        assert_eq!(sub.application_type, ApplicationType::Referral);
        assert_eq!(sub.friend_first_name.as_deref(), Some("Grace"));
        assert_eq!(sub.friend_email.as_deref(), Some("grace@example.com"));
    }
}
