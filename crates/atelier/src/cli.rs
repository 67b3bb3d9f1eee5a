//! Clap derive structures for the `atelier` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Status and type values are taken as strings restricted to their
//! possible values; handlers parse them into the model enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// atelier -- back office for the agency website
#[derive(Debug, Parser)]
#[command(
    name = "atelier",
    version,
    about = "Manage the agency website from the command line",
    long_about = "Administer blogs, services, enquiries, reviews, job openings and\n\
        applications on the agency backend, and browse the public site.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "ATELIER_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'u', env = "ATELIER_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Where the login session is kept (defaults to the data directory)
    #[arg(long, env = "ATELIER_SESSION_FILE", global = true, hide = true)]
    pub session_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ATELIER_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ATELIER_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ATELIER_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, log out and inspect the session
    Auth(AuthArgs),

    /// Show record counts for every collection
    #[command(alias = "stats")]
    Dashboard,

    /// Manage blog posts
    #[command(alias = "blog")]
    Blogs(BlogsArgs),

    /// Manage services and their display order
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// Manage contact enquiries
    #[command(alias = "enq")]
    Enquiries(EnquiriesArgs),

    /// Manage client reviews
    Reviews(ReviewsArgs),

    /// Manage job openings
    #[command(alias = "careers")]
    Jobs(JobsArgs),

    /// Manage job applications
    #[command(alias = "apps")]
    Applications(ApplicationsArgs),

    /// Browse the public site and submit its forms
    Site(SiteArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Client-side search shared by every admin list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive search term
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only show records with this status
    #[arg(long)]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and keep the session for later commands
    Login {
        /// Account email (defaults to the profile's email)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },

    /// Create an account and log in as it
    Register {
        /// Account email
        #[arg(long, short = 'e', required = true)]
        email: String,

        /// Display name
        #[arg(long, required = true)]
        username: String,
    },

    /// End the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Exchange the refresh token for a new access token
    Refresh,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BLOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BlogsArgs {
    #[command(subcommand)]
    pub command: BlogsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlogsCommand {
    /// List blog posts
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one post
    Get {
        /// Blog ID
        id: u64,
    },

    /// Write a new post
    Create(BlogFields),

    /// Edit a post (only the given fields change)
    Update {
        /// Blog ID
        id: u64,

        #[command(flatten)]
        fields: BlogFields,
    },

    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Blog ID
        id: u64,
    },

    /// Flip between draft and published
    Toggle {
        /// Blog ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct BlogFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Short summary shown in listings
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Body text
    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// Publish date (YYYY-MM-DD)
    #[arg(long)]
    pub publish_date: Option<String>,

    /// Reading time label, e.g. "5 min read"
    #[arg(long)]
    pub read_time: Option<String>,

    #[arg(long, value_parser = ["draft", "published"])]
    pub status: Option<String>,

    /// Cover image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services in display order
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one service
    Get {
        /// Service ID
        id: u64,
    },

    /// Add a service
    Create(ServiceFields),

    /// Edit a service (only the given fields change)
    Update {
        /// Service ID
        id: u64,

        #[command(flatten)]
        fields: ServiceFields,
    },

    /// Delete a service
    #[command(alias = "rm")]
    Delete {
        /// Service ID
        id: u64,
    },

    /// Flip between active and inactive
    Toggle {
        /// Service ID
        id: u64,
    },

    /// Move the service at one list position onto another (1-based)
    #[command(alias = "mv")]
    Move {
        /// Current position
        from: usize,

        /// Target position
        to: usize,
    },
}

#[derive(Debug, Args)]
pub struct ServiceFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Feature bullet (repeatable; replaces the whole list)
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Price label, e.g. "from $499"
    #[arg(long)]
    pub price: Option<String>,

    /// Icon name
    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long, value_parser = ["active", "inactive"])]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENQUIRIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EnquiriesArgs {
    #[command(subcommand)]
    pub command: EnquiriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnquiriesCommand {
    /// List enquiries
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one enquiry
    Get {
        /// Enquiry ID
        id: u64,
    },

    /// Record an enquiry by hand
    Create(EnquiryFields),

    /// Edit an enquiry (only the given fields change)
    Update {
        /// Enquiry ID
        id: u64,

        #[command(flatten)]
        fields: EnquiryFields,
    },

    /// Set the follow-up status
    Status {
        /// Enquiry ID
        id: u64,

        #[arg(value_parser = ["new", "contacted", "closed"])]
        status: String,
    },

    /// Delete an enquiry
    #[command(alias = "rm")]
    Delete {
        /// Enquiry ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct EnquiryFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Service the enquiry is about
    #[arg(long)]
    pub service: Option<String>,

    #[arg(long)]
    pub message: Option<String>,

    #[arg(long, value_parser = ["new", "contacted", "closed"])]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REVIEWS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub command: ReviewsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReviewsCommand {
    /// List reviews
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one review
    Get {
        /// Review ID
        id: u64,
    },

    /// Add a review
    Create(ReviewFields),

    /// Edit a review (only the given fields change)
    Update {
        /// Review ID
        id: u64,

        #[command(flatten)]
        fields: ReviewFields,
    },

    /// Approve or reject a review
    Status {
        /// Review ID
        id: u64,

        #[arg(value_parser = ["pending", "approved", "rejected"])]
        status: String,
    },

    /// Delete a review
    #[command(alias = "rm")]
    Delete {
        /// Review ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct ReviewFields {
    /// Reviewer name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Star rating (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,

    /// Review text
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long, value_parser = ["pending", "approved", "rejected"])]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  JOBS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List job openings
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one opening
    Get {
        /// Job ID
        id: u64,
    },

    /// Post an opening
    Create(JobFields),

    /// Edit an opening (only the given fields change)
    Update {
        /// Job ID
        id: u64,

        #[command(flatten)]
        fields: JobFields,
    },

    /// Delete an opening
    #[command(alias = "rm")]
    Delete {
        /// Job ID
        id: u64,
    },

    /// Flip between active and inactive
    Toggle {
        /// Job ID
        id: u64,
    },

    /// List the applications received for an opening
    Applications {
        /// Job ID
        id: u64,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Debug, Args)]
pub struct JobFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Employment type
    #[arg(long = "type", value_parser = ["full-time", "part-time", "contract", "internship"])]
    pub job_type: Option<String>,

    /// Experience label, e.g. "3+ years"
    #[arg(long)]
    pub experience: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Requirement bullet (repeatable; replaces the whole list)
    #[arg(long = "requirement")]
    pub requirements: Vec<String>,

    #[arg(long, value_parser = ["active", "inactive"])]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLICATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApplicationsArgs {
    #[command(subcommand)]
    pub command: ApplicationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApplicationsCommand {
    /// List applications
    #[command(alias = "ls")]
    List {
        /// Only applications for this job ID
        #[arg(long)]
        job: Option<u64>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show an application in full
    Get {
        /// Application ID
        id: u64,
    },

    /// Move an application through review
    Status {
        /// Application ID
        id: u64,

        #[arg(value_parser = ["pending", "reviewed", "shortlisted", "rejected"])]
        status: String,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        id: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SiteArgs {
    #[command(subcommand)]
    pub command: SiteCommand,
}

#[derive(Debug, Subcommand)]
pub enum SiteCommand {
    /// Services as the site shows them (active, in order)
    Services,

    /// Published blog posts
    Blogs,

    /// Read one blog post
    Blog {
        /// Blog ID
        id: u64,
    },

    /// Client reviews
    Reviews,

    /// Open positions
    Jobs {
        /// Match title, location, type or department
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// One opening by its URL slug
    Job {
        /// Job slug, e.g. "senior-designer"
        slug: String,
    },

    /// Send the contact form
    Enquire {
        #[arg(long, required = true)]
        name: String,

        #[arg(long, required = true)]
        email: String,

        #[arg(long, required = true)]
        phone: String,

        #[arg(long)]
        company: Option<String>,

        /// Service the enquiry is about
        #[arg(long, required = true)]
        service: String,

        #[arg(long, required = true)]
        message: String,
    },

    /// Apply for an opening, or refer a friend
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Job ID
    #[arg(long, required = true)]
    pub job: u64,

    /// Refer a friend instead of applying yourself
    #[arg(long)]
    pub referral: bool,

    #[arg(long, required = true)]
    pub first_name: String,

    #[arg(long, required = true)]
    pub last_name: String,

    #[arg(long, required = true)]
    pub email: String,

    #[arg(long, required = true)]
    pub phone: String,

    #[arg(long, requires = "referral")]
    pub friend_first_name: Option<String>,

    #[arg(long, requires = "referral")]
    pub friend_last_name: Option<String>,

    #[arg(long, requires = "referral")]
    pub friend_email: Option<String>,

    #[arg(long, requires = "referral")]
    pub friend_phone: Option<String>,

    #[arg(long)]
    pub cover_letter: Option<String>,

    /// Resume file to upload
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: api_url, email, password_env, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config and session file locations
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
