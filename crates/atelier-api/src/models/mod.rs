// ── Wire models ──
//
// Request and response types for the agency backend. Field names follow the
// backend's snake_case JSON; camelCase spellings seen on older endpoints are
// accepted through serde aliases.

mod application;
mod blog;
mod dashboard;
mod enquiry;
mod id;
mod job;
mod review;
mod service;
mod user;

use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use application::{
    ApplicationStatus, ApplicationSubmission, ApplicationType, JobApplication,
    JobApplicationPatch,
};
pub use blog::{Blog, BlogPatch, BlogStatus};
pub use dashboard::DashboardStats;
pub use enquiry::{Enquiry, EnquiryPatch, EnquirySubmission, EnquiryStatus};
pub use id::EntityId;
pub use job::{Job, JobPatch, JobStatus, JobType};
pub use review::{Review, ReviewPatch, ReviewStatus};
pub use service::{Service, ServiceOrder, ServicePatch, ServiceStatus};
pub use user::{AuthResponse, RefreshResponse, TokenPair, User};

/// Marker for entity types managed under `api/admin/{PATH}/`.
pub trait AdminCollection: DeserializeOwned + Send + Sync + 'static {
    /// URL segment of the collection (e.g. `"blogs"`).
    const PATH: &'static str;
    /// Human-readable singular noun, used in logs and errors.
    const NOUN: &'static str;
}

/// List endpoints answer with either a bare array or a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Paged { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Paged { results } => results,
            Self::Bare(items) => items,
        }
    }
}
