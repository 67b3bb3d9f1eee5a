// ── Domain model ──
//
// The wire types from `atelier-api` double as the domain model; this
// module layers the editing behaviour on top: drafts, validation,
// searchable fields and status transitions.

mod resource;
mod validation;

pub use atelier_api::models::{
    ApplicationStatus, ApplicationSubmission, ApplicationType, Blog, BlogPatch, BlogStatus,
    DashboardStats, EntityId, Enquiry, EnquiryPatch, EnquiryStatus, EnquirySubmission, Job,
    JobApplication, JobApplicationPatch, JobPatch, JobStatus, JobType, Review, ReviewPatch,
    ReviewStatus, Service, ServiceOrder, ServicePatch, ServiceStatus, User,
};

pub use resource::{BinaryStatus, Resource};
pub use validation::{ValidationErrors, is_valid_email, validate_application, validate_enquiry};
