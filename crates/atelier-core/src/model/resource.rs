// ── Managed resources ──
//
// `Resource` is what a store and an editor need to know about one entity
// type: its identity, status, draft shape, validation rules, searchable
// fields and the typed patch used to persist it.

use std::fmt;

use atelier_api::models::AdminCollection;
use serde::Serialize;

use super::validation::{ValidationErrors, check_email};
use super::{
    ApplicationStatus, Blog, BlogPatch, BlogStatus, EntityId, Enquiry, EnquiryPatch,
    EnquiryStatus, Job, JobApplication, JobApplicationPatch, JobPatch, JobStatus, Review,
    ReviewPatch, ReviewStatus, Service, ServicePatch, ServiceStatus,
};

/// An entity type managed through the back-office.
pub trait Resource: AdminCollection + Clone + Default + fmt::Debug {
    /// Typed partial update listing the mutable fields.
    type Patch: Serialize + Default + fmt::Debug + Send + Sync;
    /// Lifecycle status enum.
    type Status: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    fn id(&self) -> EntityId;

    fn status(&self) -> Self::Status;

    /// A fresh, unsaved record: id 0 and the inactive-like status.
    fn draft() -> Self {
        Self::default()
    }

    /// Fields matched by the list search box.
    fn search_fields(&self) -> Vec<&str>;

    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Every mutable field, used for both create and update bodies.
    fn to_patch(&self) -> Self::Patch;

    /// A patch carrying only `status`.
    fn status_patch(status: Self::Status) -> Self::Patch;
}

/// Resources whose status flips between exactly two values.
pub trait BinaryStatus: Resource {
    fn toggled(status: Self::Status) -> Self::Status;
}

// ── Blog ─────────────────────────────────────────────────────────────

impl Resource for Blog {
    type Patch = BlogPatch;
    type Status = BlogStatus;

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> BlogStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.author.as_str()]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title);
        errors.require("excerpt", &self.excerpt);
        errors.require("author", &self.author);
        errors.into_result()
    }

    fn to_patch(&self) -> BlogPatch {
        BlogPatch {
            title: Some(self.title.clone()),
            excerpt: Some(self.excerpt.clone()),
            content: Some(self.content.clone()),
            category: Some(self.category.clone()),
            author: Some(self.author.clone()),
            publish_date: self.publish_date,
            image_url: self.image_url.clone(),
            read_time: self.read_time.clone(),
            status: Some(self.status),
        }
    }

    fn status_patch(status: BlogStatus) -> BlogPatch {
        BlogPatch {
            status: Some(status),
            ..BlogPatch::default()
        }
    }
}

impl BinaryStatus for Blog {
    fn toggled(status: BlogStatus) -> BlogStatus {
        match status {
            BlogStatus::Draft => BlogStatus::Published,
            BlogStatus::Published => BlogStatus::Draft,
        }
    }
}

// ── Service ──────────────────────────────────────────────────────────

impl Resource for Service {
    type Patch = ServicePatch;
    type Status = ServiceStatus;

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("description", &self.description);
        errors.require("price", &self.price);
        errors.into_result()
    }

    // `order` is owned by the reorder endpoint and never sent here.
    fn to_patch(&self) -> ServicePatch {
        ServicePatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            features: Some(
                self.features
                    .iter()
                    .filter(|f| !f.trim().is_empty())
                    .cloned()
                    .collect(),
            ),
            price: Some(self.price.clone()),
            icon: self.icon.clone(),
            status: Some(self.status),
        }
    }

    fn status_patch(status: ServiceStatus) -> ServicePatch {
        ServicePatch {
            status: Some(status),
            ..ServicePatch::default()
        }
    }
}

impl BinaryStatus for Service {
    fn toggled(status: ServiceStatus) -> ServiceStatus {
        match status {
            ServiceStatus::Active => ServiceStatus::Inactive,
            ServiceStatus::Inactive => ServiceStatus::Active,
        }
    }
}

// ── Enquiry ──────────────────────────────────────────────────────────

impl Resource for Enquiry {
    type Patch = EnquiryPatch;
    type Status = EnquiryStatus;

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> EnquiryStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.service.as_str()]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        check_email(&mut errors, "email", &self.email);
        errors.require("phone", &self.phone);
        errors.require("service", &self.service);
        errors.require("message", &self.message);
        errors.into_result()
    }

    fn to_patch(&self) -> EnquiryPatch {
        EnquiryPatch {
            name: Some(self.name.clone()),
            email: Some(self.email.trim().to_owned()),
            phone: Some(self.phone.clone()),
            company: self.company.clone(),
            service: Some(self.service.clone()),
            message: Some(self.message.clone()),
            status: Some(self.status),
        }
    }

    fn status_patch(status: EnquiryStatus) -> EnquiryPatch {
        EnquiryPatch {
            status: Some(status),
            ..EnquiryPatch::default()
        }
    }
}

// ── Review ───────────────────────────────────────────────────────────

impl Resource for Review {
    type Patch = ReviewPatch;
    type Status = ReviewStatus;

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> ReviewStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.company.as_str()]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("company", &self.company);
        errors.require("review", &self.review);
        if !(1..=5).contains(&self.rating) {
            errors.add("rating", "Rating must be between 1 and 5");
        }
        errors.into_result()
    }

    fn to_patch(&self) -> ReviewPatch {
        ReviewPatch {
            name: Some(self.name.clone()),
            company: Some(self.company.clone()),
            rating: Some(self.rating),
            review: Some(self.review.clone()),
            status: Some(self.status),
        }
    }

    fn status_patch(status: ReviewStatus) -> ReviewPatch {
        ReviewPatch {
            status: Some(status),
            ..ReviewPatch::default()
        }
    }
}

// ── Job ──────────────────────────────────────────────────────────────

impl Resource for Job {
    type Patch = JobPatch;
    type Status = JobStatus;

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> JobStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.department.as_str()]
    }

    // `type` and `status` are enums and therefore always set.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title);
        errors.require("company", &self.company);
        errors.require("location", &self.location);
        errors.require("experience", &self.experience);
        errors.require("description", &self.description);
        if !self.requirements.iter().any(|r| !r.trim().is_empty()) {
            errors.add("requirements", "At least one requirement is needed");
        }
        errors.into_result()
    }

    fn to_patch(&self) -> JobPatch {
        JobPatch {
            title: Some(self.title.clone()),
            company: Some(self.company.clone()),
            department: Some(self.department.clone()),
            location: Some(self.location.clone()),
            job_type: Some(self.job_type),
            experience: Some(self.experience.clone()),
            description: Some(self.description.clone()),
            requirements: Some(
                self.requirements
                    .iter()
                    .filter(|r| !r.trim().is_empty())
                    .cloned()
                    .collect(),
            ),
            status: Some(self.status),
        }
    }

    fn status_patch(status: JobStatus) -> JobPatch {
        JobPatch {
            status: Some(status),
            ..JobPatch::default()
        }
    }
}

impl BinaryStatus for Job {
    fn toggled(status: JobStatus) -> JobStatus {
        match status {
            JobStatus::Active => JobStatus::Inactive,
            JobStatus::Inactive => JobStatus::Active,
        }
    }
}

// ── Job application ──────────────────────────────────────────────────

impl Resource for JobApplication {
    type Patch = JobApplicationPatch;
    type Status = ApplicationStatus;

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("first_name", &self.first_name);
        errors.require("last_name", &self.last_name);
        check_email(&mut errors, "email", &self.email);
        errors.into_result()
    }

    // Applicant details are immutable from the back-office; only the
    // review status is sent.
    fn to_patch(&self) -> JobApplicationPatch {
        Self::status_patch(self.status)
    }

    fn status_patch(status: ApplicationStatus) -> JobApplicationPatch {
        JobApplicationPatch {
            status: Some(status),
        }
    }
}
