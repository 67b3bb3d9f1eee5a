// ── Public site ──
//
// Read-only marketing content and the two public forms. Submissions are
// validated locally and never sent when invalid.

use std::sync::Arc;

use atelier_api::{ApiClient, Attachment};
use tracing::debug;

use crate::error::{CoreError, for_entity};
use crate::model::{
    ApplicationSubmission, Blog, EntityId, Enquiry, EnquirySubmission, Job, JobApplication,
    Review, Service, ServiceStatus, validate_application, validate_enquiry,
};
use crate::stream::career_matches;

pub struct PublicSite {
    client: Arc<ApiClient>,
}

impl PublicSite {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    // ── Content ──────────────────────────────────────────────────────

    /// Active services in display order.
    pub async fn services(&self) -> Result<Vec<Service>, CoreError> {
        let mut services: Vec<Service> = self
            .client
            .public_services()
            .await?
            .into_iter()
            .filter(|s| s.status == ServiceStatus::Active)
            .collect();
        services.sort_by_key(|s| s.order);
        Ok(services)
    }

    pub async fn blogs(&self) -> Result<Vec<Blog>, CoreError> {
        Ok(self.client.public_blogs().await?)
    }

    pub async fn blog(&self, id: EntityId) -> Result<Blog, CoreError> {
        self.client
            .public_blog(id)
            .await
            .map_err(|e| for_entity(e, "blog", id))
    }

    pub async fn reviews(&self) -> Result<Vec<Review>, CoreError> {
        Ok(self.client.public_reviews().await?)
    }

    pub async fn jobs(&self) -> Result<Vec<Job>, CoreError> {
        Ok(self.client.public_jobs().await?)
    }

    /// Look a posting up by slug. Older backends lack the detail route, so
    /// a 404 falls back to scanning the published list.
    pub async fn job_by_slug(&self, slug: &str) -> Result<Job, CoreError> {
        match self.client.public_job(slug).await {
            Ok(job) => Ok(job),
            Err(e) if e.is_not_found() => {
                debug!(slug, "job detail not found, scanning list");
                self.client
                    .public_jobs()
                    .await?
                    .into_iter()
                    .find(|j| j.slug == slug)
                    .ok_or_else(|| CoreError::NotFound {
                        entity_type: "job".into(),
                        identifier: slug.to_owned(),
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Careers page search over title, location, type and department.
    pub async fn search_careers(&self, term: &str) -> Result<Vec<Job>, CoreError> {
        Ok(self
            .jobs()
            .await?
            .into_iter()
            .filter(|j| career_matches(j, term))
            .collect())
    }

    // ── Forms ────────────────────────────────────────────────────────

    pub async fn submit_enquiry(
        &self,
        enquiry: &EnquirySubmission,
    ) -> Result<Enquiry, CoreError> {
        validate_enquiry(enquiry).map_err(CoreError::Validation)?;
        Ok(self.client.submit_enquiry(enquiry).await?)
    }

    pub async fn submit_application(
        &self,
        application: &ApplicationSubmission,
        resume: Option<&Attachment>,
    ) -> Result<JobApplication, CoreError> {
        validate_application(application).map_err(CoreError::Validation)?;
        Ok(self.client.submit_application(application, resume).await?)
    }
}
