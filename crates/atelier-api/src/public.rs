// Public site endpoints
//
// Read-only marketing content and the two write-only submission forms.
// These work without a session; when one exists its token is still sent.

use crate::attachment::{Attachment, form_with_attachment};
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    ApplicationSubmission, Blog, EntityId, Enquiry, EnquirySubmission, Job, JobApplication,
    Review, Service,
};

impl ApiClient {
    // ── Reads ────────────────────────────────────────────────────────

    pub async fn public_services(&self) -> Result<Vec<Service>, Error> {
        self.get_list("api/services/", &[]).await
    }

    pub async fn public_blogs(&self) -> Result<Vec<Blog>, Error> {
        self.get_list("api/blogs/", &[]).await
    }

    pub async fn public_blog(&self, id: EntityId) -> Result<Blog, Error> {
        self.get(&format!("api/blogs/{id}/")).await
    }

    pub async fn public_reviews(&self) -> Result<Vec<Review>, Error> {
        self.get_list("api/reviews/", &[]).await
    }

    pub async fn public_jobs(&self) -> Result<Vec<Job>, Error> {
        self.get_list("api/jobs/", &[]).await
    }

    pub async fn public_job(&self, slug: &str) -> Result<Job, Error> {
        self.get(&format!("api/jobs/{slug}/")).await
    }

    // ── Submissions ──────────────────────────────────────────────────

    pub async fn submit_enquiry(&self, enquiry: &EnquirySubmission) -> Result<Enquiry, Error> {
        self.post("api/enquiries/", enquiry).await
    }

    /// Submit an application; the resume, if any, goes as multipart.
    pub async fn submit_application(
        &self,
        application: &ApplicationSubmission,
        resume: Option<&Attachment>,
    ) -> Result<JobApplication, Error> {
        match resume {
            Some(file) => {
                let form = form_with_attachment(application, file)?;
                self.post_multipart("api/job-applications/", form).await
            }
            None => self.post("api/job-applications/", application).await,
        }
    }
}
