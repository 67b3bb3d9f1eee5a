// ── Atelier ──
//
// Entry point for consumers. Wires one API client, one session and one
// store + controller per managed collection. Cheap to clone.

use std::sync::Arc;

use atelier_api::{ApiClient, Session, TlsMode, TransportConfig};

use crate::config::{AtelierConfig, TlsVerification};
use crate::crud::CrudController;
use crate::error::CoreError;
use crate::model::{
    Blog, DashboardStats, EntityId, Enquiry, Job, JobApplication, Resource, Review, Service,
};
use crate::public::PublicSite;
use crate::reorder::ReorderCoordinator;
use crate::session::SessionGuard;
use crate::store::{Reconciliation, ResourceStore};

/// The back-office: session, per-collection controllers, dashboard and
/// public site, all sharing one client.
#[derive(Clone)]
pub struct Atelier {
    inner: Arc<AtelierInner>,
}

struct AtelierInner {
    client: Arc<ApiClient>,
    reconciliation: Reconciliation,
    session: SessionGuard,
    blogs: Arc<CrudController<Blog>>,
    services: Arc<CrudController<Service>>,
    enquiries: Arc<CrudController<Enquiry>>,
    reviews: Arc<CrudController<Review>>,
    jobs: Arc<CrudController<Job>>,
    applications: Arc<CrudController<JobApplication>>,
}

impl Atelier {
    /// Build from configuration. Does not touch the network.
    pub fn new(config: &AtelierConfig, session: Arc<Session>) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
        };
        let client = ApiClient::new(config.api_url.clone(), session, &transport)?;
        Ok(Self::with_client(Arc::new(client), config.reconciliation))
    }

    /// Build around an existing client.
    pub fn with_client(client: Arc<ApiClient>, reconciliation: Reconciliation) -> Self {
        Self {
            inner: Arc::new(AtelierInner {
                session: SessionGuard::new(Arc::clone(&client)),
                blogs: controller(&client, reconciliation),
                services: controller(&client, reconciliation),
                enquiries: controller(&client, reconciliation),
                reviews: controller(&client, reconciliation),
                jobs: controller(&client, reconciliation),
                applications: controller(&client, reconciliation),
                client,
                reconciliation,
            }),
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.inner.client
    }

    pub fn session(&self) -> &SessionGuard {
        &self.inner.session
    }

    // ── Collections ──────────────────────────────────────────────────

    pub fn blogs(&self) -> &Arc<CrudController<Blog>> {
        &self.inner.blogs
    }

    pub fn services(&self) -> &Arc<CrudController<Service>> {
        &self.inner.services
    }

    pub fn enquiries(&self) -> &Arc<CrudController<Enquiry>> {
        &self.inner.enquiries
    }

    pub fn reviews(&self) -> &Arc<CrudController<Review>> {
        &self.inner.reviews
    }

    pub fn jobs(&self) -> &Arc<CrudController<Job>> {
        &self.inner.jobs
    }

    /// Every job application.
    pub fn applications(&self) -> &Arc<CrudController<JobApplication>> {
        &self.inner.applications
    }

    /// A controller whose store only loads applications for one job.
    pub fn applications_for(&self, job: EntityId) -> CrudController<JobApplication> {
        let store = ResourceStore::new(Arc::clone(&self.inner.client), self.inner.reconciliation)
            .scoped("job", job);
        CrudController::new(Arc::new(store))
    }

    pub fn reorder(&self) -> ReorderCoordinator {
        ReorderCoordinator::new(Arc::clone(&self.inner.services))
    }

    // ── Aggregates ───────────────────────────────────────────────────

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
        Ok(self.inner.client.dashboard_stats().await?)
    }

    pub fn public(&self) -> PublicSite {
        PublicSite::new(Arc::clone(&self.inner.client))
    }
}

fn controller<T: Resource>(
    client: &Arc<ApiClient>,
    reconciliation: Reconciliation,
) -> Arc<CrudController<T>> {
    let store = ResourceStore::new(Arc::clone(client), reconciliation);
    Arc::new(CrudController::new(Arc::new(store)))
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
