//! Reactive back-office layer between `atelier-api` and front ends.
//!
//! - **[`Atelier`]**: entry point wiring one client, one session and a
//!   controller per managed collection.
//!
//! - **[`ResourceStore`]**: cached snapshot of one collection, replaced
//!   wholesale on `load()` and reconciled after every mutation according
//!   to its [`Reconciliation`] policy.
//!
//! - **[`CrudController`]**: editor state machine (idle, editing, saving),
//!   validation, confirmed deletes, status changes and filtered views.
//!
//! - **[`ReorderCoordinator`]**: drag-and-drop service reordering with a
//!   local splice and reload-on-failure.
//!
//! - **[`SessionGuard`]**: login, register, refresh, logout and the admin
//!   gate over the shared [`Session`](atelier_api::Session).
//!
//! - **[`PublicSite`]**: marketing reads and validated public forms.

pub mod atelier;
pub mod config;
pub mod crud;
pub mod error;
pub mod model;
pub mod public;
pub mod reorder;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use atelier::Atelier;
pub use config::{AtelierConfig, TlsVerification};
pub use crud::{Confirm, CrudController, Editor, EditorState};
pub use error::CoreError;
pub use public::PublicSite;
pub use reorder::{ReorderCoordinator, ReorderOutcome, SkipReason};
pub use session::SessionGuard;
pub use store::{Reconciliation, ResourceStore};
pub use stream::{EntityStream, Query, Snapshot};

pub use atelier_api::{
    Attachment, FileSessionStore, MemorySessionStore, Session, SessionState, SessionStore,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ApplicationStatus, ApplicationSubmission, ApplicationType, BinaryStatus, Blog, BlogStatus,
    DashboardStats, EntityId, Enquiry, EnquiryStatus, EnquirySubmission, Job, JobApplication,
    JobStatus, JobType, Resource, Review, ReviewStatus, Service, ServiceOrder, ServiceStatus,
    User, ValidationErrors,
};
