// atelier-api: Async Rust client for the agency REST backend (admin + public surfaces)
//
// One `ApiClient` speaks to every endpoint. Admin collections are addressed
// generically through the `AdminCollection` marker trait; the public site
// and auth endpoints are inherent methods in their own modules.

pub mod admin;
pub mod attachment;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod public;
pub mod session;
pub mod transport;

pub use attachment::Attachment;
pub use client::ApiClient;
pub use error::Error;
pub use models::*;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionState, SessionStore};
pub use transport::{TlsMode, TransportConfig};
