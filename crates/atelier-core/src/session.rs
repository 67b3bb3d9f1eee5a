// ── Session guard ──
//
// Credential lifecycle on top of the shared `Session`: login, register,
// refresh and logout, plus the admin gate the back-office routes check.
// Forced expiry on 401 happens inside the API client; this type only
// observes it.

use std::sync::Arc;

use atelier_api::{ApiClient, Session, SessionState};
use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::User;

pub struct SessionGuard {
    client: Arc<ApiClient>,
}

impl SessionGuard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn session(&self) -> &Arc<Session> {
        self.client.session()
    }

    // ── Credential exchange ──────────────────────────────────────────

    /// Exchange email + password for a token pair and persist it.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<User>, CoreError> {
        let resp = self.client.login(email, password).await?;
        self.session()
            .establish(resp.user, resp.tokens.access, resp.tokens.refresh);
        self.current_user().ok_or(CoreError::NotLoggedIn)
    }

    /// Create an account and log in as it.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        username: &str,
    ) -> Result<Arc<User>, CoreError> {
        let resp = self.client.register(email, password, username).await?;
        self.session()
            .establish(resp.user, resp.tokens.access, resp.tokens.refresh);
        self.current_user().ok_or(CoreError::NotLoggedIn)
    }

    /// Exchange the refresh token for a new access token. Any failure
    /// clears the session.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let token = self.session().refresh_token().ok_or(CoreError::NotLoggedIn)?;
        match self.client.refresh(&token).await {
            Ok(resp) => {
                self.session().rotate(resp.access, resp.refresh);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.session().clear();
                Err(CoreError::SessionExpired)
            }
        }
    }

    /// Best-effort server-side logout. Local state is cleared regardless
    /// of the outcome.
    pub async fn logout(&self) {
        if let Some(token) = self.session().refresh_token() {
            if let Err(e) = self.client.logout(&token).await {
                warn!(error = %e, "server logout failed, clearing local session anyway");
            }
        }
        self.session().clear();
        info!("logged out");
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<Arc<User>> {
        self.session().user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|u| u.is_admin)
    }

    /// Gate for admin routes.
    pub fn require_admin(&self) -> Result<Arc<User>, CoreError> {
        let user = self.current_user().ok_or(CoreError::NotLoggedIn)?;
        if user.is_admin {
            Ok(user)
        } else {
            Err(CoreError::PermissionDenied {
                message: format!("{} is not an administrator", user.email),
            })
        }
    }

    pub fn state(&self) -> SessionState {
        self.session().state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session().subscribe()
    }
}
