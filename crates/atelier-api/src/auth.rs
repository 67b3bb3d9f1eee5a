// Authentication endpoints
//
// Token-pair login under `api/auth/`. These calls only talk to the wire;
// installing or clearing the resulting tokens is the caller's job
// (see `atelier_core::SessionGuard`).

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AuthResponse, RefreshResponse};

impl ApiClient {
    /// Exchange email + password for a token pair and user profile.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthResponse, Error> {
        debug!(%email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.post_anonymous("api/auth/login/", &body).await
    }

    /// Create an account and receive its token pair.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        username: &str,
    ) -> Result<AuthResponse, Error> {
        debug!(%email, %username, "registering");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
            "username": username,
        });
        self.post_anonymous("api/auth/register/", &body).await
    }

    /// Invalidate the refresh token server-side.
    pub async fn logout(&self, refresh_token: &SecretString) -> Result<(), Error> {
        debug!("logging out");
        let body = json!({ "refresh_token": refresh_token.expose_secret() });
        self.post_no_response("api/auth/logout/", &body).await
    }

    /// Trade the refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &SecretString) -> Result<RefreshResponse, Error> {
        debug!("refreshing access token");
        let body = json!({ "refresh": refresh_token.expose_secret() });
        self.post_anonymous("api/auth/refresh/", &body).await
    }
}
