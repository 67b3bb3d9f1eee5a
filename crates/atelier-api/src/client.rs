// HTTP client for the agency backend
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection and
// uniform response mapping. Endpoint groups (auth, admin collections, the
// public site) live in sibling modules as inherent methods so this file
// stays focused on transport mechanics.
//
// Every response passes through `handle_*`; a 401 there clears the shared
// session before the error reaches the caller.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::multipart::Form;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, extract_message};
use crate::models::ListPayload;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Async client for the agency REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://localhost:8000`);
    /// every endpoint path is joined under it.
    pub fn new(
        base_url: Url,
        session: Arc<Session>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Arc<Session>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            session,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/admin/blogs/"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Attach the bearer token, if the session holds one.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url)).send().await?;
        self.handle_response(resp).await
    }

    /// GET a collection, accepting both `[...]` and `{"results": [...]}`.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorize(self.http.get(url).query(params))
            .send()
            .await?;
        let payload: ListPayload<T> = self.handle_response(resp).await?;
        Ok(payload.into_vec())
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url).json(body)).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url).json(body)).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");

        let resp = self
            .authorize(self.http.post(url).multipart(form))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self
            .authorize(self.http.patch(url).json(body))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url} (multipart)");

        let resp = self
            .authorize(self.http.patch(url).multipart(form))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.handle_empty(resp).await
    }

    /// POST without a bearer token and without the 401 interceptor.
    ///
    /// Used by the auth endpoints: a rejected login is a credential
    /// problem, not an expired session.
    pub(crate) async fn post_anonymous<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (anonymous)");

        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            decode(resp).await
        } else {
            let raw = resp.text().await.unwrap_or_default();
            let (message, _) = extract_message(status, &raw);
            Err(Error::Authentication { message })
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            decode(resp).await
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        let path = resp.url().path().to_owned();

        if status == StatusCode::UNAUTHORIZED {
            warn!(%path, "backend rejected bearer token");
            self.session.expire();
            return Error::SessionExpired;
        }

        let raw = resp.text().await.unwrap_or_default();
        let (message, field_errors) = extract_message(status, &raw);

        match status {
            StatusCode::FORBIDDEN => Error::Forbidden { message },
            StatusCode::NOT_FOUND => Error::NotFound { path },
            _ => Error::Rejected {
                status: status.as_u16(),
                message,
                field_errors,
            },
        }
    }
}

/// Decode a success body. Empty bodies decode as JSON `null` so `()`
/// and `Option<T>` responses work against 204s.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    let source = if body.trim().is_empty() { "null" } else { &body };
    serde_json::from_str(source).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

/// Make sure the base URL ends with `/` so relative joins keep its path.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_preserved_on_join() {
        let client = ApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://cms.example.com/backend").unwrap(),
            Arc::new(Session::ephemeral()),
        );
        assert_eq!(
            client.url("/api/admin/blogs/").unwrap().as_str(),
            "https://cms.example.com/backend/api/admin/blogs/"
        );
    }
}
