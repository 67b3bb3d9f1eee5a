use indexmap::IndexMap;
use thiserror::Error;

/// Top-level error type for the `atelier-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, server-side rejection and payload decoding.
/// `atelier-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials were rejected by a login, register or refresh call.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The bearer token was rejected (HTTP 401). The session has already
    /// been cleared by the time the caller sees this.
    #[error("Session expired -- please log in again")]
    SessionExpired,

    /// Authenticated, but not allowed (HTTP 403).
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server responses ────────────────────────────────────────────
    /// HTTP 404 for the requested path.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other 4xx/5xx. `message` follows the backend's error shape
    /// (`non_field_errors`, then `detail`, then the first field error).
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        field_errors: IndexMap<String, Vec<String>>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    // ── Local state ─────────────────────────────────────────────────
    /// Reading an attachment or the persisted session failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the backend answered 404 for the requested path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Per-field messages reported by the backend, if any.
    pub fn field_errors(&self) -> Option<&IndexMap<String, Vec<String>>> {
        match self {
            Self::Rejected { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }
}

// ── Backend error body ───────────────────────────────────────────────

/// Pull the user-facing message and per-field errors out of an error body.
///
/// The backend answers with `{"non_field_errors": [..]}`, `{"detail": ".."}`
/// or `{"field": [".."]}`. Anything else falls back to `Server error: <status>`.
pub(crate) fn extract_message(
    status: reqwest::StatusCode,
    raw: &str,
) -> (String, IndexMap<String, Vec<String>>) {
    let mut fields = IndexMap::new();
    let fallback = format!("Server error: {status}");

    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(raw) else {
        return (fallback, fields);
    };

    for (key, value) in &map {
        if key == "non_field_errors" || key == "detail" {
            continue;
        }
        let messages: Vec<String> = match value {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            serde_json::Value::String(s) => vec![s.clone()],
            _ => continue,
        };
        if !messages.is_empty() {
            fields.insert(key.clone(), messages);
        }
    }

    let non_field = map
        .get("non_field_errors")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|v| v.as_str());
    let detail = map.get("detail").and_then(|v| v.as_str());
    let first_field = fields.values().next().and_then(|m| m.first()).map(String::as_str);

    let message = non_field
        .or(detail)
        .or(first_field)
        .map_or(fallback, String::from);

    (message, fields)
}
