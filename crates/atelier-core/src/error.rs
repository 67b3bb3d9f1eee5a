// ── Core error types ──
//
// User-facing errors from atelier-core. Consumers never match on HTTP
// status codes directly; the `From<atelier_api::Error>` impl translates
// transport-layer failures into the back-office's vocabulary.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::ValidationErrors;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the backend timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Rejected by the backend (HTTP {status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        field_errors: IndexMap<String, Vec<String>>,
    },

    // ── Editor errors ────────────────────────────────────────────────
    #[error("A save is already in progress")]
    EditorBusy,

    #[error("No record is open for editing")]
    NoDraft,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` when the caller has to log in (again).
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired | Self::NotLoggedIn | Self::AuthenticationFailed { .. }
        )
    }

    /// Per-field messages attached to this error, if any.
    pub fn field_errors(&self) -> Option<ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::Rejected { field_errors, .. } if !field_errors.is_empty() => {
                Some(ValidationErrors::from_server(field_errors))
            }
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<atelier_api::Error> for CoreError {
    fn from(err: atelier_api::Error) -> Self {
        match err {
            atelier_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            atelier_api::Error::SessionExpired => CoreError::SessionExpired,
            atelier_api::Error::Forbidden { message } => CoreError::PermissionDenied { message },
            atelier_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            atelier_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            atelier_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            atelier_api::Error::NotFound { path } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: path,
            },
            atelier_api::Error::Rejected {
                status,
                message,
                field_errors,
            } => CoreError::Rejected {
                status,
                message,
                field_errors,
            },
            atelier_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response: {message}"))
            }
            atelier_api::Error::Encode(e) => {
                CoreError::Internal(format!("Failed to encode request: {e}"))
            }
            atelier_api::Error::Io(e) => CoreError::Internal(format!("IO error: {e}")),
        }
    }
}

/// Translate an API error for a specific record, naming the record in
/// not-found errors instead of the raw request path.
pub(crate) fn for_entity(
    err: atelier_api::Error,
    entity_type: &str,
    identifier: impl fmt::Display,
) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.to_string(),
        }
    } else {
        err.into()
    }
}
