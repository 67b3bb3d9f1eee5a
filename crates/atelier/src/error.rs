//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use atelier_config::ConfigError;
use atelier_core::{CoreError, ValidationErrors};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(atelier::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(atelier::timeout),
        help("Increase timeout with --timeout or check the backend's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Session ──────────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(atelier::auth_failed),
        help(
            "Verify the email and password for this profile.\n\
             Store a password with: atelier config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(code(atelier::not_logged_in), help("Run: atelier auth login"))]
    NotLoggedIn,

    #[error("Session expired")]
    #[diagnostic(
        code(atelier::session_expired),
        help("The saved session was rejected and has been cleared.\nRun: atelier auth login")
    )]
    SessionExpired,

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(atelier::permission_denied),
        help("This command needs an administrator account.")
    )]
    PermissionDenied { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(atelier::no_credentials),
        help(
            "Configure credentials with: atelier config init\n\
             Or set the ATELIER_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(atelier::not_found),
        help("Run: atelier {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Backend rejected the request (HTTP {status}): {message}")]
    #[diagnostic(code(atelier::rejected))]
    Rejected { status: u16, message: String },

    #[error("{message}")]
    #[diagnostic(code(atelier::operation_failed))]
    OperationFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(atelier::validation))]
    Validation { field: String, reason: String },

    #[error("The form has errors")]
    #[diagnostic(code(atelier::invalid_form), help("{details}"))]
    InvalidForm { details: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(atelier::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: atelier config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(atelier::no_config),
        help(
            "Create a profile with: atelier config init\n\
             Or pass --api-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(atelier::config),
        help("Check the file shown by `atelier config path` and any ATELIER_* variables.")
    )]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(atelier::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. }
            | Self::NotLoggedIn
            | Self::SessionExpired
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::InvalidForm { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Timeouts carry the configured limit, which core does not know.
    pub fn with_timeout(self, seconds: u64) -> Self {
        match self {
            Self::Timeout { .. } => Self::Timeout { seconds },
            other => other,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

fn describe_fields(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },

            CoreError::Timeout => Self::Timeout { seconds: 0 },

            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },

            CoreError::SessionExpired => Self::SessionExpired,

            CoreError::NotLoggedIn => Self::NotLoggedIn,

            CoreError::PermissionDenied { message } => Self::PermissionDenied { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: list_command(&entity_type),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Validation(errors) => Self::InvalidForm {
                details: describe_fields(&errors),
            },

            CoreError::Rejected {
                status,
                message,
                field_errors,
            } => {
                if field_errors.is_empty() {
                    Self::Rejected { status, message }
                } else {
                    Self::InvalidForm {
                        details: describe_fields(&ValidationErrors::from_server(&field_errors)),
                    }
                }
            }

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            err @ (CoreError::EditorBusy | CoreError::NoDraft | CoreError::Internal(_)) => {
                Self::OperationFailed {
                    message: err.to_string(),
                }
            }
        }
    }
}

fn list_command(entity_type: &str) -> String {
    match entity_type {
        "enquiry" => "enquiries list".into(),
        other => format!("{other}s list"),
    }
}
