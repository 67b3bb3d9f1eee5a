// ── Runtime connection configuration ──
//
// Describes *how* to reach the backend. Never touches disk: the CLI builds
// an `AtelierConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::store::Reconciliation;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct AtelierConfig {
    /// Backend root, e.g. `http://localhost:8000`.
    pub api_url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// What stores do after a successful mutation.
    pub reconciliation: Reconciliation,
}

impl AtelierConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            reconciliation: Reconciliation::default(),
        }
    }
}
